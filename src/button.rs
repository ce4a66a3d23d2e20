use crate::frontend::{Align, Frontend, Sprite};
use crate::geom::Rect;
use crate::settings::Settings;

const BUTTON_WIDTH: f32 = 12.0;
const BUTTON_HEIGHT: f32 = 3.0;

#[derive(Clone, Debug)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
}

impl Button {
    /// A button centred on the screen.
    pub fn new(settings: &Settings, label: &str) -> Self {
        Self {
            rect: settings.screen_rect().centered(BUTTON_WIDTH, BUTTON_HEIGHT),
            label: label.to_string(),
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.rect.contains(x, y)
    }

    pub fn draw(&self, frontend: &mut dyn Frontend) {
        frontend.draw(self.rect, Sprite::Button);
        frontend.draw_text(
            self.rect.center_x(),
            self.rect.center_y().floor(),
            &self.label,
            Align::Center,
        );
    }
}
