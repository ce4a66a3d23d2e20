#![allow(dead_code)]

use std::collections::VecDeque;

use alien_invasion::frontend::{Align, Frontend, InputEvent, Sprite};
use alien_invasion::game::Game;
use alien_invasion::geom::Rect;
use alien_invasion::settings::Settings;
use alien_invasion::stats::GameStats;

/// In-memory frontend: hands out one scripted batch of input per frame and
/// records what was drawn. Once the script runs out it asks to quit.
pub struct ScriptedFrontend {
    pub batches: VecDeque<Vec<InputEvent>>,
    pub size: (f32, f32),
    pub sprites: Vec<(Rect, Sprite)>,
    pub texts: Vec<String>,
    pub frames_presented: usize,
    pub pointer_visible: Option<bool>,
    /// `present` fails once this many frames have gone out.
    pub fail_after_frames: Option<usize>,
}

impl ScriptedFrontend {
    pub fn new(size: (f32, f32), batches: Vec<Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into(),
            size,
            sprites: Vec::new(),
            texts: Vec::new(),
            frames_presented: 0,
            pointer_visible: None,
            fail_after_frames: None,
        }
    }

    pub fn count(&self, sprite: Sprite) -> usize {
        self.sprites.iter().filter(|(_, s)| *s == sprite).count()
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_input(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        Ok(self.batches.pop_front().unwrap_or_else(|| vec![InputEvent::Quit]))
    }

    fn bounds(&self) -> (f32, f32) {
        self.size
    }

    fn clear(&mut self) {
        self.sprites.clear();
        self.texts.clear();
    }

    fn draw(&mut self, rect: Rect, sprite: Sprite) {
        self.sprites.push((rect, sprite));
    }

    fn draw_text(&mut self, _x: f32, _y: f32, text: &str, _align: Align) {
        self.texts.push(text.to_string());
    }

    fn present(&mut self) -> anyhow::Result<()> {
        if self.fail_after_frames == Some(self.frames_presented) {
            anyhow::bail!("terminal went away");
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn set_pointer_visible(&mut self, visible: bool) -> anyhow::Result<()> {
        self.pointer_visible = Some(visible);
        Ok(())
    }
}

/// 36x11 cells holds a 5 x 3 fleet.
pub fn small_settings() -> Settings {
    Settings::new(36.0, 11.0)
}

pub fn small_game() -> Game {
    let settings = small_settings();
    let stats = GameStats::new(&settings, 0);
    Game::new(settings, stats).unwrap()
}

pub fn started_game() -> Game {
    let mut game = small_game();
    game.start_game();
    game
}
