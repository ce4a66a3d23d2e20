use crate::frontend::{Align, Frontend, Sprite};
use crate::geom::Rect;
use crate::settings::Settings;
use crate::stats::GameStats;

const LIFE_ICON_WIDTH: f32 = 2.0;
const LIFE_ICON_HEIGHT: f32 = 1.0;

/// Cached display text for [`GameStats`].
///
/// Nothing here refreshes on its own: whoever changes a stat calls the
/// matching `prep_*` so the next frame shows it.
#[derive(Clone, Debug)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
    pub ships: Vec<Rect>,
    screen_width: f32,
}

impl Scoreboard {
    pub fn new(settings: &Settings, stats: &GameStats) -> Self {
        let mut sb = Self {
            score_text: String::new(),
            high_score_text: String::new(),
            level_text: String::new(),
            ships: Vec::new(),
            screen_width: settings.screen_width,
        };
        sb.prep_score(stats);
        sb.prep_high_score(stats);
        sb.prep_level(stats);
        sb.prep_ships(stats);
        sb
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = format_score(stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = format_score(stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = format!("Level {}", stats.level);
    }

    pub fn prep_ships(&mut self, stats: &GameStats) {
        self.ships = (0..stats.ships_left)
            .map(|i| {
                Rect::new(
                    1.0 + i as f32 * (LIFE_ICON_WIDTH + 1.0),
                    0.0,
                    LIFE_ICON_WIDTH,
                    LIFE_ICON_HEIGHT,
                )
            })
            .collect();
    }

    /// Promotes the current score to high score when it has been beaten.
    pub fn check_high_score(&mut self, stats: &mut GameStats) {
        if stats.score > stats.high_score {
            stats.high_score = stats.score;
            self.prep_high_score(stats);
            tracing::debug!(high_score = stats.high_score, "new high score");
        }
    }

    pub fn show(&self, frontend: &mut dyn Frontend) {
        let right = self.screen_width - 1.0;
        frontend.draw_text(right, 0.0, &self.score_text, Align::Right);
        frontend.draw_text(
            self.screen_width / 2.0,
            0.0,
            &format!("High {}", self.high_score_text),
            Align::Center,
        );
        frontend.draw_text(right, 1.0, &self.level_text, Align::Right);
        for &rect in &self.ships {
            frontend.draw(rect, Sprite::LifeIcon);
        }
    }
}

/// Nearest ten, grouped with commas: `1234567` -> `"1,234,570"`.
pub fn format_score(score: u32) -> String {
    let rounded = (score as u64 + 5) / 10 * 10;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
