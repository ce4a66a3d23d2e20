use crate::scores::HighScoreStore;
use crate::settings::Settings;

#[derive(Clone, Debug)]
pub struct GameStats {
    pub ships_left: u32,
    pub score: u32,
    pub level: u32,
    /// Survives game-overs; only ever promoted.
    pub high_score: u32,
    ship_limit: u32,
}

impl GameStats {
    pub fn new(settings: &Settings, high_score: u32) -> Self {
        let mut stats = Self {
            ships_left: settings.ship_limit,
            score: 0,
            level: 1,
            high_score,
            ship_limit: settings.ship_limit,
        };
        stats.reset_stats();
        stats
    }

    /// Seeds the high score from the persisted file. A missing or unreadable
    /// file counts as zero.
    pub fn load(settings: &Settings, store: &HighScoreStore) -> Self {
        Self::new(settings, store.load())
    }

    pub fn reset_stats(&mut self) {
        self.ships_left = self.ship_limit;
        self.score = 0;
        self.level = 1;
    }
}
