use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "alien-invasion", version, about = "Shoot down the alien fleet before it lands")]
pub struct Cli {
    /// High score file [default: alien_invasion.scores next to the executable]
    #[arg(long, value_name = "PATH")]
    pub scores_file: Option<PathBuf>,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Frame period in milliseconds
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Ships per game
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub ships: u32,

    /// Bullets allowed on screen at once
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub bullets: u64,
}

impl Cli {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn settings(&self, screen_width: f32, screen_height: f32) -> Settings {
        let mut settings = Settings::new(screen_width, screen_height);
        settings.ship_limit = self.ships;
        settings.bullets_allowed = self.bullets as usize;
        settings
    }
}
