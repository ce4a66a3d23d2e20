use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use alien_invasion::app::App;
use alien_invasion::config::Cli;
use alien_invasion::frontend::Frontend;
use alien_invasion::game::Game;
use alien_invasion::scores::HighScoreStore;
use alien_invasion::stats::GameStats;
use alien_invasion::tui::TerminalFrontend;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let store = HighScoreStore::new(
        cli.scores_file
            .clone()
            .unwrap_or_else(HighScoreStore::default_path),
    );

    // Setup terminal
    let frontend = TerminalFrontend::new(cli.tick())?;
    let (width, height) = frontend.bounds();
    let settings = cli.settings(width, height);
    let stats = GameStats::load(&settings, &store);

    let result = match Game::new(settings, stats) {
        Ok(game) => {
            let mut app = App::new(game, frontend, store, cli.tick());
            let result = app.run();
            app.into_frontend().restore()?;
            result
        }
        Err(err) => {
            drop(frontend);
            Err(err)
        }
    };

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
