use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::frontend::Frontend;
use crate::game::{Control, Game};
use crate::scores::HighScoreStore;

/// The frame loop: input, update, render, then sleep off the rest of the tick.
pub struct App<F: Frontend> {
    game: Game,
    frontend: F,
    store: HighScoreStore,
    tick: Duration,
    pointer_visible: Option<bool>,
}

impl<F: Frontend> App<F> {
    pub fn new(game: Game, frontend: F, store: HighScoreStore, tick: Duration) -> Self {
        Self {
            game,
            frontend,
            store,
            tick,
            pointer_visible: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn into_frontend(self) -> F {
        self.frontend
    }

    /// Runs until the player quits or a frame fails. The high score is
    /// saved before returning either way.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let frame_start = Instant::now();
            match self.step(frame_start) {
                Ok(Control::Quit) => return self.quit(),
                Ok(Control::Continue) => {}
                Err(err) => {
                    if let Err(save_err) = self.quit() {
                        tracing::warn!("high score not saved after frame error: {save_err:#}");
                    }
                    return Err(err);
                }
            }
            let elapsed = frame_start.elapsed();
            if elapsed < self.tick {
                thread::sleep(self.tick - elapsed);
            }
        }
    }

    /// One frame. Returns [`Control::Quit`] as soon as a quit request is
    /// seen; events queued behind it are dropped.
    pub fn step(&mut self, now: Instant) -> Result<Control> {
        for event in self.frontend.poll_input()? {
            if self.game.handle_event(event) == Control::Quit {
                return Ok(Control::Quit);
            }
        }

        self.game.update(now);

        let visible = self.game.pointer_visible();
        if self.pointer_visible != Some(visible) {
            self.frontend.set_pointer_visible(visible)?;
            self.pointer_visible = Some(visible);
        }

        self.game.render(&mut self.frontend);
        self.frontend.present()?;
        Ok(Control::Continue)
    }

    fn quit(&mut self) -> Result<()> {
        let high_score = self.game.stats.high_score;
        tracing::info!(high_score, path = %self.store.path().display(), "saving and quitting");
        self.store.save(high_score)
    }
}
