use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, KeyEvent, MouseEvent};

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Reads terminal events on a background thread so the frame loop can drain
/// them without blocking.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(poll_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            if !event::poll(poll_interval).unwrap_or(false) {
                continue;
            }
            let forwarded = match event::read() {
                Ok(crossterm::event::Event::Key(key)) => Event::Key(key),
                Ok(crossterm::event::Event::Mouse(mouse)) => Event::Mouse(mouse),
                Ok(crossterm::event::Event::Resize(w, h)) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!("terminal event read failed: {err}");
                    continue;
                }
            };
            if tx.send(forwarded).is_err() {
                return;
            }
        });

        Self { rx }
    }

    /// Everything received so far, oldest first.
    pub fn drain(&self) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) => bail!("terminal event thread stopped"),
            }
        }
    }
}
