pub mod app;
pub mod button;
pub mod config;
pub mod entities;
pub mod event;
pub mod fleet;
pub mod frontend;
pub mod game;
pub mod geom;
pub mod scoreboard;
pub mod scores;
pub mod settings;
pub mod stats;
pub mod tui;
