//! The only surface the game sees of the host: an input queue and a canvas.

use anyhow::Result;

use crate::geom::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    /// Start a new game, or toggle pause while playing.
    Play,
    /// Save and exit.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Primary pointer button, in screen cells.
    Click { x: f32, y: f32 },
    /// The host asked us to close.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Bullet,
    Alien,
    /// Remaining-ships marker on the scoreboard.
    LifeIcon,
    Button,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Center,
    Right,
}

pub trait Frontend {
    /// Everything queued since the last call. Never blocks.
    fn poll_input(&mut self) -> Result<Vec<InputEvent>>;

    /// Drawable area as `(width, height)`.
    fn bounds(&self) -> (f32, f32);

    fn clear(&mut self);

    fn draw(&mut self, rect: Rect, sprite: Sprite);

    /// `x` is the anchor for `align`; `y` is the text row.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, align: Align);

    fn present(&mut self) -> Result<()>;

    fn set_pointer_visible(&mut self, visible: bool) -> Result<()>;
}
