use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    KeyboardEnhancementFlags, MouseButton, MouseEventKind, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::Terminal;

use crate::event::{Event, EventHandler};
use crate::frontend::{Align, Frontend, InputEvent, Key, Sprite};
use crate::geom::Rect as FieldRect;

/// Without release events, a held arrow counts as released once it has gone
/// quiet for longer than its window. The gap before the first auto-repeat is
/// the OS repeat delay (500 to 660 ms on common desktops).
const FIRST_REPEAT_WINDOW: Duration = Duration::from_millis(750);
/// Gap allowed between auto-repeats once they are flowing.
const REPEAT_WINDOW: Duration = Duration::from_millis(150);

const BACKGROUND: Color = Color::Rgb(0, 0, 5);

enum DrawCommand {
    Sprite(FieldRect, Sprite),
    Text {
        x: f32,
        y: f32,
        text: String,
        align: Align,
    },
}

/// An arrow key seen pressed but never released.
#[derive(Clone, Copy, Debug)]
struct HeldKey {
    last: Instant,
    repeating: bool,
}

impl HeldKey {
    fn pressed(now: Instant) -> Self {
        Self {
            last: now,
            repeating: false,
        }
    }

    fn refresh(&mut self, now: Instant) {
        self.last = now;
        self.repeating = true;
    }

    fn expired(&self, now: Instant) -> bool {
        let window = if self.repeating {
            REPEAT_WINDOW
        } else {
            FIRST_REPEAT_WINDOW
        };
        now.duration_since(self.last) > window
    }
}

/// [`Frontend`] over a full-screen crossterm terminal, drawn with ratatui.
/// One screen cell is one field unit.
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventHandler,
    commands: Vec<DrawCommand>,
    size: (u16, u16),
    /// Terminal reports key releases (kitty keyboard protocol).
    key_releases: bool,
    held: HashMap<Key, HeldKey>,
    mouse_captured: bool,
    restored: bool,
}

impl TerminalFrontend {
    pub fn new(poll_interval: Duration) -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("entering alternate screen")?;

        let key_releases = supports_keyboard_enhancement().unwrap_or(false);
        if key_releases {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("enabling key release events")?;
        }
        tracing::info!(key_releases, "terminal ready");

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("creating terminal")?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        let size = terminal.size().context("reading terminal size")?;

        Ok(Self {
            terminal,
            events: EventHandler::new(poll_interval),
            commands: Vec::new(),
            size: (size.width, size.height),
            key_releases,
            held: HashMap::new(),
            mouse_captured: true,
            restored: false,
        })
    }

    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        if self.key_releases {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant, out: &mut Vec<InputEvent>) {
        // Ctrl+C is the window-close request
        if key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            out.push(InputEvent::Quit);
            return;
        }
        let Some(mapped) = map_key(key.code) else { return };

        match key.kind {
            KeyEventKind::Release => out.push(InputEvent::KeyUp(mapped)),
            KeyEventKind::Repeat if self.key_releases => {}
            _ if self.key_releases => out.push(InputEvent::KeyDown(mapped)),
            _ => {
                if matches!(mapped, Key::Left | Key::Right) {
                    match self.held.get_mut(&mapped) {
                        Some(held) => held.refresh(now),
                        None => {
                            self.held.insert(mapped, HeldKey::pressed(now));
                            out.push(InputEvent::KeyDown(mapped));
                        }
                    }
                } else if key.kind == KeyEventKind::Press {
                    out.push(InputEvent::KeyDown(mapped));
                }
            }
        }
    }

    fn expire_held(&mut self, now: Instant, out: &mut Vec<InputEvent>) {
        self.held.retain(|&key, held| {
            if held.expired(now) {
                out.push(InputEvent::KeyUp(key));
                return false;
            }
            true
        });
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Frontend for TerminalFrontend {
    fn poll_input(&mut self) -> Result<Vec<InputEvent>> {
        let now = Instant::now();
        let mut out = Vec::new();
        for event in self.events.drain()? {
            match event {
                Event::Key(key) => self.on_key(key, now, &mut out),
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        out.push(InputEvent::Click {
                            x: mouse.column as f32 + 0.5,
                            y: mouse.row as f32 + 0.5,
                        });
                    }
                }
                Event::Resize(w, h) => {
                    tracing::debug!(w, h, "terminal resized; playfield keeps its size");
                }
            }
        }
        if !self.key_releases {
            self.expire_held(now, &mut out);
        }
        Ok(out)
    }

    fn bounds(&self) -> (f32, f32) {
        (self.size.0 as f32, self.size.1 as f32)
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw(&mut self, rect: FieldRect, sprite: Sprite) {
        self.commands.push(DrawCommand::Sprite(rect, sprite));
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, align: Align) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            align,
        });
    }

    fn present(&mut self) -> Result<()> {
        let commands = std::mem::take(&mut self.commands);
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);
                for command in &commands {
                    match command {
                        DrawCommand::Sprite(rect, Sprite::Button) => {
                            if let Some(cells) = cell_rect(rect, area) {
                                let button = Block::default()
                                    .borders(Borders::ALL)
                                    .border_type(BorderType::Rounded)
                                    .border_style(Style::default().fg(Color::Rgb(255, 255, 255)))
                                    .style(Style::default().bg(Color::Rgb(0, 140, 0)));
                                frame.render_widget(button, cells);
                            }
                        }
                        DrawCommand::Sprite(rect, sprite) => {
                            paint_sprite(frame.buffer_mut(), area, rect, *sprite);
                        }
                        DrawCommand::Text { x, y, text, align } => {
                            paint_text(frame.buffer_mut(), area, *x, *y, text, *align);
                        }
                    }
                }
            })
            .context("drawing frame")?;
        Ok(())
    }

    fn set_pointer_visible(&mut self, visible: bool) -> Result<()> {
        if visible == self.mouse_captured {
            return Ok(());
        }
        if visible {
            execute!(self.terminal.backend_mut(), EnableMouseCapture)?;
        } else {
            execute!(self.terminal.backend_mut(), DisableMouseCapture)?;
        }
        self.mouse_captured = visible;
        Ok(())
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Play),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

/// Cells covered by `rect`, clipped to `area`.
fn cell_rect(rect: &FieldRect, area: Rect) -> Option<Rect> {
    let x0 = rect.left().round().clamp(0.0, area.width as f32) as u16;
    let y0 = rect.top().round().clamp(0.0, area.height as f32) as u16;
    let x1 = rect.right().round().clamp(0.0, area.width as f32) as u16;
    let y1 = rect.bottom().round().clamp(0.0, area.height as f32) as u16;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(area.x + x0, area.y + y0, x1 - x0, y1 - y0))
}

fn sprite_look(sprite: Sprite) -> (&'static [&'static str], char, Style) {
    match sprite {
        Sprite::Ship => (
            &["  ▲  ", "◢███◣"],
            '█',
            Style::default().fg(Color::Rgb(80, 255, 80)).bg(BACKGROUND),
        ),
        Sprite::Alien => (
            &["▚▀▞"],
            '▀',
            Style::default().fg(Color::Rgb(200, 180, 255)).bg(BACKGROUND),
        ),
        Sprite::Bullet => (
            &["┃"],
            '┃',
            Style::default()
                .fg(Color::Rgb(255, 255, 200))
                .bg(BACKGROUND)
                .add_modifier(Modifier::BOLD),
        ),
        Sprite::LifeIcon => (
            &["◢◣"],
            '▲',
            Style::default().fg(Color::Rgb(255, 80, 80)).bg(BACKGROUND),
        ),
        Sprite::Button => (&[], ' ', Style::default().bg(Color::Rgb(0, 140, 0))),
    }
}

fn paint_sprite(buf: &mut Buffer, area: Rect, rect: &FieldRect, sprite: Sprite) {
    let Some(cells) = cell_rect(rect, area) else { return };
    let (pattern, fill, style) = sprite_look(sprite);
    let origin_x = area.x as i32 + rect.left().round() as i32;
    let origin_y = area.y as i32 + rect.top().round() as i32;

    for y in cells.top()..cells.bottom() {
        for x in cells.left()..cells.right() {
            let row = (y as i32 - origin_y) as usize;
            let col = (x as i32 - origin_x) as usize;
            let ch = pattern
                .get(row)
                .and_then(|line| line.chars().nth(col))
                .unwrap_or(fill);
            if ch == ' ' {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

fn paint_text(buf: &mut Buffer, area: Rect, x: f32, y: f32, text: &str, align: Align) {
    let width = text.chars().count() as f32;
    let start = match align {
        Align::Center => x - width / 2.0,
        Align::Right => x - width + 1.0,
    };
    let row = y.round();
    if row < 0.0 || row >= area.height as f32 {
        return;
    }
    let skip = (-start.round()).max(0.0) as usize;
    let col = start.round().max(0.0) as u16;
    if col >= area.width {
        return;
    }
    let visible: String = text.chars().skip(skip).collect();
    let style = Style::default()
        .fg(Color::Rgb(255, 220, 80))
        .add_modifier(Modifier::BOLD);
    buf.set_stringn(
        area.x + col,
        area.y + row as u16,
        visible,
        (area.width - col) as usize,
        style,
    );
}
