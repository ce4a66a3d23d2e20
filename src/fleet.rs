use crate::entities::Alien;
use crate::settings::Settings;

/// Columns and rows of a full fleet for the current screen.
///
/// One alien-width of margin is kept on both edges and between aliens; rows
/// stop short of the ship with three alien-heights of clearance.
pub fn dimensions(settings: &Settings) -> (usize, usize) {
    let w = settings.alien_width;
    let h = settings.alien_height;

    let available_x = settings.screen_width - 2.0 * w;
    let columns = (available_x / (2.0 * w)).floor().max(0.0) as usize;

    let available_y = settings.screen_height - 3.0 * h - settings.ship_height;
    let rows = (available_y / (2.0 * h)).floor().max(0.0) as usize;

    (columns, rows)
}

pub fn create(settings: &Settings) -> Vec<Alien> {
    let (columns, rows) = dimensions(settings);
    let w = settings.alien_width;
    let h = settings.alien_height;

    let mut aliens = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for col in 0..columns {
            let x = 2.0 * w * col as f32 + w;
            let y = 2.0 * h * row as f32 + h;
            aliens.push(Alien::new(settings, x, y));
        }
    }
    tracing::debug!(columns, rows, "fleet created");
    aliens
}
