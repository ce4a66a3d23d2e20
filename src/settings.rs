use std::time::Duration;

use crate::geom::Rect;

// Speeds are in cells per tick.
const SHIP_SPEED: f32 = 0.6;
const BULLET_SPEED: f32 = 0.5;
const ALIEN_SPEED: f32 = 0.15;
const ALIEN_POINTS: u32 = 50;
const SPEEDUP_SCALE: f32 = 1.1;
const POINTS_INCREMENT: u32 = 10;
const FLEET_DROP_SPEED: f32 = 1.0;
const SHIP_LIMIT: u32 = 3;
const BULLETS_ALLOWED: usize = 3;
const RESPAWN_DELAY: Duration = Duration::from_secs(1);

const SHIP_WIDTH: f32 = 5.0;
const SHIP_HEIGHT: f32 = 2.0;
const BULLET_WIDTH: f32 = 1.0;
const BULLET_HEIGHT: f32 = 1.0;
const ALIEN_WIDTH: f32 = 3.0;
const ALIEN_HEIGHT: f32 = 1.0;

/// Tunable parameters for one process lifetime.
///
/// The `base_*` values never change after construction. The current speeds,
/// the per-alien point value and the fleet direction are the dynamic part:
/// [`Settings::initialize_dynamic_settings`] puts them back to base at the
/// start of every game and [`Settings::increase_speed`] ramps them once per
/// cleared wave.
#[derive(Clone, Debug)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,

    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_limit: u32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullets_allowed: usize,

    pub alien_width: f32,
    pub alien_height: f32,
    pub fleet_drop_speed: f32,

    pub speedup_scale: f32,
    pub points_increment: u32,
    pub respawn_delay: Duration,

    pub base_ship_speed: f32,
    pub base_bullet_speed: f32,
    pub base_alien_speed: f32,
    pub base_alien_points: u32,

    pub ship_speed: f32,
    pub bullet_speed: f32,
    pub alien_speed: f32,
    pub alien_points: u32,
    /// +1.0 moves the fleet right, -1.0 left.
    pub fleet_direction: f32,
}

impl Settings {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let mut settings = Self {
            screen_width,
            screen_height,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_limit: SHIP_LIMIT,
            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullets_allowed: BULLETS_ALLOWED,
            alien_width: ALIEN_WIDTH,
            alien_height: ALIEN_HEIGHT,
            fleet_drop_speed: FLEET_DROP_SPEED,
            speedup_scale: SPEEDUP_SCALE,
            points_increment: POINTS_INCREMENT,
            respawn_delay: RESPAWN_DELAY,
            base_ship_speed: SHIP_SPEED,
            base_bullet_speed: BULLET_SPEED,
            base_alien_speed: ALIEN_SPEED,
            base_alien_points: ALIEN_POINTS,
            ship_speed: 0.0,
            bullet_speed: 0.0,
            alien_speed: 0.0,
            alien_points: 0,
            fleet_direction: 1.0,
        };
        settings.initialize_dynamic_settings();
        settings
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen_width, self.screen_height)
    }

    pub fn initialize_dynamic_settings(&mut self) {
        self.ship_speed = self.base_ship_speed;
        self.bullet_speed = self.base_bullet_speed;
        self.alien_speed = self.base_alien_speed;
        self.alien_points = self.base_alien_points;
        self.fleet_direction = 1.0;
    }

    pub fn increase_speed(&mut self) {
        self.ship_speed *= self.speedup_scale;
        self.bullet_speed *= self.speedup_scale;
        self.alien_speed *= self.speedup_scale;
        self.alien_points += self.points_increment;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(80.0, 24.0)
    }
}
