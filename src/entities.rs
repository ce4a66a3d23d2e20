//! The three moving rectangles of the playfield.

use crate::geom::Rect;
use crate::settings::Settings;

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Ship {
    pub fn new(settings: &Settings) -> Self {
        let mut ship = Self {
            x: 0.0,
            y: 0.0,
            width: settings.ship_width,
            height: settings.ship_height,
            moving_left: false,
            moving_right: false,
        };
        ship.center(settings);
        ship
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Midbottom of the screen.
    pub fn center(&mut self, settings: &Settings) {
        self.x = (settings.screen_width - self.width) / 2.0;
        self.y = settings.screen_height - self.height;
    }

    pub fn update(&mut self, settings: &Settings) {
        if self.moving_right && self.rect().right() < settings.screen_width {
            self.x += settings.ship_speed;
        }
        if self.moving_left && self.x > 0.0 {
            self.x -= settings.ship_speed;
        }
        self.x = self.x.clamp(0.0, (settings.screen_width - self.width).max(0.0));
    }
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    /// Spawned at the ship's midtop.
    pub fn new(settings: &Settings, ship: &Ship) -> Self {
        let rect = ship.rect();
        Self::at(settings, rect.center_x() - settings.bullet_width / 2.0, rect.top())
    }

    pub fn at(settings: &Settings, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: settings.bullet_width,
            height: settings.bullet_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn update(&mut self, settings: &Settings) {
        self.y -= settings.bullet_speed;
    }

    /// Everything the bullet covered during its last move, so a fast bullet
    /// cannot step over an alien between two ticks.
    pub fn swept_rect(&self, settings: &Settings) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height + settings.bullet_speed)
    }

    /// Trailing edge has passed the top of the screen.
    pub fn is_spent(&self) -> bool {
        self.rect().bottom() <= 0.0
    }
}

#[derive(Clone, Debug)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Alien {
    pub fn new(settings: &Settings, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: settings.alien_width,
            height: settings.alien_height,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn check_edges(&self, settings: &Settings) -> bool {
        let rect = self.rect();
        rect.right() >= settings.screen_width || rect.left() <= 0.0
    }

    pub fn update(&mut self, settings: &Settings) {
        self.x += settings.alien_speed * settings.fleet_direction;
    }
}
