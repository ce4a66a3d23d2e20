use std::time::Instant;

use anyhow::{bail, Result};

use crate::button::Button;
use crate::entities::{Alien, Bullet, Ship};
use crate::fleet;
use crate::frontend::{Align, Frontend, InputEvent, Key, Sprite};
use crate::scoreboard::Scoreboard;
use crate::settings::Settings;
use crate::stats::GameStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Before the first game and after game over; the Play button is up.
    Inactive,
    Active,
    /// Paused by the player.
    Paused,
    /// Short freeze after losing a ship. Input is still read, but nothing
    /// moves and the ship cannot fire until `resume_at`.
    Respawning { resume_at: Instant },
}

/// What the frame loop should do after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// All mutable game state, advanced one frame at a time by [`crate::app::App`].
pub struct Game {
    pub settings: Settings,
    pub stats: GameStats,
    pub scoreboard: Scoreboard,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub play_button: Button,
    phase: Phase,
    pointer_visible: bool,
}

impl Game {
    /// Fails when the screen cannot hold a single alien.
    pub fn new(settings: Settings, stats: GameStats) -> Result<Self> {
        let (columns, rows) = fleet::dimensions(&settings);
        if columns == 0 || rows == 0 {
            bail!(
                "screen {}x{} is too small for the alien fleet",
                settings.screen_width,
                settings.screen_height
            );
        }

        let scoreboard = Scoreboard::new(&settings, &stats);
        let ship = Ship::new(&settings);
        let aliens = fleet::create(&settings);
        let play_button = Button::new(&settings, "Play");

        Ok(Self {
            settings,
            stats,
            scoreboard,
            ship,
            bullets: Vec::new(),
            aliens,
            play_button,
            phase: Phase::Inactive,
            pointer_visible: true,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != Phase::Inactive
    }

    pub fn pointer_visible(&self) -> bool {
        self.pointer_visible
    }

    // ── Input ──────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Quit) => return Control::Quit,
            InputEvent::KeyDown(Key::Right) => self.ship.moving_right = true,
            InputEvent::KeyDown(Key::Left) => self.ship.moving_left = true,
            InputEvent::KeyDown(Key::Fire) => {
                if self.phase == Phase::Active {
                    self.fire_bullet();
                }
            }
            InputEvent::KeyDown(Key::Play) => match self.phase {
                Phase::Inactive => self.start_game(),
                Phase::Active => self.phase = Phase::Paused,
                Phase::Paused => self.phase = Phase::Active,
                Phase::Respawning { .. } => {}
            },
            InputEvent::KeyUp(Key::Right) => self.ship.moving_right = false,
            InputEvent::KeyUp(Key::Left) => self.ship.moving_left = false,
            InputEvent::KeyUp(_) => {}
            InputEvent::Click { x, y } => {
                if self.phase == Phase::Inactive && self.play_button.contains(x, y) {
                    self.start_game();
                }
            }
        }
        Control::Continue
    }

    pub fn start_game(&mut self) {
        self.stats.reset_stats();
        self.settings.initialize_dynamic_settings();
        self.scoreboard.prep_score(&self.stats);
        self.scoreboard.prep_level(&self.stats);
        self.scoreboard.prep_ships(&self.stats);

        self.aliens.clear();
        self.bullets.clear();
        self.aliens = fleet::create(&self.settings);
        self.ship.center(&self.settings);

        self.phase = Phase::Active;
        self.pointer_visible = false;
        tracing::info!(high_score = self.stats.high_score, "game started");
    }

    /// No-op at the in-flight cap.
    pub fn fire_bullet(&mut self) {
        if self.bullets.len() < self.settings.bullets_allowed {
            self.bullets.push(Bullet::new(&self.settings, &self.ship));
        }
    }

    // ── Update ─────────────────────────────────────────────────────────

    pub fn update(&mut self, now: Instant) {
        match self.phase {
            Phase::Active => {}
            Phase::Respawning { resume_at } if now >= resume_at => {
                self.phase = Phase::Active;
            }
            _ => return,
        }

        self.ship.update(&self.settings);
        self.update_bullets();
        self.update_aliens();
        self.check_bullet_alien_collisions();
        self.bullets.retain(|b| !b.is_spent());
        self.check_ship_collisions(now);
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.update(&self.settings);
        }
    }

    fn update_aliens(&mut self) {
        if self.aliens.iter().any(|a| a.check_edges(&self.settings)) {
            self.change_fleet_direction();
        }
        for alien in &mut self.aliens {
            alien.update(&self.settings);
        }
    }

    fn change_fleet_direction(&mut self) {
        for alien in &mut self.aliens {
            alien.y += self.settings.fleet_drop_speed;
        }
        self.settings.fleet_direction = -self.settings.fleet_direction;
    }

    // ── Collisions ─────────────────────────────────────────────────────

    /// Every hit in the frame is scored before the emptied-fleet check, so
    /// the last aliens of a wave pay out at the old point value.
    pub fn check_bullet_alien_collisions(&mut self) {
        let mut bullets_remove = Vec::new();
        let mut killed = 0u32;
        for (bi, bullet) in self.bullets.iter().enumerate() {
            let rect = bullet.swept_rect(&self.settings);
            let mut hit = false;
            for alien in &mut self.aliens {
                if alien.alive && alien.rect().intersects(&rect) {
                    alien.alive = false;
                    killed += 1;
                    hit = true;
                }
            }
            if hit {
                bullets_remove.push(bi);
            }
        }
        if killed == 0 {
            return;
        }

        for &i in bullets_remove.iter().rev() {
            self.bullets.remove(i);
        }
        self.aliens.retain(|a| a.alive);

        self.stats.score += self.settings.alien_points * killed;
        self.scoreboard.prep_score(&self.stats);
        self.scoreboard.check_high_score(&mut self.stats);

        if self.aliens.is_empty() {
            self.start_new_wave();
        }
    }

    fn start_new_wave(&mut self) {
        self.bullets.clear();
        self.aliens = fleet::create(&self.settings);
        self.settings.increase_speed();
        self.stats.level += 1;
        self.scoreboard.prep_level(&self.stats);
        tracing::info!(level = self.stats.level, score = self.stats.score, "wave cleared");
    }

    fn check_ship_collisions(&mut self, now: Instant) {
        let ship = self.ship.rect();
        let screen_bottom = self.settings.screen_height;
        let rammed = self.aliens.iter().any(|a| a.rect().intersects(&ship));
        let landed = self.aliens.iter().any(|a| a.rect().bottom() >= screen_bottom);
        if rammed || landed {
            self.ship_hit(now);
        }
    }

    fn ship_hit(&mut self, now: Instant) {
        self.stats.ships_left = self.stats.ships_left.saturating_sub(1);
        self.scoreboard.prep_ships(&self.stats);

        if self.stats.ships_left == 0 {
            self.phase = Phase::Inactive;
            self.pointer_visible = true;
            tracing::info!(
                score = self.stats.score,
                level = self.stats.level,
                "game over"
            );
            return;
        }

        self.aliens.clear();
        self.bullets.clear();
        self.aliens = fleet::create(&self.settings);
        self.ship.center(&self.settings);
        self.phase = Phase::Respawning {
            resume_at: now + self.settings.respawn_delay,
        };
        tracing::info!(ships_left = self.stats.ships_left, "ship hit");
    }

    // ── Render ─────────────────────────────────────────────────────────

    pub fn render(&self, frontend: &mut dyn Frontend) {
        frontend.clear();
        frontend.draw(self.ship.rect(), Sprite::Ship);
        for bullet in &self.bullets {
            frontend.draw(bullet.rect(), Sprite::Bullet);
        }
        for alien in &self.aliens {
            frontend.draw(alien.rect(), Sprite::Alien);
        }
        self.scoreboard.show(frontend);

        let mid_x = self.settings.screen_width / 2.0;
        let mid_y = (self.settings.screen_height / 2.0).floor();
        match self.phase {
            Phase::Inactive => self.play_button.draw(frontend),
            Phase::Paused => frontend.draw_text(mid_x, mid_y, "PAUSED - P to resume", Align::Center),
            Phase::Respawning { .. } => frontend.draw_text(mid_x, mid_y, "GET READY", Align::Center),
            Phase::Active => {}
        }
    }
}
