mod common;

use std::time::{Duration, Instant};

use alien_invasion::entities::Bullet;
use alien_invasion::frontend::{InputEvent, Key};
use alien_invasion::game::Phase;

use common::{small_game, started_game};

fn fire(game: &mut alien_invasion::game::Game) {
    game.handle_event(InputEvent::KeyDown(Key::Fire));
}

#[test]
fn firing_at_the_cap_is_a_no_op() {
    let mut game = started_game();
    let cap = game.settings.bullets_allowed;
    for _ in 0..cap + 4 {
        fire(&mut game);
    }
    assert_eq!(game.bullets.len(), cap);
    fire(&mut game);
    assert_eq!(game.bullets.len(), cap);
}

#[test]
fn bullets_never_exceed_cap_across_frames() {
    let mut game = started_game();
    // Keep the line of fire clear of the fleet.
    game.ship.x = 0.0;
    let cap = game.settings.bullets_allowed;
    let now = Instant::now();
    for _ in 0..60 {
        fire(&mut game);
        game.update(now);
        assert!(game.bullets.len() <= cap);
    }
}

#[test]
fn bullets_past_the_top_are_removed_monotonically() {
    let mut game = started_game();
    game.ship.x = 0.0;
    fire(&mut game);
    fire(&mut game);
    assert_eq!(game.bullets.len(), 2);

    let now = Instant::now();
    let mut last = game.bullets.len();
    for _ in 0..40 {
        game.update(now);
        assert!(game.bullets.len() <= last);
        assert!(game.bullets.iter().all(|b| b.rect().bottom() > 0.0));
        last = game.bullets.len();
    }
    assert!(game.bullets.is_empty());
    assert_eq!(game.aliens.len(), 15);
}

#[test]
fn clearing_a_five_by_three_wave_one_hit_per_frame() {
    let mut game = started_game();
    let points = game.settings.alien_points;
    let alien_speed = game.settings.alien_speed;
    assert_eq!(game.aliens.len(), 15);

    let now = Instant::now();
    for hit in 1..=15u32 {
        let target = game.aliens[0].clone();
        let bullet = Bullet::at(&game.settings, target.x + 1.0, target.y + 0.25);
        game.bullets.push(bullet);
        game.update(now);

        if hit < 15 {
            assert_eq!(game.aliens.len(), 15 - hit as usize);
            assert_eq!(game.stats.level, 1);
        }
        assert_eq!(game.stats.score, hit * points);
        assert!(game.bullets.is_empty());
    }

    assert_eq!(game.aliens.len(), 15);
    assert_eq!(game.stats.level, 2);
    assert_eq!(game.stats.score, 15 * game.settings.base_alien_points);
    assert!(game.settings.alien_speed > alien_speed);
    assert_eq!(game.settings.alien_points, points + game.settings.points_increment);
    assert_eq!(game.scoreboard.level_text, "Level 2");
    assert_eq!(game.stats.high_score, game.stats.score);
}

#[test]
fn last_aliens_in_one_frame_score_before_level_up() {
    let mut game = started_game();
    game.aliens.truncate(2);
    let targets = game.aliens.clone();
    for alien in &targets {
        game.bullets.push(Bullet::at(&game.settings, alien.x + 1.0, alien.y + 0.25));
    }
    game.update(Instant::now());

    assert_eq!(game.stats.score, 2 * game.settings.base_alien_points);
    assert_eq!(game.stats.level, 2);
    assert_eq!(game.aliens.len(), 15);
    assert!(game.bullets.is_empty());
}

#[test]
fn last_ship_hit_ends_the_game() {
    let mut game = started_game();
    game.stats.ships_left = 1;
    let ship = game.ship.rect();
    game.aliens[0].x = ship.x;
    game.aliens[0].y = ship.y;

    let now = Instant::now();
    game.update(now);
    assert_eq!(game.stats.ships_left, 0);
    assert_eq!(game.phase(), Phase::Inactive);
    assert!(!game.is_active());
    assert!(game.pointer_visible());
    assert!(game.scoreboard.ships.is_empty());

    game.ship.moving_right = true;
    let x = game.ship.x;
    for i in 1..10 {
        game.update(now + Duration::from_secs(i));
    }
    assert_eq!(game.ship.x, x);
    assert_eq!(game.stats.ships_left, 0);
}

#[test]
fn ship_hit_with_lives_left_pauses_then_resumes() {
    let mut game = started_game();
    let ship = game.ship.rect();
    game.aliens[3].x = ship.x + 1.0;
    game.aliens[3].y = ship.y;
    // A stray bullet well clear of the fleet.
    game.bullets.push(Bullet::at(&game.settings, 33.0, 5.0));

    let t0 = Instant::now();
    game.update(t0);
    assert_eq!(game.stats.ships_left, 2);
    assert!(matches!(game.phase(), Phase::Respawning { .. }));
    assert!(game.is_active());
    assert!(game.bullets.is_empty());
    assert_eq!(game.aliens.len(), 15);
    assert_eq!(game.ship.rect().center_x(), game.settings.screen_width / 2.0);
    assert_eq!(game.scoreboard.ships.len(), 2);

    let frozen: Vec<f32> = game.aliens.iter().map(|a| a.x).collect();
    game.update(t0 + Duration::from_millis(500));
    fire(&mut game);
    assert!(game.bullets.is_empty());
    assert_eq!(frozen, game.aliens.iter().map(|a| a.x).collect::<Vec<_>>());

    game.update(t0 + game.settings.respawn_delay);
    assert_eq!(game.phase(), Phase::Active);
    assert!(game.aliens[0].x > frozen[0]);
}

#[test]
fn alien_reaching_the_bottom_costs_a_ship() {
    let mut game = started_game();
    let height = game.settings.screen_height;
    game.aliens[0].x = 0.0;
    game.aliens[0].y = height - game.settings.alien_height;
    assert!(!game.aliens[0].rect().intersects(&game.ship.rect()));

    game.update(Instant::now());
    assert_eq!(game.stats.ships_left, game.settings.ship_limit - 1);
    assert!(game.aliens.iter().all(|a| a.rect().bottom() < height));
}

#[test]
fn ships_left_never_goes_negative() {
    let mut game = started_game();
    let mut t = Instant::now();
    let mut hits = 0;
    while game.is_active() {
        let ship = game.ship.rect();
        game.aliens[0].x = ship.x;
        game.aliens[0].y = ship.y;
        t += game.settings.respawn_delay;
        let before = game.stats.ships_left;
        game.update(t);
        assert_eq!(game.stats.ships_left, before - 1);
        hits += 1;
    }
    assert_eq!(hits, game.settings.ship_limit);
    assert_eq!(game.stats.ships_left, 0);
}

#[test]
fn click_on_play_button_starts_only_when_inactive() {
    let mut game = small_game();
    game.handle_event(InputEvent::Click { x: 1.0, y: 1.0 });
    assert_eq!(game.phase(), Phase::Inactive);

    let button = game.play_button.rect;
    game.handle_event(InputEvent::Click {
        x: button.center_x(),
        y: button.center_y(),
    });
    assert_eq!(game.phase(), Phase::Active);
    assert!(!game.pointer_visible());

    game.stats.score = 300;
    game.handle_event(InputEvent::Click {
        x: button.center_x(),
        y: button.center_y(),
    });
    assert_eq!(game.stats.score, 300);
}

#[test]
fn new_game_resets_stats_and_difficulty_but_not_high_score() {
    let mut game = started_game();
    game.aliens.truncate(1);
    let target = game.aliens[0].clone();
    game.bullets
        .push(Bullet::at(&game.settings, target.x + 1.0, target.y + 0.25));
    game.update(Instant::now());
    assert_eq!(game.stats.level, 2);
    let high = game.stats.high_score;
    assert!(high > 0);

    game.stats.ships_left = 1;
    let ship = game.ship.rect();
    game.aliens[0].x = ship.x;
    game.aliens[0].y = ship.y;
    game.update(Instant::now());
    assert_eq!(game.phase(), Phase::Inactive);

    game.handle_event(InputEvent::KeyDown(Key::Play));
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.stats.score, 0);
    assert_eq!(game.stats.level, 1);
    assert_eq!(game.stats.ships_left, game.settings.ship_limit);
    assert_eq!(game.stats.high_score, high);
    assert_eq!(game.settings.alien_speed, game.settings.base_alien_speed);
    assert_eq!(game.scoreboard.score_text, "0");
    assert_eq!(game.aliens.len(), 15);
}

#[test]
fn movement_intent_follows_key_down_and_up() {
    let mut game = started_game();
    let start = game.ship.x;
    game.handle_event(InputEvent::KeyDown(Key::Left));
    game.update(Instant::now());
    assert!(game.ship.x < start);

    game.handle_event(InputEvent::KeyUp(Key::Left));
    let stopped = game.ship.x;
    game.update(Instant::now());
    assert_eq!(game.ship.x, stopped);
}

#[test]
fn fast_bullets_still_hit_after_many_wave_clears() {
    for ramps in 0..30 {
        let mut game = started_game();
        for _ in 0..ramps {
            game.settings.increase_speed();
        }
        game.settings.alien_speed = 0.0;
        let ship = game.ship.rect();
        game.aliens.truncate(1);
        game.aliens[0].x = ship.center_x() - game.settings.alien_width / 2.0;
        game.aliens[0].y = 2.0;
        let points = game.settings.alien_points;

        fire(&mut game);
        let now = Instant::now();
        for _ in 0..40 {
            game.update(now);
            if game.stats.level > 1 {
                break;
            }
        }
        assert_eq!(
            game.stats.score, points,
            "bullet at speed {} missed after {ramps} ramps",
            game.settings.bullet_speed
        );
        assert_eq!(game.stats.level, 2);
    }
}

#[test]
fn fast_bullet_hits_alien_just_below_the_top() {
    let mut game = started_game();
    game.settings.bullet_speed = 6.0;
    game.settings.alien_speed = 0.0;
    game.aliens.truncate(2);
    game.aliens[0].y = 0.0;
    let target = game.aliens[0].clone();
    // Next move carries the bullet wholly above the screen.
    game.bullets.push(Bullet::at(&game.settings, target.x + 1.0, 1.5));

    game.update(Instant::now());
    assert_eq!(game.aliens.len(), 1);
    assert!(game.bullets.is_empty());
    assert_eq!(game.stats.score, game.settings.alien_points);
}

#[test]
fn fast_fleet_flips_and_drops_once_per_edge_contact() {
    let mut game = started_game();
    game.settings.alien_speed = 5.0;
    let shift = game.settings.screen_width - game.aliens[4].rect().right();
    for alien in &mut game.aliens {
        alien.x += shift;
    }
    let y = game.aliens[0].y;
    let drop = game.settings.fleet_drop_speed;

    game.update(Instant::now());
    assert_eq!(game.settings.fleet_direction, -1.0);
    assert_eq!(game.aliens[0].y, y + drop);

    // Pulled clear of the edge in one step: no second flip or drop.
    game.update(Instant::now());
    assert_eq!(game.settings.fleet_direction, -1.0);
    assert_eq!(game.aliens[0].y, y + drop);
    assert!(game.aliens[4].rect().right() < game.settings.screen_width);
}
