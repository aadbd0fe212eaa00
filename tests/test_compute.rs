use std::time::Duration;

use space_invaders::consts::*;
use space_invaders::entities::{GameStatus, Key};
use space_invaders::error::{ConfigError, GameError};
use space_invaders::geometry::Playfield;
use space_invaders::{Config, Game};

fn game(difficulty: u32) -> Game {
    Game::new(Config { difficulty, debug: false }).unwrap()
}

fn at(tick: u64) -> Duration {
    Duration::from_millis(tick * 16)
}

/// Tick + render until the session ends, returning the final tick count.
fn play_to_the_end(g: &mut Game, limit: u64) -> u64 {
    for t in 0..limit {
        if g.tick(at(t)) == GameStatus::GameOver {
            return g.ticks();
        }
        g.frame_rendered();
    }
    panic!("game did not end within {limit} ticks");
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn new_game_layout() {
    let g = game(1);
    assert_eq!(g.fleet().len(), ALIENS_PER_ROW);
    assert_eq!(g.status(), GameStatus::Playing);
    assert_eq!(g.ticks(), 0);
    assert!(!g.session().initialized);
    assert!(g.player().spaceship.lasers.is_empty());
}

#[test]
fn zero_difficulty_fails_fast() {
    let err = Game::new(Config { difficulty: 0, debug: false }).unwrap_err();
    assert!(matches!(err, GameError::Config(ConfigError::InvalidDifficulty(0))));
}

#[test]
fn huge_difficulty_is_an_error_not_an_abort() {
    let err = Game::new(Config { difficulty: u32::MAX, debug: false }).unwrap_err();
    assert!(matches!(err, GameError::FleetOverflow { .. }));
}

#[test]
fn playfield_narrower_than_ship_rejected() {
    let field = Playfield::new(SPACESHIP_WIDTH - 1.0, 300.0);
    let err = Game::with_playfield(Config { difficulty: 1, debug: false }, field).unwrap_err();
    assert!(matches!(err, GameError::InvalidPlayfield { .. }));
}

#[test]
fn playfield_exactly_ship_wide_is_playable() {
    let field = Playfield::new(SPACESHIP_WIDTH, 300.0);
    let mut g = Game::with_playfield(Config { difficulty: 1, debug: false }, field).unwrap();
    g.press(Key::Left);
    g.tick(at(0));
    assert_eq!(g.player().spaceship.x, 0.0);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn first_tick_moves_but_does_not_arm_checks() {
    let mut g = game(1);
    let x0 = g.fleet().bottom_right().x;
    g.tick(at(0));
    assert_eq!(g.fleet().bottom_right().x, x0 + 0.5);
    assert!(!g.session().initialized);
    g.frame_rendered();
    assert!(g.session().initialized);
}

#[test]
fn tick_runs_player_then_lasers() {
    let mut g = game(1);
    g.press(Key::Fire);
    g.tick(at(0));
    // Fired and advanced in the same tick.
    let ship = &g.player().spaceship;
    assert_eq!(ship.lasers.len(), 1);
    assert_eq!(ship.lasers[0].y, ship.y - LASER_HEIGHT - LASER_SPEED);
}

#[test]
fn released_key_stops_moving() {
    let mut g = game(1);
    let x0 = g.player().spaceship.x;
    g.press(Key::Right);
    g.tick(at(0));
    g.tick(at(1));
    g.release(Key::Right);
    g.tick(at(2));
    assert_eq!(g.player().spaceship.x, x0 + 2.0 * SHIP_STEP);
}

// ── end to end ────────────────────────────────────────────────────────────────

#[test]
fn difficulty_one_runs_to_a_deterministic_loss() {
    let mut g = game(1);
    assert_eq!(g.fleet().len(), 11);

    let mut flipped_at = None;
    for t in 0..1_000 {
        g.tick(at(t));
        g.frame_rendered();
        if g.session().formation.descending() {
            flipped_at = Some(g.ticks());
            break;
        }
    }
    let flipped_at = flipped_at.expect("formation never reached the right wall");
    let br = g.fleet().bottom_right();
    assert!(br.x + ALIEN_WIDTH >= WIDTH);
    assert!(br.x + ALIEN_WIDTH < WIDTH + g.fleet().speed());
    assert!(!g.session().formation.moving_right());
    assert_eq!(flipped_at, 370);

    let first = play_to_the_end(&mut g, 100_000);
    assert_eq!(g.status(), GameStatus::GameOver);

    let mut again = game(1);
    assert_eq!(play_to_the_end(&mut again, 100_000), first);
}

#[test]
fn ended_game_ignores_further_ticks() {
    let mut g = game(2);
    play_to_the_end(&mut g, 100_000);
    let ticks = g.ticks();
    let aliens = g.fleet().aliens().to_vec();
    g.press(Key::Left);
    assert_eq!(g.tick(at(1_000_000)), GameStatus::GameOver);
    assert_eq!(g.ticks(), ticks);
    assert_eq!(g.fleet().aliens(), &aliens[..]);
}

#[test]
fn higher_difficulty_loses_sooner() {
    let mut easy = game(1);
    let mut hard = game(4);
    assert!(play_to_the_end(&mut hard, 100_000) < play_to_the_end(&mut easy, 100_000));
}

#[test]
fn small_playfield_loses_quickly() {
    let field = Playfield::new(500.0, 100.0);
    let mut g = Game::with_playfield(Config { difficulty: 1, debug: false }, field).unwrap();
    let ticks = play_to_the_end(&mut g, 10_000);
    assert!(ticks < 1_000);
    assert!(field.is_at_bottom_threshold(g.fleet().bottom_right()));
}

// ── reset ─────────────────────────────────────────────────────────────────────

#[test]
fn reset_restores_fresh_session() {
    let mut g = game(1);
    let fresh_fleet = g.fleet().clone();
    let fresh_player = g.player().clone();
    play_to_the_end(&mut g, 100_000);

    g.reset();
    assert_eq!(g.status(), GameStatus::Playing);
    assert_eq!(g.ticks(), 0);
    assert_eq!(g.fleet(), &fresh_fleet);
    assert_eq!(g.player(), &fresh_player);
    assert!(!g.session().initialized);
    assert!(g.session().formation.moving_right());
}

#[test]
fn cooldown_does_not_survive_reset() {
    let mut g = game(1);
    g.press(Key::Fire);
    g.tick(Duration::from_secs(60));
    assert!(g.session().cooldown.ready_at().is_some());

    g.reset();
    assert_eq!(g.session().cooldown.ready_at(), None);
    assert!(!g.session().is_held(Key::Fire));

    // New session clock restarts at zero; the old deadline would have blocked this.
    g.press(Key::Fire);
    g.tick(Duration::ZERO);
    assert_eq!(g.player().spaceship.lasers.len(), 1);
}
