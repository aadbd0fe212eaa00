//! Space Invaders simulation core.
//!
//! - `geometry`: playfield, rectangles and boundary predicates
//! - `entities`: plain game data (aliens, lasers, ship, formation state)
//! - `session`: per-session mutable state (held keys, fire cooldown, flags)
//! - `ship` / `fleet`: player ship and alien formation behaviour
//! - `compute`: one simulation tick over the whole game
//! - `display`: rendering onto an abstract surface (crossterm backend)
//! - `config`: options recognised by `Game::new`

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod fleet;
pub mod geometry;
pub mod session;
pub mod ship;

pub use compute::Game;
pub use config::Config;
pub use error::{ConfigError, GameError};

/// Design constants, in playfield pixels.
pub mod consts {
    use std::time::Duration;

    pub const WIDTH: f32 = 630.0;
    pub const HEIGHT: f32 = 508.0;

    pub const SPACESHIP_WIDTH: f32 = 41.0;
    pub const SPACESHIP_HEIGHT: f32 = 22.0;
    /// Horizontal distance covered per tick while a direction key is held.
    pub const SHIP_STEP: f32 = 5.0;

    pub const LASER_WIDTH: f32 = 1.0;
    pub const LASER_HEIGHT: f32 = 8.0;
    /// Upward distance per tick.
    pub const LASER_SPEED: f32 = 5.0;
    /// Lasers a ship may have in flight at once.
    pub const MAX_LASERS: usize = 10;
    pub const FIRE_COOLDOWN: Duration = Duration::from_millis(100);

    pub const ALIEN_WIDTH: f32 = 33.0;
    pub const ALIEN_HEIGHT: f32 = 23.0;
    pub const ALIENS_PER_ROW: usize = 11;
    /// Per-tick displacement for difficulty 1; scales linearly.
    pub const ALIEN_BASE_SPEED: f32 = 0.5;

    pub const DEFAULT_DIFFICULTY: u32 = 3;
    /// Difficulty used when the startup prompt gets something unusable.
    pub const EXTRA_HARD_DIFFICULTY: u32 = 10;
}
