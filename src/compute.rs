//! The game loop body: one deterministic simulation tick.
//!
//! `Game::tick` runs input → ship → formation → lasers → loss check. The caller
//! renders afterwards and reports it through `Game::frame_rendered`, which is
//! what arms the formation's boundary and loss checks.

use std::time::Duration;

use crate::config::Config;
use crate::entities::{GameStatus, Key};
use crate::error::GameError;
use crate::fleet::AlienFleet;
use crate::geometry::Playfield;
use crate::session::SessionState;
use crate::ship::Player;

#[derive(Clone, Debug)]
pub struct Game {
    config: Config,
    playfield: Playfield,
    session: SessionState,
    player: Player,
    fleet: AlienFleet,
    /// Freshly populated fleet, cloned on reset.
    initial_fleet: AlienFleet,
    ticks: u64,
}

impl Game {
    pub fn new(config: Config) -> Result<Self, GameError> {
        Self::with_playfield(config, Playfield::default())
    }

    pub fn with_playfield(config: Config, playfield: Playfield) -> Result<Self, GameError> {
        config.validate()?;
        playfield.validate()?;
        let fleet = AlienFleet::new(config.difficulty, &playfield)?;
        log::info!(
            "new session: difficulty {}, {} aliens",
            config.difficulty,
            fleet.len()
        );
        Ok(Self {
            player: Player::new(&playfield),
            session: SessionState::new(),
            initial_fleet: fleet.clone(),
            fleet,
            config,
            playfield,
            ticks: 0,
        })
    }

    /// Start over with a fresh session, player and fleet on the same playfield.
    pub fn reset(&mut self) {
        self.fleet = self.initial_fleet.clone();
        self.session = SessionState::new();
        self.player = Player::new(&self.playfield);
        self.ticks = 0;
        log::info!("session reset");
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn press(&mut self, key: Key) {
        self.session.press(key);
    }

    pub fn release(&mut self, key: Key) {
        self.session.release(key);
    }

    // ── Simulation ───────────────────────────────────────────────────────────

    /// Advance one tick. `now` is a monotonic timestamp used only for the
    /// firing cooldown. Ticking an ended session changes nothing.
    pub fn tick(&mut self, now: Duration) -> GameStatus {
        if self.session.ended {
            return GameStatus::GameOver;
        }
        self.ticks += 1;

        self.player.update(&mut self.session, &self.playfield, now);
        self.fleet.update(&mut self.session, &self.playfield);
        let expired = self.player.spaceship.advance_lasers();

        log::trace!(
            "tick {}: formation {:?}, {} lasers ({} expired)",
            self.ticks,
            self.session.formation,
            self.player.spaceship.lasers.len(),
            expired
        );

        self.status()
    }

    /// Called by the shell after a frame has been drawn.
    pub fn frame_rendered(&mut self) {
        self.session.initialized = true;
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn status(&self) -> GameStatus {
        if self.session.ended {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn fleet(&self) -> &AlienFleet {
        &self.fleet
    }

    /// Ticks simulated since the session started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
