//! Player ship movement, firing and laser lifecycle.

use std::collections::VecDeque;
use std::time::Duration;

use crate::consts::{
    LASER_HEIGHT, LASER_SPEED, MAX_LASERS, SHIP_STEP, SPACESHIP_HEIGHT, SPACESHIP_WIDTH,
};
use crate::entities::{Key, Laser, Spaceship};
use crate::geometry::Playfield;
use crate::session::{FireCooldown, SessionState};

impl Spaceship {
    /// A ship horizontally centred and resting on the bottom edge.
    pub fn new(field: &Playfield) -> Self {
        Self {
            x: field.width() / 2.0 - SPACESHIP_WIDTH / 2.0,
            y: field.height() - SPACESHIP_HEIGHT,
            lasers: VecDeque::with_capacity(MAX_LASERS),
        }
    }

    /// Shift horizontally, clamped to `[0, width - SPACESHIP_WIDTH]`.
    pub fn move_by(&mut self, dx: f32, field: &Playfield) {
        self.x = (self.x + dx).clamp(0.0, field.width() - SPACESHIP_WIDTH);
    }

    /// Where the next laser would spawn.
    pub fn muzzle(&self) -> (f32, f32) {
        (self.x + SPACESHIP_WIDTH / 2.0, self.y - LASER_HEIGHT)
    }

    pub fn can_shoot(&self, cooldown: &FireCooldown, now: Duration) -> bool {
        self.lasers.len() < MAX_LASERS && !cooldown.is_cooling(now)
    }

    /// Fire a laser unless the queue is full or the cooldown is running.
    /// Returns whether a laser was fired.
    pub fn shoot(&mut self, cooldown: &mut FireCooldown, now: Duration) -> bool {
        if !self.can_shoot(cooldown, now) {
            return false;
        }
        let (x, y) = self.muzzle();
        self.lasers.push_back(Laser::new(x, y));
        cooldown.arm(now);
        log::debug!("laser fired at ({x}, {y}), {} in flight", self.lasers.len());
        true
    }

    /// Move every laser up one step and drop the ones that left the top,
    /// oldest first. Returns how many expired.
    pub fn advance_lasers(&mut self) -> usize {
        for laser in self.lasers.iter_mut() {
            laser.y -= LASER_SPEED;
        }
        let mut expired = 0;
        while self.lasers.front().is_some_and(Laser::is_expired) {
            self.lasers.pop_front();
            expired += 1;
        }
        expired
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Owns the ship and turns held keys into ship commands once per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub spaceship: Spaceship,
}

impl Player {
    pub fn new(field: &Playfield) -> Self {
        Self {
            spaceship: Spaceship::new(field),
        }
    }

    /// Apply this tick's input: at most one horizontal step (the most recently
    /// pressed of Left/Right), then a shot if Fire is held.
    pub fn update(&mut self, session: &mut SessionState, field: &Playfield, now: Duration) {
        match session.steering() {
            Some(Key::Left) => self.spaceship.move_by(-SHIP_STEP, field),
            Some(Key::Right) => self.spaceship.move_by(SHIP_STEP, field),
            _ => {}
        }

        if session.is_held(Key::Fire) {
            self.spaceship.shoot(&mut session.cooldown, now);
        }
    }
}
