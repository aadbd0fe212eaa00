//! All game entity types — plain data, behaviour lives in `ship`, `fleet`
//! and `compute`.

use std::collections::VecDeque;

use crate::consts::{
    ALIEN_HEIGHT, ALIEN_WIDTH, LASER_HEIGHT, LASER_WIDTH, SPACESHIP_HEIGHT, SPACESHIP_WIDTH,
};
use crate::geometry::Bounded;

/// Visual handle for actors drawn as an image rather than a filled rect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Alien,
    Spaceship,
}

/// Keys the simulation understands. The shell maps raw key codes onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Formation direction ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn opposite(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Direction state of the whole alien formation.
///
/// Exactly one lateral direction is active while advancing; both are
/// suppressed while descending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormationState {
    Advancing(Heading),
    Descending {
        /// Sentinel y recorded when the descent began.
        baseline: f32,
        /// Lateral direction restored once the descent completes.
        next: Heading,
    },
}

impl Default for FormationState {
    fn default() -> Self {
        FormationState::Advancing(Heading::Right)
    }
}

impl FormationState {
    pub fn moving_left(&self) -> bool {
        matches!(self, FormationState::Advancing(Heading::Left))
    }

    pub fn moving_right(&self) -> bool {
        matches!(self, FormationState::Advancing(Heading::Right))
    }

    pub fn descending(&self) -> bool {
        matches!(self, FormationState::Descending { .. })
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
}

impl Alien {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::Alien
    }
}

impl Bounded for Alien {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (ALIEN_WIDTH, ALIEN_HEIGHT)
    }
}

/// A projectile travelling straight up.
#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub x: f32,
    pub y: f32,
}

impl Laser {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// True once the laser has fully left the top of the playfield.
    pub fn is_expired(&self) -> bool {
        self.y <= -LASER_HEIGHT
    }
}

impl Bounded for Laser {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (LASER_WIDTH, LASER_HEIGHT)
    }
}

/// The player's ship and the lasers it owns, oldest first.
#[derive(Clone, Debug, PartialEq)]
pub struct Spaceship {
    pub x: f32,
    pub y: f32,
    pub lasers: VecDeque<Laser>,
}

impl Spaceship {
    pub fn sprite(&self) -> Sprite {
        Sprite::Spaceship
    }
}

impl Bounded for Spaceship {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (SPACESHIP_WIDTH, SPACESHIP_HEIGHT)
    }
}
