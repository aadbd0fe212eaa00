//! Mutable state of one play session, owned by the game and handed to each
//! subsystem per tick.

use std::collections::HashMap;
use std::time::Duration;

use crate::consts::FIRE_COOLDOWN;
use crate::entities::{FormationState, Key};

/// Firing cooldown as a monotonic deadline.
///
/// `now` is whatever clock the caller ticks with (time since session start in
/// the binary, a synthetic clock in tests).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FireCooldown {
    ready_at: Option<Duration>,
}

impl FireCooldown {
    pub fn is_cooling(&self, now: Duration) -> bool {
        self.ready_at.is_some_and(|t| now < t)
    }

    pub fn arm(&mut self, now: Duration) {
        self.ready_at = Some(now + FIRE_COOLDOWN);
    }

    pub fn ready_at(&self) -> Option<Duration> {
        self.ready_at
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Held key → press order. Lower numbers were pressed earlier.
    keys: HashMap<Key, u64>,
    next_press: u64,
    pub cooldown: FireCooldown,
    pub formation: FormationState,
    /// Set once the first frame has been rendered.
    pub initialized: bool,
    /// Set when the formation reaches the defense line. Terminal.
    pub ended: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Repeats of an already held key keep their order.
    pub fn press(&mut self, key: Key) {
        if !self.keys.contains_key(&key) {
            self.keys.insert(key, self.next_press);
            self.next_press += 1;
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains_key(&key)
    }

    /// Horizontal direction to apply this tick. When both Left and Right are
    /// held the later press wins.
    pub fn steering(&self) -> Option<Key> {
        match (self.keys.get(&Key::Left), self.keys.get(&Key::Right)) {
            (Some(l), Some(r)) => Some(if l > r { Key::Left } else { Key::Right }),
            (Some(_), None) => Some(Key::Left),
            (None, Some(_)) => Some(Key::Right),
            (None, None) => None,
        }
    }
}
