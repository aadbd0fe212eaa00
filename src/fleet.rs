//! The alien formation: grid layout and the direction state machine.
//!
//! Boundary contact is tested on two sentinels only, the bottom-left and
//! bottom-right aliens. The grid is laid out row-major with x increasing
//! along a row and y increasing by row, and aliens are never removed, so these
//! two corners always reach a side first.

use crate::consts::{ALIENS_PER_ROW, ALIEN_BASE_SPEED, ALIEN_HEIGHT, ALIEN_WIDTH};
use crate::entities::{Alien, FormationState, Heading};
use crate::error::GameError;
use crate::geometry::Playfield;
use crate::session::SessionState;

#[derive(Clone, Debug, PartialEq)]
pub struct AlienFleet {
    aliens: Vec<Alien>,
    difficulty: u32,
}

/// Deterministic grid: `difficulty` rows of `ALIENS_PER_ROW`, with gaps of a
/// quarter alien-width between columns and half an alien-height between rows.
pub fn populate(difficulty: u32) -> Vec<Alien> {
    let mut fleet = Vec::with_capacity(difficulty as usize * ALIENS_PER_ROW);
    for row in 0..difficulty {
        let y = row as f32 * (ALIEN_HEIGHT * 1.5);
        for col in 0..ALIENS_PER_ROW {
            let col = col as f32;
            let x = col * ALIEN_WIDTH + (ALIEN_WIDTH / 4.0) * col;
            fleet.push(Alien::new(x, y));
        }
    }
    fleet
}

/// Lower edge of the bottom row of a freshly populated grid.
pub fn bottom_edge(difficulty: u32) -> f32 {
    difficulty.saturating_sub(1) as f32 * (ALIEN_HEIGHT * 1.5) + ALIEN_HEIGHT
}

impl AlienFleet {
    /// Build the fleet for `difficulty`, rejecting a zero difficulty and a
    /// grid whose bottom row would already sit on the defense line.
    pub fn new(difficulty: u32, field: &Playfield) -> Result<Self, GameError> {
        if difficulty == 0 {
            return Err(GameError::InvalidDifficulty(difficulty));
        }
        // Checked before populating: the row count alone bounds the allocation.
        if bottom_edge(difficulty) >= field.defense_line() {
            return Err(GameError::FleetOverflow {
                rows: difficulty,
                defense_line: field.defense_line(),
            });
        }
        Ok(Self {
            aliens: populate(difficulty),
            difficulty,
        })
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Per-tick displacement along the active axis.
    pub fn speed(&self) -> f32 {
        ALIEN_BASE_SPEED * self.difficulty as f32
    }

    pub fn bottom_right(&self) -> &Alien {
        &self.aliens[self.aliens.len() - 1]
    }

    pub fn bottom_left(&self) -> &Alien {
        &self.aliens[self.aliens.len() - ALIENS_PER_ROW]
    }

    /// Whether the sentinel leading in `heading` touches its side wall.
    pub fn at_wall(&self, heading: Heading, field: &Playfield) -> bool {
        match heading {
            Heading::Right => field.is_at_right_boundary(self.bottom_right()),
            Heading::Left => field.is_at_left_boundary(self.bottom_left()),
        }
    }

    /// Advance the formation state machine by one step.
    pub fn update_direction_state(&self, session: &mut SessionState, field: &Playfield) {
        let sentinel_y = self.bottom_right().y;
        let next = match session.formation {
            FormationState::Advancing(heading) if self.at_wall(heading, field) => {
                FormationState::Descending {
                    baseline: sentinel_y,
                    next: heading.opposite(),
                }
            }
            FormationState::Descending { baseline, next }
                if sentinel_y - baseline >= ALIEN_HEIGHT =>
            {
                FormationState::Advancing(next)
            }
            unchanged => unchanged,
        };
        if next != session.formation {
            log::debug!("formation {:?} -> {:?}", session.formation, next);
            session.formation = next;
        }
    }

    /// True when the bottom row has reached the defense line.
    pub fn has_landed(&self, field: &Playfield) -> bool {
        field.is_at_bottom_threshold(self.bottom_right())
    }

    /// Move every alien one step along the active axis.
    pub fn advance(&mut self, formation: FormationState) {
        let step = self.speed();
        for alien in self.aliens.iter_mut() {
            match formation {
                FormationState::Advancing(Heading::Left) => alien.x -= step,
                FormationState::Advancing(Heading::Right) => alien.x += step,
                FormationState::Descending { .. } => alien.y += step,
            }
        }
    }

    /// One tick: direction transition and loss check (both only once the
    /// first frame has rendered), then movement unless the session ended.
    pub fn update(&mut self, session: &mut SessionState, field: &Playfield) {
        if session.ended {
            return;
        }
        if session.initialized {
            self.update_direction_state(session, field);
            if self.has_landed(field) {
                log::info!("formation reached the defense line at y={}", self.bottom_right().y);
                session.ended = true;
                return;
            }
        }
        self.advance(session.formation);
    }
}
