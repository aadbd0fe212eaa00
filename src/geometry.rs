//! Collision primitives: rectangles, the playfield and its edges.
//!
//! Everything here is a pure function of positions and playfield constants.

use crate::consts::{HEIGHT, SPACESHIP_HEIGHT, SPACESHIP_WIDTH, WIDTH};
use crate::error::GameError;

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict intersection: touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Anything with a position and a fixed size.
pub trait Bounded {
    fn position(&self) -> (f32, f32);
    fn size(&self) -> (f32, f32);

    fn bounds(&self) -> Rect {
        let (x, y) = self.position();
        let (width, height) = self.size();
        Rect::new(x, y, width, height)
    }
}

impl Bounded for Rect {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

pub fn overlaps(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// The fixed-size arena. Immutable for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    width: f32,
    height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

impl Playfield {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The ship must fit: its movement clamp needs `width >= SPACESHIP_WIDTH`.
    pub fn validate(&self) -> Result<(), GameError> {
        let fits = self.width.is_finite()
            && self.height.is_finite()
            && self.width >= SPACESHIP_WIDTH
            && self.height >= SPACESHIP_HEIGHT;
        if !fits {
            return Err(GameError::InvalidPlayfield {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// One-pixel-thick strip along the given side.
    pub fn edge(&self, edge: Edge) -> Rect {
        match edge {
            Edge::Top => Rect::new(0.0, 0.0, self.width, 1.0),
            Edge::Right => Rect::new(self.width - 1.0, 0.0, 1.0, self.height),
            Edge::Bottom => Rect::new(0.0, self.height - 1.0, self.width, 1.0),
            Edge::Left => Rect::new(0.0, 0.0, 1.0, self.height),
        }
    }

    pub fn edges(&self) -> [Rect; 4] {
        Edge::ALL.map(|e| self.edge(e))
    }

    pub fn contains(&self, actor: &impl Bounded) -> bool {
        let r = actor.bounds();
        r.x >= 0.0 && r.y >= 0.0 && r.right() <= self.width && r.bottom() <= self.height
    }

    pub fn is_at_left_boundary(&self, actor: &impl Bounded) -> bool {
        actor.bounds().x <= 0.0
    }

    pub fn is_at_right_boundary(&self, actor: &impl Bounded) -> bool {
        actor.bounds().right() >= self.width
    }

    /// The defense line sits one ship-height above the floor.
    pub fn defense_line(&self) -> f32 {
        self.height - SPACESHIP_HEIGHT
    }

    pub fn is_at_bottom_threshold(&self, actor: &impl Bounded) -> bool {
        actor.bounds().bottom() >= self.defense_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn nested_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 1.0, 1.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn edges_are_one_pixel_thick() {
        let field = Playfield::default();
        for edge in field.edges() {
            assert!(edge.width == 1.0 || edge.height == 1.0);
        }
        assert_eq!(field.edge(Edge::Right).x, WIDTH - 1.0);
        assert_eq!(field.edge(Edge::Bottom).y, HEIGHT - 1.0);
    }
}
