//! Rendering layer.
//!
//! The simulation only ever asks a surface to clear itself, fill a rectangle
//! or draw a sprite at a playfield position. `render` translates a `Game` into
//! those calls; `terminal` provides the crossterm-backed surface.

mod terminal;

pub use terminal::TerminalSurface;

use std::io;

use crossterm::style::Color;

use crate::compute::Game;
use crate::entities::Sprite;
use crate::geometry::{Bounded, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_DEBUG_EDGE: Color = Color::Red;
pub const C_LASER: Color = Color::White;
pub const C_ALIEN: Color = Color::Green;
pub const C_SPACESHIP: Color = Color::Cyan;

/// Drawing primitives in playfield coordinates.
pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) -> io::Result<()>;
    /// Push the finished frame out.
    fn present(&mut self) -> io::Result<()>;
}

/// Render one complete frame.
pub fn render<S: Surface>(surface: &mut S, game: &Game) -> io::Result<()> {
    surface.clear()?;

    if game.config().debug {
        for edge in game.playfield().edges() {
            surface.fill_rect(edge, C_DEBUG_EDGE)?;
        }
    }

    let ship = &game.player().spaceship;
    surface.draw_sprite(ship.sprite(), ship.x, ship.y)?;

    for alien in game.fleet().aliens() {
        surface.draw_sprite(alien.sprite(), alien.x, alien.y)?;
    }
    for laser in &ship.lasers {
        surface.fill_rect(laser.bounds(), C_LASER)?;
    }

    surface.present()
}
