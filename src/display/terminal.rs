use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use super::{Surface, C_ALIEN, C_SPACESHIP};
use crate::entities::Sprite;
use crate::geometry::{Playfield, Rect};

/// A `Surface` that scales playfield pixels onto a grid of terminal cells.
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl<W: Write> TerminalSurface<W> {
    /// `cols` × `rows` is the cell area reserved for the playfield.
    pub fn new(out: W, field: &Playfield, cols: u16, rows: u16) -> Self {
        Self {
            out,
            cols,
            rows,
            scale_x: cols as f32 / field.width(),
            scale_y: rows as f32 / field.height(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Cell holding playfield point `(x, y)`, or `None` when off-screen.
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.scale_x).floor();
        let row = (y * self.scale_y).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn span(&self, start: f32, len: f32, scale: f32, limit: u16) -> Option<(u16, u16)> {
        let end = (start + len) * scale;
        if end <= 0.0 {
            return None;
        }
        let first = (start * scale).floor().max(0.0);
        // Anything with a positive size covers at least one cell.
        let last = end.ceil().max(first + 1.0).min(limit as f32);
        if first >= last {
            return None;
        }
        Some((first as u16, last as u16))
    }
}

fn glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::Alien => ("<◉>", C_ALIEN),
        Sprite::Spaceship => ("/▲\\", C_SPACESHIP),
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        let Some((c0, c1)) = self.span(rect.x, rect.width, self.scale_x, self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = self.span(rect.y, rect.height, self.scale_y, self.rows) else {
            return Ok(());
        };
        let line = "█".repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(color))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32) -> io::Result<()> {
        let Some((col, row)) = self.cell(x, y) else {
            return Ok(());
        };
        let (text, color) = glyph(sprite);
        let room = (self.cols - col) as usize;
        let text: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::new(Vec::new(), &Playfield::new(630.0, 508.0), 63, 25)
    }

    #[test]
    fn cell_scales_and_clips() {
        let s = surface();
        assert_eq!(s.cell(0.0, 0.0), Some((0, 0)));
        assert_eq!(s.cell(629.0, 507.0), Some((62, 24)));
        assert_eq!(s.cell(-1.0, 10.0), None);
        assert_eq!(s.cell(10.0, 520.0), None);
    }

    #[test]
    fn thin_rect_still_covers_a_cell() {
        let s = surface();
        assert_eq!(s.span(100.0, 1.0, s.scale_x, s.cols), Some((10, 11)));
    }

    #[test]
    fn rect_above_the_top_is_skipped() {
        let mut s = surface();
        s.fill_rect(Rect::new(100.0, -20.0, 1.0, 8.0), Color::White).unwrap();
        assert!(s.into_inner().is_empty());
    }

    #[test]
    fn offscreen_sprite_writes_nothing() {
        let mut s = surface();
        s.draw_sprite(Sprite::Alien, -50.0, -50.0).unwrap();
        assert!(s.into_inner().is_empty());
    }
}
