//! Terminal drawing target for the particle field.
//!
//! Draw calls are recorded per frame and replayed onto a braille canvas.
//! Alpha is folded into the color, since terminals cannot blend.

use ember_core::Rgb;
use ember_fx::Surface;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Context, Line, Points};

/// Surface units covered by one terminal column.
pub const UNITS_PER_COLUMN: f64 = 8.0;
/// Surface units covered by one terminal row.
pub const UNITS_PER_ROW: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
enum Mark {
    Dot { x: f64, y: f64, color: Color },
    Segment { from: (f64, f64), to: (f64, f64), color: Color },
}

#[derive(Debug, Default)]
pub struct TermSurface {
    marks: Vec<Mark>,
    hue_shift: f32,
}

impl TermSurface {
    /// Surface size for a terminal area of `columns` by `rows` cells.
    pub fn size_for(columns: u16, rows: u16) -> (f64, f64) {
        (
            f64::from(columns) * UNITS_PER_COLUMN,
            f64::from(rows) * UNITS_PER_ROW,
        )
    }

    /// Rotate every drawn color by `degrees` until reset to zero.
    pub fn set_hue_shift(&mut self, degrees: f32) {
        self.hue_shift = degrees;
    }

    /// Replay the last frame onto a canvas whose y axis spans `height`.
    /// Surface y grows downward, canvas y upward.
    pub fn paint(&self, ctx: &mut Context<'_>, height: f64) {
        for mark in &self.marks {
            match *mark {
                Mark::Dot { x, y, color } => ctx.draw(&Points {
                    coords: &[(x, height - y)],
                    color,
                }),
                Mark::Segment { from, to, color } => ctx.draw(&Line::new(
                    from.0,
                    height - from.1,
                    to.0,
                    height - to.1,
                    color,
                )),
            }
        }
    }

    fn shade(&self, color: Rgb, alpha: f64) -> Color {
        let color = if self.hue_shift == 0.0 {
            color
        } else {
            color.rotate_hue(self.hue_shift)
        };
        let Rgb { r, g, b } = color.scaled(alpha);
        Color::Rgb(r, g, b)
    }

    #[cfg(test)]
    fn dots(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Dot { .. }))
            .count()
    }
}

impl Surface for TermSurface {
    fn clear(&mut self) {
        self.marks.clear();
    }

    fn fill_circle(&mut self, x: f64, y: f64, _radius: f64, color: Rgb, alpha: f64) {
        let color = self.shade(color, alpha);
        self.marks.push(Mark::Dot { x, y, color });
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        _width: f64,
        color: Rgb,
        alpha: f64,
    ) {
        let color = self.shade(color, alpha);
        self.marks.push(Mark::Segment { from, to, color });
    }
}
