//! Drawing target abstraction for the particle overlay.

use ember_core::Rgb;

/// A 2D drawing target. Coordinates have their origin at the top-left corner.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a circle centered at (`x`, `y`).
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb, alpha: f64);

    /// Stroke a straight line segment.
    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgb,
        alpha: f64,
    );
}
