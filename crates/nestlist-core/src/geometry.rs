#![forbid(unsafe_code)]

//! Row geometry used to classify pointer positions during a drag.
//!
//! Coordinates are host units (pixels, logical points, or terminal cells);
//! only ratios matter to the editor.

/// A rectangle for a rendered row, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in host units.
    pub width: f32,
    /// Height in host units.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the rectangle has no usable area.
    ///
    /// Non-finite dimensions count as empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    /// Fraction of the height above `y`, clamped to `0.0..=1.0`.
    ///
    /// A degenerate rectangle reports `0.0`, which callers treat as the top
    /// edge.
    #[must_use]
    pub fn vertical_fraction(&self, y: f32) -> f32 {
        if self.is_empty() || !y.is_finite() {
            return 0.0;
        }
        ((y - self.y) / self.height).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_fraction_clamps() {
        let r = Rect::new(0.0, 100.0, 50.0, 20.0);
        assert_eq!(r.vertical_fraction(100.0), 0.0);
        assert_eq!(r.vertical_fraction(105.0), 0.25);
        assert_eq!(r.vertical_fraction(110.0), 0.5);
        assert_eq!(r.vertical_fraction(50.0), 0.0);
        assert_eq!(r.vertical_fraction(500.0), 1.0);
    }

    #[test]
    fn degenerate_rect_reports_top() {
        assert!(Rect::new(0.0, 0.0, 10.0, 0.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, f32::NAN).is_empty());
        assert!(Rect::new(0.0, 0.0, -1.0, 10.0).is_empty());
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 0.0).vertical_fraction(3.0), 0.0);
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 10.0).vertical_fraction(f32::NAN), 0.0);
    }
}
