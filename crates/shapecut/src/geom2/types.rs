//! Basic 2D value types: `Point`, `Segment`, `Arena`.

use nalgebra::Vector2;

/// A position on the play field (screen coordinates, y grows downwards).
pub type Point = Vector2<f64>;

/// Straight cut drawn by the player, from press to release.
///
/// Transient: it exists for one cut and is never stored with the shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Vector2::new(x0, y0), Vector2::new(x1, y1))
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Start and end coincide exactly (a click without a drag).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Play field size. Shapes are generated around its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Point {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Arena {
    /// 4:3 field the puzzles were designed on.
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}
