//! Shapes on the board: a vertex loop plus identity and display color.
//!
//! Shapes are values. A cut never edits one in place; it replaces the parent
//! with freshly identified pieces. Identity comes from an explicit
//! `ShapeIds` allocator owned by whoever owns the shape set.

use std::fmt;
use std::str::FromStr;

use super::primitives::{polygon_area, polygon_center, polygon_contains};
use super::types::Point;

/// Unique shape identifier (unique per `ShapeIds` allocator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotone id allocator.
///
/// Ids stay unique as long as `ShapeId(u64::MAX)` is never adopted: it is the
/// last id the counter can reach, so hosts reject it when loading shapes.
#[derive(Clone, Debug, Default)]
pub struct ShapeIds {
    next: u64,
}

impl ShapeIds {
    #[inline]
    pub fn new() -> Self {
        Self { next: 0 }
    }

    #[inline]
    pub fn fresh(&mut self) -> ShapeId {
        let id = ShapeId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }

    /// Make sure future ids never collide with `id` (used when adopting
    /// shapes that already carry identifiers).
    #[inline]
    pub fn reserve(&mut self, id: ShapeId) {
        self.next = self.next.max(id.0.saturating_add(1));
    }
}

/// Fill color in HSLA. Saturation, lightness are percentages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

/// Hue step between consecutive ids; keeps neighbouring pieces apart.
const GOLDEN_ANGLE_DEG: f64 = 137.507_764_050_037_85;

impl Hsla {
    /// Palette color for a shape id (deterministic).
    pub fn from_id(id: ShapeId) -> Self {
        let hue = (id.0 as f64 * GOLDEN_ANGLE_DEG).rem_euclid(360.0).floor();
        Self {
            hue,
            saturation: 70.0,
            lightness: 60.0,
            alpha: 0.7,
        }
    }

    /// Stronger variant used for hovered fills and outlines.
    pub fn highlighted(&self) -> Self {
        Self {
            alpha: 0.9,
            ..*self
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Error returned when parsing an `hsla(h, s%, l%, a)` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError {
    pub input: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `hsla(h, s%, l%, a)`, got `{}`", self.input)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Hsla {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_string(),
        };
        let body = s
            .trim()
            .strip_prefix("hsla(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(err());
        }
        let num = |p: &str| p.trim_end_matches('%').trim().parse::<f64>().map_err(|_| err());
        Ok(Self {
            hue: num(parts[0])?,
            saturation: num(parts[1])?,
            lightness: num(parts[2])?,
            alpha: num(parts[3])?,
        })
    }
}

/// Simple polygon on the board.
///
/// Invariant: `points.len() >= 3` for every shape in a live set.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub color: Hsla,
    pub points: Vec<Point>,
}

impl Shape {
    /// New shape with a fresh id and its palette color.
    pub fn new(points: Vec<Point>, ids: &mut ShapeIds) -> Self {
        debug_assert!(points.len() >= 3, "shape needs at least 3 points");
        let id = ids.fresh();
        Self {
            id,
            color: Hsla::from_id(id),
            points,
        }
    }

    /// Rebuild a shape with a known identity (restoring a saved level).
    pub fn with_identity(id: ShapeId, color: Hsla, points: Vec<Point>) -> Self {
        Self { id, color, points }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        polygon_contains(&self.points, p)
    }

    #[inline]
    pub fn center(&self) -> Option<Point> {
        polygon_center(&self.points)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }
}

/// Ids of the shapes under the pointer, in set order.
pub fn hovered_shapes(shapes: &[Shape], p: Point) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| s.contains(p))
        .map(|s| s.id)
        .collect()
}
