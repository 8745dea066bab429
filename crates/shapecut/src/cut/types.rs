//! Data types for the cutting engine.
//!
//! Kept small and explicit to make `engine` easy to read.

use crate::geom2::{Point, Shape, PARAM_EPS, POINT_EPS};

/// Cutting tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutCfg {
    /// Slack on segment parameters when intersecting the cut with an edge.
    pub eps_param: f64,
    /// Consecutive ring points closer than this (per coordinate) are merged.
    pub eps_point: f64,
    /// Pieces with an area at or below this are discarded as slivers.
    pub min_area: f64,
}

impl Default for CutCfg {
    fn default() -> Self {
        Self {
            eps_param: PARAM_EPS,
            eps_point: POINT_EPS,
            min_area: 1e-6,
        }
    }
}

/// The cut crossing polygon edge `edge` (from vertex `edge` to `edge + 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub edge: usize,
    pub point: Point,
}

/// Geometric result of splitting one vertex loop.
///
/// `pockets` are listed in discovery order; `remainder` is what is left of the
/// loop after every pocket was carved out (it carries a notch per pocket).
#[derive(Clone, Debug, PartialEq)]
pub struct Split {
    pub pockets: Vec<Vec<Point>>,
    pub remainder: Vec<Point>,
}

impl Split {
    /// Pockets followed by the remainder.
    pub fn into_rings(self) -> Vec<Vec<Point>> {
        let mut rings = self.pockets;
        rings.push(self.remainder);
        rings
    }
}

/// What happened to a single shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeCut {
    /// Fewer than two usable pieces; the shape stays as it was.
    Unchanged,
    /// Replacement pieces, each with a fresh id.
    Split(Vec<Shape>),
}

/// New shape set after one cut.
#[derive(Clone, Debug, PartialEq)]
pub struct CutOutcome {
    pub shapes: Vec<Shape>,
    /// Number of input shapes that were split.
    pub split_count: usize,
}

impl CutOutcome {
    #[inline]
    pub fn is_cut(&self) -> bool {
        self.split_count > 0
    }
}
