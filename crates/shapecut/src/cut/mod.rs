//! Polygon cutting: one straight cut against a set of simple polygons.
//!
//! Purpose
//! - Given the current shapes and the segment the player drew, return the new
//!   shape set and how many shapes were split.
//!
//! Model
//! - Per shape: collect cut/edge intersections in edge order; with fewer than
//!   two the shape is untouched.
//! - Otherwise walk the vertices starting at the first hit edge. When a hit
//!   and the next one bound a chord whose midpoint is inside the shape, the
//!   vertices between them become a pocket and the remainder gets a notch.
//! - Pockets are emitted in discovery order, then the remainder. Rings are
//!   cleaned of repeated points and slivers; a shape that does not yield two
//!   clean pieces stays as it was.
//!
//! Caveats
//! - The midpoint test is an approximation for non-convex shapes and cuts
//!   with many hits on neighbouring edges.
//! - A cut through a vertex registers one hit there, whichever vertex the
//!   loop starts at. A cut that only grazes a vertex therefore has a single
//!   hit and leaves the shape alone.
//!
//! Code cross-refs: `geom2::{segment_intersection_eps, polygon_contains}`

mod engine;
mod types;

pub use engine::{collect_intersections, cut_shape, cut_shapes, split_polygon};
pub use types::{CutCfg, CutOutcome, Intersection, ShapeCut, Split};
