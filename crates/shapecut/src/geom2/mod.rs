//! 2D geometry for cut puzzles (vertex loops, no H-representation).
//!
//! Purpose
//! - Leaf predicates over points and simple polygons: distance, epsilon
//!   equality, segment intersection, ray-cast containment, vertex center and
//!   shoelace area.
//! - Value-like `Shape`s (points + id + color) and a seeded level generator.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>` (`Point`). Polygons are plain slices
//!   of points; edge `i` runs from `points[i]` to `points[(i + 1) % n]`.
//! - Winding is not constrained; `polygon_area` is unsigned.
//!
//! Code cross-refs: `crate::cut` (consumer), `rand::level_shape`.

mod primitives;
pub mod rand;
mod shape;
mod types;

pub use primitives::{
    distance, points_equal, polygon_area, polygon_bounds, polygon_center, polygon_contains,
    segment_intersection, segment_intersection_eps, PARAM_EPS, POINT_EPS,
};
pub use shape::{hovered_shapes, Hsla, ParseColorError, Shape, ShapeId, ShapeIds};
pub use types::{Arena, Point, Segment};

#[cfg(test)]
mod tests;
