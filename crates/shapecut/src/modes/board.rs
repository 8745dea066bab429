//! The shape set a mode plays on.

use crate::cut::{cut_shapes, CutCfg, CutOutcome};
use crate::geom2::{hovered_shapes, Point, Segment, Shape, ShapeId, ShapeIds};

/// Current shapes plus the id allocator they were drawn from.
///
/// A cut computes the whole new set from the current one before swapping it
/// in, so readers never observe a half-cut board.
#[derive(Clone, Debug, Default)]
pub struct Board {
    shapes: Vec<Shape>,
    ids: ShapeIds,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn ids_mut(&mut self) -> &mut ShapeIds {
        &mut self.ids
    }

    /// Replace the set; ids of adopted shapes are reserved.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        for s in &shapes {
            self.ids.reserve(s.id);
        }
        self.shapes = shapes;
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Cut the board and publish the result.
    pub fn apply_cut(&mut self, cut: Segment, cfg: CutCfg) -> CutOutcome {
        let outcome = cut_shapes(&self.shapes, cut, cfg, &mut self.ids);
        self.shapes = outcome.shapes.clone();
        outcome
    }

    pub fn hovered(&self, p: Point) -> Vec<ShapeId> {
        hovered_shapes(&self.shapes, p)
    }
}
