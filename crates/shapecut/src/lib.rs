//! Polygon cutting core for the "cut the shape" and "friend-or-foe" puzzles.
//!
//! Layout
//! - `geom2`: points, segments, polygon predicates, shapes and the level
//!   shape generator.
//! - `cut`: the cutting engine (intersection walk, pockets, remainder).
//! - `flags`: team flags placed inside shapes and conflict detection.
//! - `modes`: game modes, registry and session driving the engine.
//!
//! Rendering, input wiring, audio and score persistence live outside this
//! crate; modes report what happened through `modes::GameEvent` values.

pub mod api;
pub mod cut;
pub mod flags;
pub mod geom2;
pub mod modes;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{Arena, Point, Segment, Shape, ShapeId, ShapeIds};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cut::{cut_shapes, CutCfg, CutOutcome};
    pub use crate::geom2::rand::{level_shape, tutorial_shapes, ReplayToken};
    pub use crate::geom2::{
        distance, points_equal, polygon_area, polygon_center, polygon_contains,
        segment_intersection, Arena, Hsla, Point, Segment, Shape, ShapeId, ShapeIds,
    };
    pub use crate::modes::{GameEvent, GameMode, GameSession, ModeContext, ModeId, ModeRegistry};
    pub use nalgebra::Vector2 as Vec2;
}
