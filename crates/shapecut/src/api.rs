//! Curated surface for hosts embedding the engine (UNSTABLE).
//!
//! Important
//! - Convenience re-exports for the CLI and game front-ends. Breaking changes
//!   are allowed while the mode set is still moving.
//! - Prefer these over reaching into submodules.

// 2D geometry
pub use crate::geom2::{
    hovered_shapes, polygon_area, polygon_bounds, polygon_center, polygon_contains,
    segment_intersection, Arena, Hsla, Point, Segment, Shape, ShapeId, ShapeIds,
};
// Level shapes
pub use crate::geom2::rand::{
    level_polygon, level_shape, regular_polygon, star_polygon, tutorial_shapes,
    ReplayToken as LevelReplay,
};
// Cutting
pub use crate::cut::{cut_shape, cut_shapes, CutCfg, CutOutcome, ShapeCut};
// Flags
pub use crate::flags::{random_point_in_shape, Conflict, Flag, FlagSet, TeamId, TEAMS};
// Modes
pub use crate::modes::{
    cut_velocity, GameEvent, GameMode, GameSession, ModeContext, ModeError, ModeId,
    ModeRegistry, ModeState, Tone, SESSION_TIME,
};
