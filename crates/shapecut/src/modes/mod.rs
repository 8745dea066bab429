//! Game modes on top of the cutting engine.
//!
//! Purpose
//! - Turn cuts into level progress: piece targets, cut budgets, flags,
//!   scoring, level transitions and the session clock.
//!
//! Model
//! - Every mode implements `GameMode` and owns a `Board` (shapes + id
//!   allocator). Inputs are `on_cut`, `update(elapsed)` and `restart_level`;
//!   outputs are `GameEvent` lists the host turns into sound and banners.
//! - Level transitions are scheduled and fire from `update`, so a host drives
//!   time explicitly and tests can step it.
//! - `ModeRegistry` maps `ModeId` to factories; `GameSession` runs one mode
//!   at a time under a fixed time budget.
//! - Levels are generated from `ReplayToken::new(seed, level index)`; the same
//!   seed and the same cuts replay the same game.
//!
//! Code cross-refs: `cut::cut_shapes`, `flags::FlagSet`, `geom2::rand::level_shape`

mod board;
mod cut_mode;
mod friend_foe;
mod registry;
mod session;
mod types;

pub use board::Board;
pub use cut_mode::{tier_params, CutMode};
pub use friend_foe::{level_score, max_cuts_for, teams_for, FriendFoeMode};
pub use registry::{ModeFactory, ModeRegistry};
pub use session::{GameSession, SESSION_TIME};
pub use types::{GameEvent, GameMode, ModeContext, ModeError, ModeId, ModeState, Tone};

use crate::geom2::Segment;

/// Cut sound intensity: segment length over 50, capped at 2.
pub fn cut_velocity(cut: &Segment) -> f64 {
    (cut.length() / 50.0).min(2.0)
}
