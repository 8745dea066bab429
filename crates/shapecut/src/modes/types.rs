//! Mode identifiers, context, events and the `GameMode` trait.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::cut::CutCfg;
use crate::geom2::{Arena, Segment, Shape};

/// Registered game modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModeId {
    Cut,
    CutEasy,
    CutHard,
    CutExtreme,
    FriendFoe,
    FriendFoeEasy,
    FriendFoeHard,
}

impl ModeId {
    pub const ALL: [ModeId; 7] = [
        ModeId::Cut,
        ModeId::CutEasy,
        ModeId::CutHard,
        ModeId::CutExtreme,
        ModeId::FriendFoe,
        ModeId::FriendFoeEasy,
        ModeId::FriendFoeHard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeId::Cut => "cut",
            ModeId::CutEasy => "cut-easy",
            ModeId::CutHard => "cut-hard",
            ModeId::CutExtreme => "cut-extreme",
            ModeId::FriendFoe => "friend-foe",
            ModeId::FriendFoeEasy => "friend-foe-easy",
            ModeId::FriendFoeHard => "friend-foe-hard",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeId {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ModeError::UnknownMode(s.to_string()))
    }
}

/// Errors from the registry and the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeError {
    UnknownMode(String),
    NotRegistered(ModeId),
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode(name) => write!(f, "unknown game mode `{name}`"),
            Self::NotRegistered(id) => write!(f, "game mode `{id}` is not registered"),
        }
    }
}

impl std::error::Error for ModeError {}

/// Everything a mode needs from its host; passed to `GameMode::init`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeContext {
    pub arena: Arena,
    /// Seed for level generation; levels are replayable from `(seed, level index)`.
    pub seed: u64,
    pub cut: CutCfg,
}

impl Default for ModeContext {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            seed: 0,
            cut: CutCfg::default(),
        }
    }
}

/// Message severity for the UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// Side effects a mode asks its host to present (sound, banners, results).
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    LevelStarted {
        level: u32,
    },
    /// A cut split at least one shape; `velocity` drives the cut sound.
    Cut {
        pieces: usize,
        velocity: f64,
    },
    Message {
        text: String,
        tone: Tone,
    },
    LevelCompleted {
        level: u32,
        gained: u32,
    },
    LevelFailed {
        reason: String,
    },
    /// The level's starting shape (and flags) were put back.
    LevelRestored {
        level: u32,
    },
    GameFinished {
        reason: String,
        score: u32,
        level: u32,
        elapsed: Duration,
    },
}

/// Snapshot of a mode's counters for the task plates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeState {
    pub mode: ModeId,
    pub level: u32,
    pub score: u32,
    pub cuts_made: u32,
    pub max_cuts: u32,
    pub pieces: usize,
    /// Cut modes only.
    pub target_pieces: Option<usize>,
    /// Friend-or-foe only.
    pub conflicts: Option<usize>,
    /// Friend-or-foe only.
    pub teams: Option<usize>,
}

/// A playable mode. Lifecycle: `init` → `start` → (`on_cut` | `update` |
/// `restart_level`)* → `cleanup`.
pub trait GameMode {
    fn id(&self) -> ModeId;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;

    fn init(&mut self, ctx: ModeContext);
    /// Set up the first level.
    fn start(&mut self) -> Vec<GameEvent>;
    /// Advance pending level transitions by `elapsed`.
    fn update(&mut self, elapsed: Duration) -> Vec<GameEvent>;
    /// Apply a finished cut gesture.
    fn on_cut(&mut self, cut: Segment) -> Vec<GameEvent>;
    /// Put the current level back to its starting position.
    fn restart_level(&mut self) -> Vec<GameEvent>;
    fn cleanup(&mut self);

    fn state(&self) -> ModeState;
    fn shapes(&self) -> &[Shape];
    fn is_active(&self) -> bool;
}

/// Deferred action (stands in for UI timeouts between levels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Scheduled<T> {
    remaining: Duration,
    action: T,
}

impl<T: Copy> Scheduled<T> {
    pub(crate) fn after(delay: Duration, action: T) -> Self {
        Self {
            remaining: delay,
            action,
        }
    }

    /// Count down; returns the action once the delay has passed.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> Option<T> {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            Some(self.action)
        } else {
            None
        }
    }
}
