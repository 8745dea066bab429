//! A running game: one active mode plus the session clock.

use std::time::Duration;

use crate::geom2::{Point, Segment, Shape, ShapeId};

use super::registry::ModeRegistry;
use super::types::{GameEvent, GameMode, ModeContext, ModeError, ModeId, ModeState};

/// Length of a game session.
pub const SESSION_TIME: Duration = Duration::from_secs(300);

/// Host-side driver of the mode lifecycle.
///
/// Starting a mode cleans up the previous one first. The clock counts down
/// on `tick`; when it runs out the session emits `GameFinished` once and
/// ignores further input until the next `start`.
pub struct GameSession {
    registry: ModeRegistry,
    ctx: ModeContext,
    budget: Duration,
    mode: Option<Box<dyn GameMode>>,
    elapsed: Duration,
    finished: bool,
}

impl GameSession {
    pub fn new(registry: ModeRegistry, ctx: ModeContext) -> Self {
        Self::with_budget(registry, ctx, SESSION_TIME)
    }

    pub fn with_budget(registry: ModeRegistry, ctx: ModeContext, budget: Duration) -> Self {
        Self {
            registry,
            ctx,
            budget,
            mode: None,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    pub fn start(&mut self, id: ModeId) -> Result<Vec<GameEvent>, ModeError> {
        let mut mode = self.registry.create(id)?;
        if let Some(mut prev) = self.mode.take() {
            prev.cleanup();
        }
        mode.init(self.ctx);
        let events = mode.start();
        tracing::info!(mode = %id, seed = self.ctx.seed, "session started");
        self.mode = Some(mode);
        self.elapsed = Duration::ZERO;
        self.finished = false;
        Ok(events)
    }

    /// Advance the clock and the mode's pending transitions.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        if self.finished {
            return Vec::new();
        }
        let Some(mode) = self.mode.as_mut() else {
            return Vec::new();
        };
        let mut events = mode.update(elapsed);
        self.elapsed = (self.elapsed + elapsed).min(self.budget);
        if self.elapsed >= self.budget {
            self.finished = true;
            let st = mode.state();
            tracing::info!(score = st.score, level = st.level, "time is up");
            events.push(GameEvent::GameFinished {
                reason: "Time is up!".to_string(),
                score: st.score,
                level: st.level,
                elapsed: self.elapsed,
            });
        }
        events
    }

    pub fn cut(&mut self, cut: Segment) -> Vec<GameEvent> {
        match self.mode.as_mut() {
            Some(mode) if !self.finished => mode.on_cut(cut),
            _ => Vec::new(),
        }
    }

    pub fn restart_level(&mut self) -> Vec<GameEvent> {
        match self.mode.as_mut() {
            Some(mode) if !self.finished => mode.restart_level(),
            _ => Vec::new(),
        }
    }

    /// End the session early.
    pub fn stop(&mut self) {
        if let Some(mut mode) = self.mode.take() {
            mode.cleanup();
        }
        self.finished = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn mode(&self) -> Option<&dyn GameMode> {
        self.mode.as_deref()
    }

    pub fn state(&self) -> Option<ModeState> {
        self.mode.as_ref().map(|m| m.state())
    }

    pub fn shapes(&self) -> &[Shape] {
        match &self.mode {
            Some(mode) => mode.shapes(),
            None => &[],
        }
    }

    pub fn hovered(&self, p: Point) -> Vec<ShapeId> {
        crate::geom2::hovered_shapes(self.shapes(), p)
    }

    pub fn time_left(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }
}
