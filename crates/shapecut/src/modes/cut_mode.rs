//! "Cut into pieces": reach a piece count within a cut budget.

use std::time::Duration;

use crate::geom2::rand::{level_shape, ReplayToken};
use crate::geom2::{Segment, Shape};

use super::board::Board;
use super::cut_velocity;
use super::types::{GameEvent, GameMode, ModeContext, ModeId, ModeState, Scheduled, Tone};

const NEXT_LEVEL_DELAY: Duration = Duration::from_millis(1500);
const LEVEL_REWARD: u32 = 100;

/// Piece target and cut budget of a difficulty tier (1..=3).
pub fn tier_params(tier: u32) -> (usize, u32) {
    match tier {
        2 => (6, 4),
        3 => (10, 4),
        _ => (4, 3),
    }
}

/// Cut mode and its fixed-difficulty variants.
///
/// The standard mode starts at level 1 and advances one level per win, moving
/// up a tier every four levels. Variants stay on their tier and level.
#[derive(Clone, Debug)]
pub struct CutMode {
    id: ModeId,
    ctx: ModeContext,
    board: Board,
    initial: Option<Shape>,
    level: u32,
    levels_played: u64,
    score: u32,
    cuts_made: u32,
    max_cuts: u32,
    target_pieces: usize,
    active: bool,
    pending: Option<Scheduled<()>>,
}

impl CutMode {
    fn with_level(id: ModeId, level: u32) -> Self {
        let (target_pieces, max_cuts) = tier_params(1);
        Self {
            id,
            ctx: ModeContext::default(),
            board: Board::new(),
            initial: None,
            level,
            levels_played: 0,
            score: 0,
            cuts_made: 0,
            max_cuts,
            target_pieces,
            active: false,
            pending: None,
        }
    }

    pub fn standard() -> Self {
        Self::with_level(ModeId::Cut, 1)
    }

    pub fn easy() -> Self {
        Self::with_level(ModeId::CutEasy, 1)
    }

    pub fn hard() -> Self {
        Self::with_level(ModeId::CutHard, 2)
    }

    pub fn extreme() -> Self {
        Self::with_level(ModeId::CutExtreme, 3)
    }

    /// Difficulty tier used for shapes and targets.
    pub fn tier(&self) -> u32 {
        match self.id {
            ModeId::CutEasy => 1,
            ModeId::CutHard => 2,
            ModeId::CutExtreme => 3,
            _ => (1 + self.level.saturating_sub(1) / 4).min(3),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// A level transition is scheduled; cuts are ignored until it fires.
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    fn advances(&self) -> bool {
        self.id == ModeId::Cut
    }

    fn start_level(&mut self) -> Vec<GameEvent> {
        self.cuts_made = 0;
        self.pending = None;
        let tier = self.tier();
        (self.target_pieces, self.max_cuts) = tier_params(tier);
        let tok = ReplayToken::new(self.ctx.seed, self.levels_played);
        self.levels_played += 1;
        let shape = level_shape(self.ctx.arena, tier, tok, self.board.ids_mut());
        self.initial = Some(shape.clone());
        self.board.set_shapes(vec![shape]);
        tracing::debug!(
            mode = %self.id,
            level = self.level,
            tier,
            target = self.target_pieces,
            max_cuts = self.max_cuts,
            "level started"
        );
        vec![GameEvent::LevelStarted { level: self.level }]
    }

    fn complete_level(&mut self) -> Vec<GameEvent> {
        let finished = self.level;
        self.score += LEVEL_REWARD;
        if self.advances() {
            self.level += 1;
        }
        self.pending = Some(Scheduled::after(NEXT_LEVEL_DELAY, ()));
        vec![
            GameEvent::LevelCompleted {
                level: finished,
                gained: LEVEL_REWARD,
            },
            GameEvent::Message {
                text: format!("Level {finished} complete!"),
                tone: Tone::Success,
            },
        ]
    }

    fn fail_level(&mut self) -> Vec<GameEvent> {
        let reason = "Out of cuts!".to_string();
        self.pending = Some(Scheduled::after(NEXT_LEVEL_DELAY, ()));
        vec![
            GameEvent::Message {
                text: reason.clone(),
                tone: Tone::Error,
            },
            GameEvent::LevelFailed { reason },
        ]
    }
}

impl GameMode for CutMode {
    fn id(&self) -> ModeId {
        self.id
    }

    fn name(&self) -> &'static str {
        match self.id {
            ModeId::CutEasy => "Cut into pieces (easy)",
            ModeId::CutHard => "Cut into pieces (hard)",
            ModeId::CutExtreme => "Cut into pieces (extreme)",
            _ => "Cut into pieces",
        }
    }

    fn description(&self) -> &'static str {
        "Split the shape into the required number of pieces with a limited number of cuts"
    }

    fn init(&mut self, ctx: ModeContext) {
        self.ctx = ctx;
        self.active = true;
        tracing::debug!(mode = %self.id, seed = ctx.seed, "mode initialized");
    }

    fn start(&mut self) -> Vec<GameEvent> {
        if !self.active {
            return Vec::new();
        }
        self.start_level()
    }

    fn update(&mut self, elapsed: Duration) -> Vec<GameEvent> {
        if !self.active {
            return Vec::new();
        }
        match self.pending.as_mut().and_then(|p| p.advance(elapsed)) {
            Some(()) => self.start_level(),
            None => Vec::new(),
        }
    }

    fn on_cut(&mut self, cut: Segment) -> Vec<GameEvent> {
        if !self.active || self.pending.is_some() || self.board.is_empty() {
            return Vec::new();
        }
        let outcome = self.board.apply_cut(cut, self.ctx.cut);
        if !outcome.is_cut() {
            return Vec::new();
        }
        self.cuts_made += 1;
        let pieces = self.board.len();
        let mut events = vec![GameEvent::Cut {
            pieces,
            velocity: cut_velocity(&cut),
        }];
        if pieces >= self.target_pieces {
            events.extend(self.complete_level());
        } else if self.cuts_made >= self.max_cuts {
            events.extend(self.fail_level());
        }
        events
    }

    fn restart_level(&mut self) -> Vec<GameEvent> {
        let Some(initial) = self.initial.clone().filter(|_| self.active) else {
            return Vec::new();
        };
        self.pending = None;
        self.cuts_made = 0;
        self.board.set_shapes(vec![initial]);
        vec![
            GameEvent::LevelRestored { level: self.level },
            GameEvent::Message {
                text: "Level reset".to_string(),
                tone: Tone::Info,
            },
        ]
    }

    fn cleanup(&mut self) {
        self.active = false;
        self.pending = None;
        self.board.clear();
        tracing::debug!(mode = %self.id, "mode cleaned up");
    }

    fn state(&self) -> ModeState {
        ModeState {
            mode: self.id,
            level: self.level,
            score: self.score,
            cuts_made: self.cuts_made,
            max_cuts: self.max_cuts,
            pieces: self.board.len(),
            target_pieces: Some(self.target_pieces),
            conflicts: None,
            teams: None,
        }
    }

    fn shapes(&self) -> &[Shape] {
        self.board.shapes()
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn on_square(mut mode: CutMode) -> CutMode {
        mode.init(ModeContext::default());
        mode.start();
        let square = Shape::new(
            vec![vector![0.0, 0.0], vector![100.0, 0.0], vector![100.0, 100.0], vector![0.0, 100.0]],
            mode.board.ids_mut(),
        );
        mode.initial = Some(square.clone());
        mode.board.set_shapes(vec![square]);
        mode
    }

    fn vertical(x: f64) -> Segment {
        Segment::from_coords(x, -10.0, x, 110.0)
    }

    #[test]
    fn tiers_follow_level_in_standard_mode() {
        let mut mode = CutMode::standard();
        for (level, tier) in [(1, 1), (4, 1), (5, 2), (8, 2), (9, 3), (40, 3)] {
            mode.level = level;
            assert_eq!(mode.tier(), tier, "level {level}");
        }
        assert_eq!(CutMode::easy().tier(), 1);
        assert_eq!(CutMode::hard().tier(), 2);
        assert_eq!(CutMode::extreme().tier(), 3);
        assert_eq!(tier_params(1), (4, 3));
        assert_eq!(tier_params(3), (10, 4));
    }

    #[test]
    fn one_cut_through_two_pieces_counts_once() {
        let mut mode = on_square(CutMode::standard());
        let ev = mode.on_cut(vertical(50.0));
        assert!(matches!(ev[0], GameEvent::Cut { pieces: 2, .. }));
        let ev = mode.on_cut(Segment::from_coords(-10.0, 50.0, 110.0, 50.0));
        assert!(matches!(ev[0], GameEvent::Cut { pieces: 4, .. }));
        assert!(ev.contains(&GameEvent::LevelCompleted { level: 1, gained: 100 }));
        assert!(ev.contains(&GameEvent::Message {
            text: "Level 1 complete!".to_string(),
            tone: Tone::Success,
        }));
        let st = mode.state();
        assert_eq!((st.level, st.score, st.cuts_made), (2, 100, 2));
        assert!(mode.is_transitioning());
    }

    #[test]
    fn cuts_are_ignored_while_transitioning() {
        let mut mode = on_square(CutMode::standard());
        mode.on_cut(vertical(25.0));
        mode.on_cut(vertical(50.0));
        mode.on_cut(vertical(75.0));
        assert_eq!(mode.state().pieces, 4);
        assert!(mode.on_cut(Segment::from_coords(-10.0, 50.0, 110.0, 50.0)).is_empty());
        assert_eq!(mode.state().pieces, 4);

        assert!(mode.update(Duration::from_millis(1499)).is_empty());
        let ev = mode.update(Duration::from_millis(1));
        assert_eq!(ev, vec![GameEvent::LevelStarted { level: 2 }]);
        let st = mode.state();
        assert_eq!((st.pieces, st.cuts_made), (1, 0));
        assert!(!mode.is_transitioning());
    }

    #[test]
    fn running_out_of_cuts_starts_a_fresh_level() {
        let mut mode = on_square(CutMode::hard());
        for x in [10.0, 20.0, 30.0] {
            let ev = mode.on_cut(vertical(x));
            assert_eq!(ev.len(), 1);
        }
        let ev = mode.on_cut(vertical(40.0));
        assert!(matches!(ev[0], GameEvent::Cut { pieces: 5, .. }));
        assert!(ev.contains(&GameEvent::LevelFailed {
            reason: "Out of cuts!".to_string()
        }));
        assert_eq!(mode.state().score, 0);

        let ev = mode.update(Duration::from_millis(1500));
        // fixed-difficulty variants replay their own level
        assert_eq!(ev, vec![GameEvent::LevelStarted { level: 2 }]);
        assert_eq!(mode.state().max_cuts, 4);
        assert_eq!(mode.state().target_pieces, Some(6));
    }

    #[test]
    fn misses_do_not_spend_cuts() {
        let mut mode = on_square(CutMode::standard());
        assert!(mode.on_cut(Segment::from_coords(200.0, 0.0, 300.0, 100.0)).is_empty());
        assert!(mode.on_cut(Segment::from_coords(50.0, 50.0, 50.0, 50.0)).is_empty());
        assert_eq!(mode.state().cuts_made, 0);
    }

    #[test]
    fn restart_restores_the_starting_shape() {
        let mut mode = on_square(CutMode::standard());
        let initial = mode.shapes().to_vec();
        mode.on_cut(vertical(30.0));
        assert_eq!(mode.state().pieces, 2);
        let ev = mode.restart_level();
        assert_eq!(ev[0], GameEvent::LevelRestored { level: 1 });
        assert_eq!(mode.shapes(), initial.as_slice());
        assert_eq!(mode.state().cuts_made, 0);

        mode.cleanup();
        assert!(!mode.is_active());
        assert!(mode.restart_level().is_empty());
        assert!(mode.on_cut(vertical(30.0)).is_empty());
    }
}
