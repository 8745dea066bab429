//! "Friend or foe": cut until no piece holds flags of two teams.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::flags::{Conflict, FlagSet, TeamId};
use crate::geom2::rand::{level_shape, ReplayToken};
use crate::geom2::{Point, Segment, Shape};

use super::board::Board;
use super::cut_velocity;
use super::types::{GameEvent, GameMode, ModeContext, ModeId, ModeState, Scheduled, Tone};

const NEXT_LEVEL_DELAY: Duration = Duration::from_millis(1500);
const RESTORE_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    NextLevel,
    Restore,
}

/// Cut budget for a level: 5, shrinking by one every two levels, at least 2.
pub fn max_cuts_for(level: u32) -> u32 {
    5u32.saturating_sub(level / 2).max(2)
}

/// Teams on a level: 2, one more every three levels, at most 4.
pub fn teams_for(level: u32) -> usize {
    (2 + level.saturating_sub(1) as usize / 3).min(4)
}

/// Points for a won level.
pub fn level_score(max_cuts: u32, cuts_made: u32, teams: usize) -> u32 {
    150 + 75 * max_cuts.saturating_sub(cuts_made) + 50 * (teams as u32).saturating_sub(1)
}

#[derive(Clone, Debug)]
pub struct FriendFoeMode {
    id: ModeId,
    ctx: ModeContext,
    board: Board,
    flags: FlagSet,
    initial: Option<(Shape, FlagSet)>,
    conflicts: Vec<Conflict>,
    level: u32,
    levels_played: u64,
    score: u32,
    cuts_made: u32,
    max_cuts: u32,
    teams: usize,
    active: bool,
    pending: Option<Scheduled<Transition>>,
}

impl FriendFoeMode {
    fn with_level(id: ModeId, level: u32) -> Self {
        Self {
            id,
            ctx: ModeContext::default(),
            board: Board::new(),
            flags: FlagSet::new(),
            initial: None,
            conflicts: Vec::new(),
            level,
            levels_played: 0,
            score: 0,
            cuts_made: 0,
            max_cuts: max_cuts_for(level),
            teams: teams_for(level),
            active: false,
            pending: None,
        }
    }

    pub fn standard() -> Self {
        Self::with_level(ModeId::FriendFoe, 1)
    }

    pub fn easy() -> Self {
        Self::with_level(ModeId::FriendFoeEasy, 1)
    }

    pub fn hard() -> Self {
        Self::with_level(ModeId::FriendFoeHard, 2)
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Conflict of the shape under the pointer, for hover hints.
    pub fn conflict_at(&self, p: Point) -> Option<&Conflict> {
        let hovered = self.board.hovered(p);
        self.conflicts.iter().find(|c| hovered.contains(&c.shape))
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    fn advances(&self) -> bool {
        self.id == ModeId::FriendFoe
    }

    fn refresh_conflicts(&mut self) {
        self.conflicts = self.flags.conflicts(self.board.shapes());
    }

    fn plant_flags<R: Rng>(&mut self, shape: &Shape, rng: &mut R) {
        let level = self.level as usize;
        let count = rng.gen_range(3 + level..=6 + 2 * level);
        let per_team = count.div_ceil(self.teams);
        for t in 1..=self.teams {
            let to_add = per_team.min(count.saturating_sub((t - 1) * per_team));
            for _ in 0..to_add {
                self.flags.add_random_flag(shape, TeamId(t as u8), rng);
            }
        }
        self.flags.flags.shuffle(rng);
        tracing::debug!(flags = self.flags.len(), teams = self.teams, "flags planted");
    }

    fn start_level(&mut self) -> Vec<GameEvent> {
        self.cuts_made = 0;
        self.pending = None;
        self.flags.clear();
        self.max_cuts = max_cuts_for(self.level);
        self.teams = teams_for(self.level);
        let index = self.levels_played;
        self.levels_played += 1;
        let shape = level_shape(
            self.ctx.arena,
            self.level.min(3),
            ReplayToken::new(self.ctx.seed, index),
            self.board.ids_mut(),
        );
        // flags draw from their own stream so shapes stay comparable across modes
        let mut rng = ReplayToken::new(!self.ctx.seed, index).rng();
        self.plant_flags(&shape, &mut rng);
        self.initial = Some((shape.clone(), self.flags.clone()));
        self.board.set_shapes(vec![shape]);
        self.refresh_conflicts();
        tracing::debug!(
            mode = %self.id,
            level = self.level,
            max_cuts = self.max_cuts,
            conflicts = self.conflicts.len(),
            "level started"
        );
        vec![GameEvent::LevelStarted { level: self.level }]
    }

    fn restore(&mut self) -> Vec<GameEvent> {
        let Some((shape, flags)) = self.initial.clone() else {
            return Vec::new();
        };
        self.pending = None;
        self.cuts_made = 0;
        self.board.set_shapes(vec![shape]);
        self.flags = flags;
        self.refresh_conflicts();
        vec![
            GameEvent::LevelRestored { level: self.level },
            GameEvent::Message {
                text: "Level reset".to_string(),
                tone: Tone::Info,
            },
        ]
    }

    fn complete_level(&mut self) -> Vec<GameEvent> {
        let finished = self.level;
        let gained = level_score(self.max_cuts, self.cuts_made, self.teams);
        self.score += gained;
        if self.advances() {
            self.level += 1;
        }
        self.pending = Some(Scheduled::after(NEXT_LEVEL_DELAY, Transition::NextLevel));
        vec![
            GameEvent::LevelCompleted {
                level: finished,
                gained,
            },
            GameEvent::Message {
                text: format!("Perfect! Level complete! +{gained} points"),
                tone: Tone::Success,
            },
        ]
    }

    fn fail_level(&mut self) -> Vec<GameEvent> {
        let reason = "Out of cuts!".to_string();
        self.pending = Some(Scheduled::after(RESTORE_DELAY, Transition::Restore));
        vec![
            GameEvent::Message {
                text: reason.clone(),
                tone: Tone::Error,
            },
            GameEvent::LevelFailed { reason },
        ]
    }
}

impl GameMode for FriendFoeMode {
    fn id(&self) -> ModeId {
        self.id
    }

    fn name(&self) -> &'static str {
        match self.id {
            ModeId::FriendFoeEasy => "Friend or foe (easy)",
            ModeId::FriendFoeHard => "Friend or foe (hard)",
            _ => "Friend or foe",
        }
    }

    fn description(&self) -> &'static str {
        "Cut the shape so that flags of different teams never share a piece"
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
            Some(Transition::NextLevel) => self.start_level(),
            Some(Transition::Restore) => self.restore(),
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
        self.refresh_conflicts();
        let mut events = vec![GameEvent::Cut {
            pieces: self.board.len(),
            velocity: cut_velocity(&cut),
        }];
        if self.conflicts.is_empty() && self.cuts_made <= self.max_cuts {
            events.extend(self.complete_level());
        } else if self.cuts_made >= self.max_cuts {
            events.extend(self.fail_level());
        }
        events
    }

    fn restart_level(&mut self) -> Vec<GameEvent> {
        if !self.active {
            return Vec::new();
        }
        self.restore()
    }

    fn cleanup(&mut self) {
        self.active = false;
        self.pending = None;
        self.board.clear();
        self.flags.clear();
        self.conflicts.clear();
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
            target_pieces: None,
            conflicts: Some(self.conflicts.len()),
            teams: Some(self.teams),
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
    use crate::flags::Flag;
    use nalgebra::vector;

    fn flag(x: f64, y: f64, team: u8) -> Flag {
        Flag {
            pos: vector![x, y],
            team: TeamId(team),
        }
    }

    fn on_square(mut mode: FriendFoeMode, flags: Vec<Flag>) -> FriendFoeMode {
        mode.init(ModeContext::default());
        mode.start();
        let square = Shape::new(
            vec![vector![0.0, 0.0], vector![200.0, 0.0], vector![200.0, 200.0], vector![0.0, 200.0]],
            mode.board.ids_mut(),
        );
        mode.flags = FlagSet { flags };
        mode.initial = Some((square.clone(), mode.flags.clone()));
        mode.board.set_shapes(vec![square]);
        mode.refresh_conflicts();
        mode
    }

    fn vertical(x: f64) -> Segment {
        Segment::from_coords(x, -10.0, x, 210.0)
    }

    #[test]
    fn level_parameters() {
        assert_eq!(
            (1..=8).map(max_cuts_for).collect::<Vec<_>>(),
            vec![5, 4, 4, 3, 3, 2, 2, 2]
        );
        assert_eq!(
            (1..=12).map(teams_for).collect::<Vec<_>>(),
            vec![2, 2, 2, 3, 3, 3, 4, 4, 4, 4, 4, 4]
        );
        assert_eq!(level_score(5, 1, 2), 500);
        assert_eq!(level_score(3, 3, 4), 300);
    }

    #[test]
    fn generated_level_starts_in_conflict() {
        let mut mode = FriendFoeMode::standard();
        mode.init(ModeContext {
            seed: 17,
            ..ModeContext::default()
        });
        let ev = mode.start();
        assert_eq!(ev, vec![GameEvent::LevelStarted { level: 1 }]);
        assert!((4..=8).contains(&mode.flags().len()));
        assert_eq!(mode.flags().teams().len(), 2);
        let st = mode.state();
        assert_eq!(st.conflicts, Some(1));
        assert_eq!((st.teams, st.max_cuts), (Some(2), 5));
        let shape = &mode.shapes()[0];
        assert!(mode.flags().flags.iter().all(|f| shape.contains(f.pos)));
    }

    #[test]
    fn separating_the_teams_wins_the_level() {
        let mut mode = on_square(
            FriendFoeMode::standard(),
            vec![flag(50.0, 150.0, 1), flag(150.0, 150.0, 2), flag(40.0, 60.0, 1)],
        );
        let c = mode.conflict_at(vector![100.0, 100.0]).unwrap();
        assert_eq!(c.teams, vec![TeamId(1), TeamId(2)]);

        let ev = mode.on_cut(vertical(100.0));
        assert!(ev.contains(&GameEvent::LevelCompleted { level: 1, gained: 500 }));
        assert!(ev.contains(&GameEvent::Message {
            text: "Perfect! Level complete! +500 points".to_string(),
            tone: Tone::Success,
        }));
        assert!(mode.conflicts().is_empty());
        assert!(mode.conflict_at(vector![50.0, 150.0]).is_none());
        assert_eq!((mode.state().level, mode.state().score), (2, 500));

        assert!(mode.on_cut(vertical(50.0)).is_empty());
        let ev = mode.update(Duration::from_millis(1500));
        assert_eq!(ev, vec![GameEvent::LevelStarted { level: 2 }]);
        assert_eq!(mode.state().max_cuts, 4);
    }

    #[test]
    fn variants_keep_their_level() {
        let mut mode = on_square(
            FriendFoeMode::hard(),
            vec![flag(50.0, 150.0, 1), flag(150.0, 150.0, 2)],
        );
        let ev = mode.on_cut(vertical(100.0));
        // hard starts on level 2: four cuts, one used
        assert!(ev.contains(&GameEvent::LevelCompleted { level: 2, gained: 425 }));
        assert_eq!(mode.state().level, 2);
    }

    #[test]
    fn failing_restores_the_level_after_a_delay() {
        let flags = vec![flag(50.0, 150.0, 1), flag(60.0, 150.0, 2)];
        let mut mode = on_square(FriendFoeMode::standard(), flags.clone());
        for x in [150.0, 160.0, 170.0, 180.0] {
            let ev = mode.on_cut(vertical(x));
            assert_eq!(ev.len(), 1);
        }
        let ev = mode.on_cut(vertical(190.0));
        assert!(ev.contains(&GameEvent::LevelFailed {
            reason: "Out of cuts!".to_string()
        }));
        assert_eq!(mode.state().pieces, 6);

        assert!(mode.update(Duration::from_millis(1999)).is_empty());
        let ev = mode.update(Duration::from_millis(1));
        assert_eq!(ev[0], GameEvent::LevelRestored { level: 1 });
        let st = mode.state();
        assert_eq!((st.pieces, st.cuts_made, st.conflicts), (1, 0, Some(1)));
        assert_eq!(mode.flags().flags, flags);
    }

    #[test]
    fn restart_is_immediate() {
        let mut mode = on_square(
            FriendFoeMode::easy(),
            vec![flag(50.0, 150.0, 1), flag(60.0, 150.0, 2)],
        );
        mode.on_cut(vertical(150.0));
        assert_eq!(mode.state().pieces, 2);
        let ev = mode.restart_level();
        assert_eq!(ev[0], GameEvent::LevelRestored { level: 1 });
        assert_eq!(mode.state().pieces, 1);

        mode.cleanup();
        assert!(mode.flags().is_empty());
        assert!(mode.shapes().is_empty());
    }
}
