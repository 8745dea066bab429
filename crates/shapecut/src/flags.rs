//! Team flags for the friend-or-foe puzzle.
//!
//! A flag is planted at a point inside a shape; a shape holding flags of two
//! or more teams is in conflict. The player wins a level by cutting until no
//! shape is in conflict.

use std::collections::BTreeSet;

use rand::Rng;

use crate::geom2::{polygon_bounds, polygon_center, polygon_contains, Point, Shape, ShapeId};

/// Team identifier, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Team {
    pub id: TeamId,
    pub name: &'static str,
    pub color: &'static str,
}

/// Teams available to levels, in id order.
pub const TEAMS: [Team; 4] = [
    Team {
        id: TeamId(1),
        name: "Blue",
        color: "#3B82F6",
    },
    Team {
        id: TeamId(2),
        name: "Red",
        color: "#EF4444",
    },
    Team {
        id: TeamId(3),
        name: "Green",
        color: "#10B981",
    },
    Team {
        id: TeamId(4),
        name: "Yellow",
        color: "#F59E0B",
    },
];

pub fn team(id: TeamId) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.id == id)
}

/// Height of a drawn flag; the pole must fit inside the shape.
pub const FLAG_HEIGHT: f64 = 40.0;
const PLACEMENT_ATTEMPTS: usize = 1000;

/// A planted flag (the foot of its pole).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flag {
    pub pos: Point,
    pub team: TeamId,
}

/// Shape holding flags of more than one team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub shape: ShapeId,
    /// Teams present, in order of first appearance.
    pub teams: Vec<TeamId>,
    pub flags: usize,
}

/// Rejection-sample a flag position whose pole stays inside `points`.
///
/// Candidates are drawn in the bounding box, leaving room for the pole above
/// the foot (y grows downwards). The foot and three probes up the pole must be
/// inside. After 1000 misses the vertex center is used.
pub fn random_point_in_shape<R: Rng>(points: &[Point], rng: &mut R) -> Option<Point> {
    let (lo, hi) = polygon_bounds(points)?;
    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = lo.x + rng.gen::<f64>() * (hi.x - lo.x);
        let y = lo.y + FLAG_HEIGHT + rng.gen::<f64>() * (hi.y - lo.y - FLAG_HEIGHT);
        let foot = Point::new(x, y);
        if !polygon_contains(points, foot) {
            continue;
        }
        let pole_inside = [0.25, 0.5, 0.75]
            .iter()
            .all(|f| polygon_contains(points, Point::new(x, y - FLAG_HEIGHT * f)));
        if pole_inside {
            return Some(foot);
        }
    }
    polygon_center(points)
}

/// Flags currently on the board.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlagSet {
    pub flags: Vec<Flag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self { flags: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    pub fn push(&mut self, flag: Flag) {
        self.flags.push(flag);
    }

    /// Plant a flag for `team` somewhere inside `shape`.
    pub fn add_random_flag<R: Rng>(&mut self, shape: &Shape, team: TeamId, rng: &mut R) -> Option<Flag> {
        let pos = random_point_in_shape(&shape.points, rng)?;
        let flag = Flag { pos, team };
        self.flags.push(flag);
        Some(flag)
    }

    pub fn by_team(&self, team: TeamId) -> impl Iterator<Item = &Flag> + '_ {
        self.flags.iter().filter(move |f| f.team == team)
    }

    pub fn flags_in<'a>(&'a self, shape: &'a Shape) -> impl Iterator<Item = &'a Flag> + 'a {
        self.flags.iter().filter(move |f| shape.contains(f.pos))
    }

    /// Conflict for `shape`, if it holds at least two flags of different teams.
    pub fn conflict(&self, shape: &Shape) -> Option<Conflict> {
        let inside: Vec<&Flag> = self.flags_in(shape).collect();
        if inside.len() <= 1 {
            return None;
        }
        let mut teams: Vec<TeamId> = Vec::new();
        for f in &inside {
            if !teams.contains(&f.team) {
                teams.push(f.team);
            }
        }
        if teams.len() > 1 {
            Some(Conflict {
                shape: shape.id,
                teams,
                flags: inside.len(),
            })
        } else {
            None
        }
    }

    /// Conflicts over a whole shape set, in set order.
    pub fn conflicts(&self, shapes: &[Shape]) -> Vec<Conflict> {
        shapes.iter().filter_map(|s| self.conflict(s)).collect()
    }

    /// Teams that have at least one flag.
    pub fn teams(&self) -> BTreeSet<TeamId> {
        self.flags.iter().map(|f| f.team).collect()
    }
}
