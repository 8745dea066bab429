//! Level shapes: regular polygons, stars and jittered outlines.
//!
//! Purpose
//! - Produce the starting shape of each puzzle level, sized for the arena and
//!   placed around its center.
//!
//! Model
//! - Level 1: triangle, square or pentagon (radius 100–150), shifted up to
//!   ±50 from the center.
//! - Level 2: 6–8 sides (radius 120–180), vertices jittered by up to ±15.
//! - Level 3: 7–10 points/sides (radius 140–210), either a star or a polygon
//!   jittered by up to ±25.
//! - Any other level falls back to level 1.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `Shape`, `ShapeIds`, `crate::modes` (callers)

use super::shape::{Shape, ShapeIds};
use super::types::{Arena, Point};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// RNG for this token; equal tokens give equal streams.
    #[inline]
    pub fn rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Regular polygon around `arena.center() + offset`, vertex k at angle `k·2π/sides`.
///
/// `sides` is clamped to at least 3.
pub fn regular_polygon(arena: Arena, sides: usize, radius: f64, offset: Vector2<f64>) -> Vec<Point> {
    let sides = sides.max(3);
    let c = arena.center() + offset;
    let step = std::f64::consts::TAU / sides as f64;
    (0..sides)
        .map(|k| {
            let th = k as f64 * step;
            Vector2::new(c.x + radius * th.cos(), c.y + radius * th.sin())
        })
        .collect()
}

/// Star with `points` tips alternating outer/inner radius, centered in the arena.
pub fn star_polygon(arena: Arena, points: usize, outer_radius: f64, inner_ratio: f64) -> Vec<Point> {
    let points = points.max(2);
    let c = arena.center();
    let inner_radius = outer_radius * inner_ratio;
    (0..points * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let th = i as f64 * std::f64::consts::PI / points as f64;
            Vector2::new(c.x + r * th.cos(), c.y + r * th.sin())
        })
        .collect()
}

/// Jitter every coordinate uniformly within `±max_deformation`.
pub fn deform<R: Rng>(points: &mut [Point], max_deformation: f64, rng: &mut R) {
    for p in points.iter_mut() {
        p.x += (rng.gen::<f64>() - 0.5) * max_deformation * 2.0;
        p.y += (rng.gen::<f64>() - 0.5) * max_deformation * 2.0;
    }
}

/// Outline of a level's starting shape.
pub fn level_polygon(arena: Arena, level: u32, tok: ReplayToken) -> Vec<Point> {
    let mut rng = tok.rng();
    match level {
        2 => {
            let sides = [6usize, 7, 8][rng.gen_range(0..3)];
            let radius = 120.0 + rng.gen::<f64>() * 60.0;
            let mut pts = regular_polygon(arena, sides, radius, Vector2::zeros());
            deform(&mut pts, 15.0, &mut rng);
            pts
        }
        3 => {
            let sides = 7 + rng.gen_range(0..4usize);
            let radius = 140.0 + rng.gen::<f64>() * 70.0;
            if rng.gen::<f64>() > 0.5 {
                star_polygon(arena, sides, radius, 0.5)
            } else {
                let mut pts = regular_polygon(arena, sides, radius, Vector2::zeros());
                deform(&mut pts, 25.0, &mut rng);
                pts
            }
        }
        _ => {
            let sides = [3usize, 4, 5][rng.gen_range(0..3)];
            let radius = 100.0 + rng.gen::<f64>() * 50.0;
            let offset = Vector2::new(
                (rng.gen::<f64>() - 0.5) * 100.0,
                (rng.gen::<f64>() - 0.5) * 100.0,
            );
            regular_polygon(arena, sides, radius, offset)
        }
    }
}

/// Starting shape for a level (fresh id from `ids`).
pub fn level_shape(arena: Arena, level: u32, tok: ReplayToken, ids: &mut ShapeIds) -> Shape {
    Shape::new(level_polygon(arena, level, tok), ids)
}

/// Tutorial board: triangle, square and pentagon side by side.
pub fn tutorial_shapes(arena: Arena, ids: &mut ShapeIds) -> Vec<Shape> {
    [(3usize, -150.0), (4, 0.0), (5, 150.0)]
        .into_iter()
        .map(|(sides, dx)| {
            Shape::new(
                regular_polygon(arena, sides, 80.0, Vector2::new(dx, 0.0)),
                ids,
            )
        })
        .collect()
}
