//! Print the starting shape of a few levels for quick visual sanity.
//!
//! Usage:
//!   cargo run -p shapecut --example level_tour -- 42
//!
//! For each level tier prints vertex count, area and bounding box, then
//! cuts the shape once through its center and prints the piece areas.

use nalgebra::Vector2;
use shapecut::prelude::*;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);
    let arena = Arena::default();
    let mut ids = ShapeIds::new();
    for level in 1..=3u32 {
        for index in 0..3u64 {
            let shape = level_shape(arena, level, ReplayToken::new(seed, index), &mut ids);
            let Some(c) = shape.center() else { continue };
            let cut = Segment::new(c - Vector2::new(400.0, 37.0), c + Vector2::new(400.0, 37.0));
            let out = cut_shapes(std::slice::from_ref(&shape), cut, CutCfg::default(), &mut ids);
            let areas: Vec<String> = out.shapes.iter().map(|s| format!("{:.0}", s.area())).collect();
            println!(
                "level={level} index={index} n={} area={:.0} color={} pieces=[{}]",
                shape.points.len(),
                shape.area(),
                shape.color,
                areas.join(", ")
            );
        }
    }
}
