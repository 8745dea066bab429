//! Intersection walk, pocket extraction and shape-set assembly.

use crate::geom2::{
    points_equal, polygon_area, polygon_contains, segment_intersection_eps, Point, Segment, Shape,
    ShapeIds,
};

use super::types::{CutCfg, CutOutcome, Intersection, ShapeCut, Split};

/// Cut every shape in `shapes` and return the replacement set.
///
/// The input slice is a snapshot and is never modified; unchanged shapes are
/// cloned through with their id, split shapes are replaced in place of the
/// parent by pockets followed by the remainder.
pub fn cut_shapes(shapes: &[Shape], cut: Segment, cfg: CutCfg, ids: &mut ShapeIds) -> CutOutcome {
    let mut out = Vec::with_capacity(shapes.len() + 1);
    let mut split_count = 0;
    for shape in shapes {
        match cut_shape(shape, cut, cfg, ids) {
            ShapeCut::Unchanged => out.push(shape.clone()),
            ShapeCut::Split(pieces) => {
                tracing::debug!(parent = %shape.id, pieces = pieces.len(), "shape split");
                split_count += 1;
                out.extend(pieces);
            }
        }
    }
    CutOutcome {
        shapes: out,
        split_count,
    }
}

/// Cut a single shape. Pieces get fresh ids from `ids` only when it splits.
pub fn cut_shape(shape: &Shape, cut: Segment, cfg: CutCfg, ids: &mut ShapeIds) -> ShapeCut {
    let hits = collect_intersections(&shape.points, cut, cfg);
    let Some(split) = split_polygon(&shape.points, &hits) else {
        return ShapeCut::Unchanged;
    };
    let rings: Vec<Vec<Point>> = split
        .into_rings()
        .into_iter()
        .filter_map(|ring| clean_ring(ring, cfg))
        .collect();
    if rings.len() < 2 {
        tracing::debug!(shape = %shape.id, hits = hits.len(), "only slivers cut off");
        return ShapeCut::Unchanged;
    }
    ShapeCut::Split(rings.into_iter().map(|r| Shape::new(r, ids)).collect())
}

/// Hits of `cut` on each edge `i → i+1 (mod n)`, in increasing edge order.
///
/// An edge contributes at most one hit; edges parallel to the cut contribute none.
/// A cut through a vertex is seen by both adjacent edges; hits closer than
/// `cfg.eps_point` (neighbours, and last/first across the wrap) collapse into
/// one hit on the later edge, so every vertex crossing counts once.
pub fn collect_intersections(points: &[Point], cut: Segment, cfg: CutCfg) -> Vec<Intersection> {
    let n = points.len();
    let mut hits: Vec<Intersection> = (0..n)
        .filter_map(|edge| {
            let a = points[edge];
            let b = points[(edge + 1) % n];
            segment_intersection_eps(cut.start, cut.end, a, b, cfg.eps_param)
                .map(|point| Intersection { edge, point })
        })
        .collect();
    hits.dedup_by(|later, earlier| {
        let same = points_equal(later.point, earlier.point, cfg.eps_point);
        if same {
            earlier.edge = later.edge;
        }
        same
    });
    // edge 0 follows edge n-1 around the loop
    if hits.len() > 1 && points_equal(hits[0].point, hits[hits.len() - 1].point, cfg.eps_point) {
        hits.pop();
    }
    hits
}

/// Carve pockets out of the loop `points` along the recorded `hits`.
///
/// `hits` must be sorted by edge with at most one hit per edge, as produced by
/// `collect_intersections`. Returns `None` when fewer than two hits exist or
/// when no chord midpoint lies inside the loop.
///
/// Rings are returned raw: they may contain repeated points when the cut runs
/// through vertices.
pub fn split_polygon(points: &[Point], hits: &[Intersection]) -> Option<Split> {
    let n = points.len();
    let first = hits.first()?;
    if hits.len() < 2 || n < 3 || hits.iter().any(|h| h.edge >= n) {
        return None;
    }
    let mut remainder: Vec<Point> = Vec::with_capacity(n + 2 * hits.len());
    let mut pockets: Vec<Vec<Point>> = Vec::new();
    let mut step = 0usize;
    while step < n {
        let edge = (first.edge + step) % n;
        remainder.push(points[edge]);
        if let Some(k) = hits.iter().position(|h| h.edge == edge) {
            if let Some(next) = hits.get(k + 1) {
                let here = hits[k];
                let mid = (here.point + next.point) * 0.5;
                if polygon_contains(points, mid) {
                    let mut pocket = vec![here.point];
                    let mut e = edge;
                    while e != next.edge {
                        e = (e + 1) % n;
                        pocket.push(points[e]);
                        step += 1;
                    }
                    pocket.push(next.point);
                    pockets.push(pocket);
                    remainder.push(here.point);
                    remainder.push(next.point);
                }
            }
        }
        step += 1;
    }
    if pockets.is_empty() {
        return None;
    }
    Some(Split { pockets, remainder })
}

/// Merge repeated neighbours (cyclically) and reject rings that are not
/// proper polygons anymore.
fn clean_ring(mut ring: Vec<Point>, cfg: CutCfg) -> Option<Vec<Point>> {
    ring.dedup_by(|a, b| points_equal(*a, *b, cfg.eps_point));
    while ring.len() > 1 && points_equal(ring[0], ring[ring.len() - 1], cfg.eps_point) {
        ring.pop();
    }
    if ring.len() < 3 || polygon_area(&ring) <= cfg.min_area {
        return None;
    }
    Some(ring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn clean_ring_merges_wraparound_duplicates() {
        let cfg = CutCfg::default();
        let ring = vec![
            vector![0.0, 0.0],
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 10.0],
            vector![0.0, 0.0004],
        ];
        let cleaned = clean_ring(ring, cfg).unwrap();
        assert_eq!(cleaned.len(), 3);
    }

    #[test]
    fn clean_ring_rejects_slivers() {
        let cfg = CutCfg::default();
        let collinear = vec![vector![0.0, 0.0], vector![5.0, 0.0], vector![10.0, 0.0]];
        assert!(clean_ring(collinear, cfg).is_none());
        let two = vec![vector![0.0, 0.0], vector![5.0, 5.0], vector![5.0, 5.0]];
        assert!(clean_ring(two, cfg).is_none());
    }
}
