use nalgebra::Vector2;

use super::types::Point;

/// Default tolerance for `points_equal` (per coordinate, strict).
pub const POINT_EPS: f64 = 1e-3;

/// Slack on the `[0, 1]` segment parameters in `segment_intersection`.
///
/// Hits that land exactly on a polygon vertex produce parameters like
/// `1.0000000000000002`; without slack one of the two adjacent edges drops out.
pub const PARAM_EPS: f64 = 1e-9;

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).norm()
}

/// Both coordinate deltas strictly below `eps`.
#[inline]
pub fn points_equal(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() < eps && (a.y - b.y).abs() < eps
}

/// Intersection of segments `p1–p2` and `p3–p4` with the default `PARAM_EPS`.
#[inline]
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    segment_intersection_eps(p1, p2, p3, p4, PARAM_EPS)
}

/// Intersection of segments `p1–p2` and `p3–p4` (determinant method).
///
/// Returns `None` when
/// - the denominator is exactly zero (parallel or collinear segments), or
/// - either parameter `ua` (along `p1–p2`) or `ub` (along `p3–p4`) lies
///   outside `[-eps, 1 + eps]`.
///
/// Endpoint contact counts as an intersection. Near-zero denominators are not
/// special-cased; they only matter when both parameters still land in range.
pub fn segment_intersection_eps(
    p1: Point,
    p2: Point,
    p3: Point,
    p4: Point,
    eps: f64,
) -> Option<Point> {
    let denominator = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denominator == 0.0 {
        return None;
    }
    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denominator;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denominator;
    let in_range = |t: f64| t >= -eps && t <= 1.0 + eps;
    if in_range(ua) && in_range(ub) {
        Some(p1 + (p2 - p1) * ua)
    } else {
        None
    }
}

/// Even-odd ray casting towards +x.
///
/// An edge counts when exactly one endpoint is strictly above `p.y` and the
/// interpolated crossing lies strictly right of `p.x`. Points on the boundary
/// may test either way; the asymmetry is relied upon by the cut engine.
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    let n = points.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (points[i].x, points[i].y);
        let (xj, yj) = (points[j].x, points[j].y);
        if (yi > p.y) != (yj > p.y) && p.x < (xj - xi) * (p.y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Arithmetic mean of the vertices (not the area centroid). `None` if empty.
pub fn polygon_center(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc: Point, p| acc + p);
    Some(sum / points.len() as f64)
}

/// Unsigned shoelace area.
pub fn polygon_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut twice = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        twice += p.x * q.y - q.x * p.y;
    }
    twice.abs() / 2.0
}

/// Axis-aligned bounds `(min, max)`. `None` if empty.
pub fn polygon_bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    let bounds = points.iter().fold((first, first), |(lo, hi), p| {
        (
            Vector2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Vector2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    });
    Some(bounds)
}
