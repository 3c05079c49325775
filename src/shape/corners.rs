//! Corner rounding: pull sharp vertices toward the inside of their angle.

use std::f64::consts::PI;

use crate::geometry::Point;

/// Deviation from a straight angle (radians) below which a vertex is left alone.
pub const CORNER_THRESHOLD: f64 = 0.1;

/// Fraction of the shorter adjacent edge a fully sharp, fully rounded corner moves.
const CORNER_PULL: f64 = 0.1;

/// Interior angle at `cur` between the edges to `prev` and `next`, in [0, PI].
fn interior_angle(prev: Point, cur: Point, next: Point) -> Option<f64> {
    let a = (prev - cur).normalized()?;
    let b = (next - cur).normalized()?;
    Some(a.dot(b).clamp(-1.0, 1.0).acos())
}

/// Move one corner vertex along the bisector of its incoming and outgoing edges.
fn round_vertex(prev: Point, cur: Point, next: Point, roundness: f64) -> Point {
    let Some(angle) = interior_angle(prev, cur, next) else {
        return cur;
    };
    let deviation = (PI - angle).abs();
    if deviation <= CORNER_THRESHOLD {
        return cur;
    }

    let to_prev = prev - cur;
    let to_next = next - cur;
    let (Some(u_prev), Some(u_next)) = (to_prev.normalized(), to_next.normalized()) else {
        return cur;
    };
    // Bisector of the interior angle; zero only for a 180° spike.
    let Some(bisector) = (u_prev + u_next).normalized() else {
        return cur;
    };

    let sharpness = deviation / PI;
    let blend = (sharpness * roundness).min(1.0);
    let reach = to_prev.length().min(to_next.length());
    cur + bisector * (blend * reach * CORNER_PULL)
}

/// Round every corner of an outline.
///
/// `points` is the open core (no closing duplicate). `roundness` is in [0, 1].
/// For open paths the endpoints are kept fixed. The point count never changes.
pub fn round_corners(points: &[Point], roundness: f64, closed: bool) -> Vec<Point> {
    let n = points.len();
    if n < 3 || roundness <= 0.0 {
        return points.to_vec();
    }

    (0..n)
        .map(|i| {
            if !closed && (i == 0 || i == n - 1) {
                return points[i];
            }
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            round_vertex(prev, points[i], next, roundness)
        })
        .collect()
}
