//! Bulge effect: push convex vertices outward and concave ones inward.

use std::f64::consts::PI;

use crate::geometry::Point;

use super::polygon::signed_area;

/// Fraction of the shorter adjacent edge a full-strength bulge moves a vertex.
const BULGE_SCALE: f64 = 0.1;

/// Strength multiplier for concave vertices, which move inward.
pub const CONCAVE_FACTOR: f64 = 0.3;

/// Displace every vertex along its outward normal.
///
/// `points` is the open core and `strength` is in [0, 1]. Displacement is
/// `curvature * strength * min(edge lengths) * 0.1`, where curvature is the
/// turning angle between the adjacent edges divided by PI. Convex vertices
/// move outward at full strength; concave vertices move inward at 0.3x.
/// Open path endpoints are kept fixed.
pub fn apply_bulge(points: &[Point], strength: f64, closed: bool) -> Vec<Point> {
    let n = points.len();
    if n < 3 || strength <= 0.0 {
        return points.to_vec();
    }

    // Orientation decides which side of an edge is "outside".
    let winding = if signed_area(points) < 0.0 { -1.0 } else { 1.0 };

    (0..n)
        .map(|i| {
            let cur = points[i];
            if !closed && (i == 0 || i == n - 1) {
                return cur;
            }
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            let incoming = cur - prev;
            let outgoing = next - cur;

            let (Some(d_in), Some(d_out)) = (incoming.normalized(), outgoing.normalized()) else {
                return cur;
            };
            let Some(tangent) = (d_in + d_out).normalized() else {
                return cur;
            };
            let normal = Point::new(tangent.y, -tangent.x) * winding;

            let convex = incoming.cross(outgoing) * winding > 0.0;
            let curvature = d_in.dot(d_out).clamp(-1.0, 1.0).acos() / PI;
            let reach = incoming.length().min(outgoing.length());
            let offset = curvature * strength * reach * BULGE_SCALE;

            if convex {
                cur + normal * offset
            } else {
                cur - normal * (offset * CONCAVE_FACTOR)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convex_corner_moves_outward() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let out = apply_bulge(&square, 1.0, true);
        // 90° turn => curvature 0.5, reach 10 => 0.5 along the outward diagonal
        let expected = 0.5 / std::f64::consts::SQRT_2;
        assert!((out[0].x + expected).abs() < 1e-9, "{:?}", out[0]);
        assert!((out[0].y + expected).abs() < 1e-9, "{:?}", out[0]);
        assert!((out[2].x - (10.0 + expected)).abs() < 1e-9);
    }

    #[test]
    fn test_winding_independent() {
        let square: Vec<Point> = vec![
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        let out = apply_bulge(&square, 1.0, true);
        assert!(out[3].x < 0.0 && out[3].y < 0.0);
    }

    #[test]
    fn test_concave_vertex_moves_inward_weaker() {
        // Arrow shape with a notch at (5, 3)
        let shape = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 3.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let out = apply_bulge(&shape, 1.0, true);
        let notch = out[1];
        // The notch deepens: moves further into the shape (larger y)
        assert!(notch.y > 3.0, "{:?}", notch);
        assert!((notch.x - 5.0).abs() < 1e-9);

        // Convex corner at (10, 10) moves outward by more than the notch moved
        let corner_shift = out[3].distance(shape[3]);
        let notch_shift = notch.distance(shape[1]);
        assert!(corner_shift > notch_shift);
    }

    #[test]
    fn test_open_endpoints_fixed() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ];
        let out = apply_bulge(&path, 1.0, false);
        assert_eq!(out[0], path[0]);
        assert_eq!(out[2], path[2]);
    }
}
