//! Catmull-Rom spline smoothing.

use crate::geometry::Point;

/// Samples per segment at smoothness 100.
pub const MAX_SAMPLES_PER_SEGMENT: usize = 50;

/// Samples per segment for a smoothness in [0, 1], from 1 up to 50.
#[inline]
pub fn samples_per_segment(smoothness: f64) -> usize {
    let t = smoothness.clamp(0.0, 1.0);
    (1.0 + t * (MAX_SAMPLES_PER_SEGMENT - 1) as f64).round() as usize
}

/// Evaluate the uniform Catmull-Rom segment between `p1` and `p2` at `t` in [0, 1].
///
/// ```text
/// q(t) = 0.5 * ( 2·p1
///              + (-p0 + p2)·t
///              + (2·p0 - 5·p1 + 4·p2 - p3)·t²
///              + (-p0 + 3·p1 - 3·p2 + p3)·t³ )
/// ```
#[inline]
pub fn catmull_rom(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let axis = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * (2.0 * b
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Point::new(axis(p0.x, p1.x, p2.x, p3.x), axis(p0.y, p1.y, p2.y, p3.y))
}

/// Resample an outline along a Catmull-Rom spline through its points.
///
/// `points` is the open core. Closed outlines wrap their control points
/// cyclically and produce `n * samples` points with no closing duplicate.
/// Open paths clamp control points at the ends and finish on the last input
/// point.
pub fn smooth(points: &[Point], smoothness: f64, closed: bool) -> Vec<Point> {
    let n = points.len();
    if n < 3 || smoothness <= 0.0 {
        return points.to_vec();
    }
    let samples = samples_per_segment(smoothness);
    let segments = if closed { n } else { n - 1 };
    let mut out = Vec::with_capacity(segments * samples + 1);

    for i in 0..segments {
        let (p0, p1, p2, p3) = if closed {
            (
                points[(i + n - 1) % n],
                points[i],
                points[(i + 1) % n],
                points[(i + 2) % n],
            )
        } else {
            (
                points[i.saturating_sub(1)],
                points[i],
                points[i + 1],
                points[(i + 2).min(n - 1)],
            )
        };
        for s in 0..samples {
            let t = s as f64 / samples as f64;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }

    if !closed {
        out.push(points[n - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_per_segment_range() {
        assert_eq!(samples_per_segment(0.0), 1);
        assert_eq!(samples_per_segment(1.0), 50);
        assert_eq!(samples_per_segment(0.5), 26);
        assert_eq!(samples_per_segment(7.0), 50);
    }

    #[test]
    fn test_catmull_rom_endpoints() {
        let p0 = Point::new(-1.0, 0.0);
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(1.0, 1.0);
        let p3 = Point::new(2.0, 1.0);
        let start = catmull_rom(p0, p1, p2, p3, 0.0);
        let end = catmull_rom(p0, p1, p2, p3, 1.0);
        assert!((start.x - p1.x).abs() < 1e-12 && (start.y - p1.y).abs() < 1e-12);
        assert!((end.x - p2.x).abs() < 1e-12 && (end.y - p2.y).abs() < 1e-12);
    }

    #[test]
    fn test_catmull_rom_collinear_is_linear() {
        let pts: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 0.0)).collect();
        let mid = catmull_rom(pts[0], pts[1], pts[2], pts[3], 0.5);
        assert!((mid.x - 1.5).abs() < 1e-12);
        assert!(mid.y.abs() < 1e-12);
    }

    #[test]
    fn test_closed_sample_count() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let out = smooth(&square, 1.0, true);
        assert_eq!(out.len(), 4 * 50);
        // Every segment starts on an input point
        assert_eq!(out[0], square[0]);
        assert_eq!(out[50], square[1]);
    }

    #[test]
    fn test_open_path_ends_on_last_point() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
        ];
        let out = smooth(&path, 0.2, false);
        let samples = samples_per_segment(0.2);
        assert_eq!(out.len(), 2 * samples + 1);
        assert_eq!(out[0], path[0]);
        assert_eq!(*out.last().unwrap(), path[2]);
    }
}
