//! Polygon utilities shared by the refiner, placeholders and the compositor.

use crate::geometry::Point;

/// True when the outline repeats its first point at the end.
#[inline]
pub fn is_closed(points: &[Point]) -> bool {
    points.len() >= 2 && points.first() == points.last()
}

/// Points with the closing duplicate removed.
#[inline]
pub fn open_core(points: &[Point]) -> &[Point] {
    if is_closed(points) {
        &points[..points.len() - 1]
    } else {
        points
    }
}

/// Shoelace signed area.
///
/// Positive for counter-clockwise winding in a y-up frame, which is
/// clockwise on screen.
pub fn signed_area(points: &[Point]) -> f64 {
    let core = open_core(points);
    let n = core.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n).map(|i| core[i].cross(core[(i + 1) % n])).sum();
    twice / 2.0
}

/// Axis-aligned bounds as `(min, max)`, or `None` for no points.
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

/// Even-odd point-in-polygon test. Closed or open outlines both work.
pub fn contains_point(points: &[Point], x: f64, y: f64) -> bool {
    let core = open_core(points);
    let n = core.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (core[i], core[j]);
        if (pi.y > y) != (pj.y > y) {
            let cross_x = pj.x + (y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
