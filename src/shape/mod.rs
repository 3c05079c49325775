//! # Shape Module
//!
//! Turns a raw, jagged polygon (from a freehand or magnetic-lasso selection)
//! into the smoothed render polygon used for non-rectangular print areas.
//!
//! ## Pipeline
//!
//! Stages run in a fixed order, each consuming the previous stage's output:
//!
//! 1. [`corners`]: round sharp corners (`round_corners` > 0)
//! 2. [`spline`]: Catmull-Rom resampling (`smoothness` > 0)
//! 3. [`bulge`]: outward/inward displacement (`bulge_strength` > 0)
//!
//! ## Usage Example
//!
//! ```
//! use drape::geometry::Point;
//! use drape::shape::{RefinementParams, compute_refined_polygon_points};
//!
//! let outline = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(4.0, 0.0),
//!     Point::new(4.0, 3.0),
//!     Point::new(0.0, 3.0),
//!     Point::new(0.0, 0.0),
//! ];
//! let params = RefinementParams { smoothness: 60.0, ..Default::default() };
//! let refined = compute_refined_polygon_points(&outline, &params);
//! assert_eq!(refined.first(), refined.last());
//! assert!(refined.len() > outline.len());
//! ```

pub mod bulge;
pub mod corners;
pub mod polygon;
pub mod spline;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

pub use bulge::apply_bulge;
pub use corners::round_corners;
pub use polygon::{bounding_box, contains_point, is_closed, open_core, signed_area};
pub use spline::{catmull_rom, smooth};

/// Refinement controls, each on a 0-100 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefinementParams {
    /// Spline sampling density
    pub smoothness: f64,
    /// Convex bump exaggeration
    pub bulge_strength: f64,
    /// Corner pull toward the inside of the angle
    pub round_corners: f64,
}

impl RefinementParams {
    /// True when every stage would be skipped.
    pub fn is_identity(&self) -> bool {
        unit(self.smoothness) <= 0.0
            && unit(self.bulge_strength) <= 0.0
            && unit(self.round_corners) <= 0.0
    }
}

/// Map a 0-100 control onto [0, 1]. NaN maps to 0.
#[inline]
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        (value / 100.0).clamp(0.0, 1.0)
    }
}

/// Run the refinement pipeline over an outline.
///
/// A closed input (first point equal to last) is processed without its
/// closing duplicate and comes back closed. Fewer than three points, or
/// fewer than three distinct core points, return the input unchanged.
pub fn compute_refined_polygon_points(points: &[Point], params: &RefinementParams) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let closed = is_closed(points);
    let core = open_core(points);
    if core.len() < 3 {
        return points.to_vec();
    }

    let mut refined = core.to_vec();

    let roundness = unit(params.round_corners);
    if roundness > 0.0 {
        refined = round_corners(&refined, roundness, closed);
    }

    let smoothness = unit(params.smoothness);
    if smoothness > 0.0 {
        refined = smooth(&refined, smoothness, closed);
    }

    let bulge = unit(params.bulge_strength);
    if bulge > 0.0 {
        refined = apply_bulge(&refined, bulge, closed);
    }

    if closed
        && let Some(&first) = refined.first()
        && refined.last() != Some(&first)
    {
        refined.push(first);
    }
    refined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_too_few_points_identity() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let params = RefinementParams {
            smoothness: 100.0,
            bulge_strength: 100.0,
            round_corners: 100.0,
        };
        assert_eq!(compute_refined_polygon_points(&pts, &params), pts);
    }

    #[test]
    fn test_closed_triangle_of_duplicates_identity() {
        // Three points but only two distinct core points
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 0.0)];
        let params = RefinementParams {
            smoothness: 50.0,
            ..Default::default()
        };
        assert_eq!(compute_refined_polygon_points(&pts, &params), pts);
    }

    #[test]
    fn test_zero_params_identity() {
        let pts = closed_square();
        let out = compute_refined_polygon_points(&pts, &RefinementParams::default());
        assert_eq!(out, pts);
        assert!(RefinementParams::default().is_identity());
    }

    #[test]
    fn test_full_pipeline_stays_closed() {
        let params = RefinementParams {
            smoothness: 100.0,
            bulge_strength: 100.0,
            round_corners: 100.0,
        };
        let out = compute_refined_polygon_points(&closed_square(), &params);
        assert_eq!(out.first(), out.last());
        assert_eq!(out.len(), 4 * 50 + 1);
    }

    #[test]
    fn test_open_path_not_closed() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(10.0, 0.0),
            Point::new(15.0, 5.0),
        ];
        let params = RefinementParams {
            smoothness: 30.0,
            ..Default::default()
        };
        let out = compute_refined_polygon_points(&path, &params);
        assert_eq!(out[0], path[0]);
        assert_eq!(*out.last().unwrap(), path[3]);
    }

    #[test]
    fn test_out_of_range_params_clamped() {
        let params = RefinementParams {
            smoothness: 400.0,
            bulge_strength: -20.0,
            round_corners: f64::NAN,
        };
        let out = compute_refined_polygon_points(&closed_square(), &params);
        assert_eq!(out.len(), 4 * 50 + 1);
    }

    #[test]
    fn test_params_json() {
        let params: RefinementParams =
            serde_json::from_str(r#"{"smoothness": 10, "roundCorners": 5}"#).unwrap();
        assert!((params.round_corners - 5.0).abs() < 1e-9);
        assert!(params.bulge_strength.abs() < 1e-9);
    }
}
