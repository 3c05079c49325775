//! Placement construction, clamping and dirty-checking.

use super::convert::normalized_to_pixels;
use super::types::{DesignPlacement, MockupPlacement, Point, PrintAreaPixels, ViewKey};

/// Smallest normalized width or height a placement may shrink to.
pub const MIN_PLACEMENT_SIZE: f64 = 0.01;

/// Default position tolerance for [`placements_equal`].
pub const POSITION_TOLERANCE: f64 = 0.001;

/// Rotation tolerance for [`placements_equal`], in degrees.
pub const ROTATION_TOLERANCE_DEG: f64 = 0.1;

/// Centered contain-fit placement of a design inside a print area.
///
/// The design spans the full width when it is relatively wider than the
/// print area, otherwise the full height. Non-positive or non-finite aspect
/// ratios are treated as matching, which fills the whole area.
///
/// ## Example
///
/// ```
/// use drape::geometry::{ViewKey, create_default_placement};
///
/// let p = create_default_placement(2.0, 1.0, ViewKey::Front, "p1");
/// assert_eq!((p.x, p.y, p.w, p.h), (0.0, 0.25, 1.0, 0.5));
/// ```
pub fn create_default_placement(
    design_aspect_ratio: f64,
    print_area_aspect_ratio: f64,
    view: ViewKey,
    placeholder_id: &str,
) -> DesignPlacement {
    let usable = |r: f64| r > 0.0 && r.is_finite();
    let (w, h) = if !usable(design_aspect_ratio) || !usable(print_area_aspect_ratio) {
        (1.0, 1.0)
    } else if design_aspect_ratio > print_area_aspect_ratio {
        (1.0, print_area_aspect_ratio / design_aspect_ratio)
    } else {
        (design_aspect_ratio / print_area_aspect_ratio, 1.0)
    };

    DesignPlacement {
        view,
        placeholder_id: placeholder_id.to_string(),
        x: (1.0 - w) / 2.0,
        y: (1.0 - h) / 2.0,
        w,
        h,
        rotation_deg: 0.0,
        original_aspect_ratio: usable(design_aspect_ratio).then_some(design_aspect_ratio),
    }
}

/// Clamp `value` into `[min, max]`, sending NaN to `min`.
#[inline]
fn clamp_or_min(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// Force a placement fully inside its print area.
///
/// Size is clamped first to `[0.01, 1]`, then position to `[0, 1 - size]`.
/// Rotation is left alone.
pub fn clamp_placement(placement: &DesignPlacement) -> DesignPlacement {
    let w = clamp_or_min(placement.w, MIN_PLACEMENT_SIZE, 1.0);
    let h = clamp_or_min(placement.h, MIN_PLACEMENT_SIZE, 1.0);
    DesignPlacement {
        x: clamp_or_min(placement.x, 0.0, 1.0 - w),
        y: clamp_or_min(placement.y, 0.0, 1.0 - h),
        w,
        h,
        ..placement.clone()
    }
}

/// Approximate equality for dirty-checking before a save.
///
/// View and placeholder must match exactly; position and size compare within
/// `tolerance`, rotation within 0.1 degrees.
pub fn placements_equal(a: &DesignPlacement, b: &DesignPlacement, tolerance: f64) -> bool {
    a.view == b.view
        && a.placeholder_id == b.placeholder_id
        && (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.w - b.w).abs() <= tolerance
        && (a.h - b.h).abs() <= tolerance
        && (a.rotation_deg - b.rotation_deg).abs() <= ROTATION_TOLERANCE_DEG
}

/// Absolute compositor placement for a normalized placement inside a print
/// area given in raw mockup pixels.
pub fn placement_to_mockup_config(
    placement: &DesignPlacement,
    mockup_area: &PrintAreaPixels,
    clip_polygon: Option<Vec<Point>>,
) -> MockupPlacement {
    let bounds = normalized_to_pixels(placement, mockup_area);
    MockupPlacement {
        x: bounds.x,
        y: bounds.y,
        width: bounds.width,
        height: bounds.height,
        rotation_deg: bounds.rotation_deg,
        clip_polygon: clip_polygon.filter(|points| points.len() >= 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(x: f64, y: f64, w: f64, h: f64) -> DesignPlacement {
        DesignPlacement {
            view: ViewKey::Front,
            placeholder_id: "p1".to_string(),
            x,
            y,
            w,
            h,
            rotation_deg: 0.0,
            original_aspect_ratio: None,
        }
    }

    #[test]
    fn test_default_placement_wide_design() {
        let p = create_default_placement(2.0, 1.0, ViewKey::Front, "p1");
        assert!((p.w - 1.0).abs() < 1e-12);
        assert!((p.h - 0.5).abs() < 1e-12);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_default_placement_tall_design() {
        let p = create_default_placement(0.5, 1.0, ViewKey::Left, "p2");
        assert!((p.h - 1.0).abs() < 1e-12);
        assert!((p.w - 0.5).abs() < 1e-12);
        assert!((p.x - 0.25).abs() < 1e-12);
        assert_eq!(p.view, ViewKey::Left);
        assert_eq!(p.original_aspect_ratio, Some(0.5));
    }

    #[test]
    fn test_default_placement_degenerate_ratio() {
        let p = create_default_placement(0.0, 1.0, ViewKey::Front, "p1");
        assert_eq!((p.x, p.y, p.w, p.h), (0.0, 0.0, 1.0, 1.0));
        assert!(p.original_aspect_ratio.is_none());
    }

    #[test]
    fn test_clamp_pulls_inside() {
        let p = clamp_placement(&placement(0.9, -0.2, 0.3, 1.5));
        assert!((p.w - 0.3).abs() < 1e-12);
        assert!((p.h - 1.0).abs() < 1e-12);
        assert!((p.x - 0.7).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert!(p.is_contained());
    }

    #[test]
    fn test_clamp_minimum_size() {
        let p = clamp_placement(&placement(0.5, 0.5, 0.0, -1.0));
        assert!((p.w - MIN_PLACEMENT_SIZE).abs() < 1e-12);
        assert!((p.h - MIN_PLACEMENT_SIZE).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_nan() {
        let p = clamp_placement(&placement(f64::NAN, 0.2, f64::NAN, 0.5));
        assert!(p.x == 0.0 && p.w == MIN_PLACEMENT_SIZE);
    }

    #[test]
    fn test_placements_equal_tolerances() {
        let a = placement(0.5, 0.5, 0.3, 0.3);
        let mut b = placement(0.5005, 0.5, 0.3, 0.3);
        b.rotation_deg = 0.05;
        assert!(placements_equal(&a, &b, POSITION_TOLERANCE));

        b.rotation_deg = 0.5;
        assert!(!placements_equal(&a, &b, POSITION_TOLERANCE));

        let mut c = a.clone();
        c.placeholder_id = "p2".to_string();
        assert!(!placements_equal(&a, &c, POSITION_TOLERANCE));

        let mut d = a.clone();
        d.view = ViewKey::Back;
        assert!(!placements_equal(&a, &d, POSITION_TOLERANCE));
    }

    #[test]
    fn test_mockup_config() {
        let area = PrintAreaPixels {
            x: 100.0,
            y: 200.0,
            width: 400.0,
            height: 300.0,
            rotation_deg: 0.0,
        };
        let mut p = placement(0.25, 0.5, 0.5, 0.5);
        p.rotation_deg = 15.0;
        let config = placement_to_mockup_config(&p, &area, Some(vec![Point::new(0.0, 0.0)]));
        assert!((config.x - 200.0).abs() < 1e-9);
        assert!((config.y - 350.0).abs() < 1e-9);
        assert!((config.width - 200.0).abs() < 1e-9);
        assert!((config.height - 150.0).abs() < 1e-9);
        assert!((config.rotation_deg - 15.0).abs() < 1e-9);
        // Fewer than three clip points are dropped
        assert!(config.clip_polygon.is_none());
    }
}
