//! Coordinate transformation functions.

/// Rotate a point around the origin.
///
/// # Parameters
/// - `x`, `y`: Point coordinates
/// - `angle`: Rotation angle in radians (clockwise on screen, y down)
///
/// # Returns
/// Rotated (x, y) coordinates
#[inline]
pub fn rotate(x: f32, y: f32, angle: f32) -> (f32, f32) {
    let (sin_a, cos_a) = angle.sin_cos();
    (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
}

/// A rectangle of `width` x `height` centered at (`center_x`, `center_y`),
/// rotated by `rotation` radians about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl RotatedRect {
    /// Map a screen point into the rect's local frame, as fractions of its
    /// size: (0, 0) is the top-left corner and (1, 1) the bottom-right.
    #[inline]
    pub fn to_local(&self, x: f32, y: f32) -> (f32, f32) {
        let (lx, ly) = rotate(x - self.center_x, y - self.center_y, -self.rotation);
        (lx / self.width + 0.5, ly / self.height + 0.5)
    }

    /// Screen-space corners in drawing order, starting top-left.
    pub fn corners(&self) -> [(f32, f32); 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(x, y)| {
            let (rx, ry) = rotate(x, y, self.rotation);
            (rx + self.center_x, ry + self.center_y)
        })
    }

    /// Integer pixel bounds `(x0, y0, x1, y1)` (exclusive end) clipped to a
    /// `width` x `height` surface, or `None` if nothing is visible.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let corners = self.corners();
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (x, y) in corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return None;
        }
        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(width);
        let y1 = (max_y.ceil().max(0.0) as u32).min(height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}
