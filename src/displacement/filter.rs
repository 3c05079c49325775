//! Warp a layer with a displacement map.
//!
//! The map is laid over the stage where the garment is drawn. For every
//! output pixel the map's red channel shifts the horizontal sample position
//! and the green channel the vertical one:
//!
//! ```text
//! offset_x = (R - 128) / 255 * scale_x
//! offset_y = (G - 128) / 255 * scale_y
//! out(x, y) = layer(x + offset_x, y + offset_y)
//! ```
//!
//! Offsets are centered on mid-gray so a neutral map is an exact identity.

use image::{RgbaImage, imageops::{self, FilterType}};

use crate::DrapeError;
use crate::shader::{MID_GRAY, sample_bilinear, sample_nearest_clamped};

use super::map::DisplacementMap;

/// A displacement map positioned on the stage, with its strength.
#[derive(Debug, Clone)]
pub struct DisplacementFilter {
    /// Map resampled to the on-stage garment size
    texture: RgbaImage,
    origin_x: i64,
    origin_y: i64,
    scale_x: f32,
    scale_y: f32,
}

impl DisplacementFilter {
    /// Place `map` over the stage rectangle at (`x`, `y`) of `width` x `height`.
    ///
    /// `scale_x` / `scale_y` are the maximum offsets in stage pixels.
    pub fn new(
        map: &DisplacementMap,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        scale_x: f32,
        scale_y: f32,
    ) -> Result<Self, DrapeError> {
        if map.is_empty() {
            return Err(DrapeError::InvalidSettings(
                "displacement map has no pixels".to_string(),
            ));
        }
        if width == 0 || height == 0 {
            return Err(DrapeError::InvalidSettings(format!(
                "displacement target must be non-zero, got {}x{}",
                width, height
            )));
        }
        if !(scale_x.is_finite() && scale_y.is_finite()) {
            return Err(DrapeError::InvalidSettings(
                "displacement strength must be finite".to_string(),
            ));
        }

        let texture = if (map.width(), map.height()) == (width, height) {
            map.texture().clone()
        } else {
            imageops::resize(map.texture(), width, height, FilterType::Triangle)
        };

        Ok(Self {
            texture,
            origin_x: x,
            origin_y: y,
            scale_x,
            scale_y,
        })
    }

    /// Stage-pixel offset at (`x`, `y`); edge values extend past the map.
    #[inline]
    pub fn offset_at(&self, x: u32, y: u32) -> (f32, f32) {
        let mx = (x as i64 - self.origin_x) as f32;
        let my = (y as i64 - self.origin_y) as f32;
        match sample_nearest_clamped(&self.texture, mx, my) {
            Some(p) => (
                (p.0[0] as f32 - MID_GRAY) / 255.0 * self.scale_x,
                (p.0[1] as f32 - MID_GRAY) / 255.0 * self.scale_y,
            ),
            None => (0.0, 0.0),
        }
    }

    /// Warp `layer`, returning a new layer of the same size.
    pub fn apply(&self, layer: &RgbaImage) -> RgbaImage {
        let mut out = RgbaImage::new(layer.width(), layer.height());
        for (x, y, pixel) in out.enumerate_pixels_mut() {
            let (dx, dy) = self.offset_at(x, y);
            if dx == 0.0 && dy == 0.0 {
                *pixel = *layer.get_pixel(x, y);
            } else {
                *pixel = sample_bilinear(layer, x as f32 + 0.5 + dx, y as f32 + 0.5 + dy);
            }
        }
        out
    }
}
