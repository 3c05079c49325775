//! Texture sampling.

use image::{Rgba, RgbaImage};

use super::blend::lerp;

/// Bilinear sample at continuous pixel coordinates.
///
/// Pixel centers sit at `i + 0.5`. Coordinates outside the image are
/// transparent; the edge pixels fade out over half a pixel.
pub fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let texel = |ix: f32, iy: f32| -> [f32; 4] {
        if ix < 0.0 || iy < 0.0 || ix >= w as f32 || iy >= h as f32 {
            return [0.0; 4];
        }
        let p = image.get_pixel(ix as u32, iy as u32).0;
        // Premultiply so transparent neighbors don't bleed their color.
        let a = p[3] as f32 / 255.0;
        [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
    };

    let c00 = texel(x0, y0);
    let c10 = texel(x0 + 1.0, y0);
    let c01 = texel(x0, y0 + 1.0);
    let c11 = texel(x0 + 1.0, y0 + 1.0);

    let mut out = [0.0f32; 4];
    for i in 0..4 {
        let top = lerp(c00[i], c10[i], tx);
        let bottom = lerp(c01[i], c11[i], tx);
        out[i] = lerp(top, bottom, ty);
    }

    let alpha = out[3];
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let scale = 255.0 / alpha;
    let to_u8 = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgba([
        to_u8(out[0] * scale),
        to_u8(out[1] * scale),
        to_u8(out[2] * scale),
        to_u8(alpha),
    ])
}

/// Nearest-pixel lookup with edge clamping. Returns `None` for an empty image.
#[inline]
pub fn sample_nearest_clamped(image: &RgbaImage, x: f32, y: f32) -> Option<Rgba<u8>> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let ix = (x.floor().max(0.0) as u32).min(w - 1);
    let iy = (y.floor().max(0.0) as u32).min(h - 1);
    Some(*image.get_pixel(ix, iy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilinear_at_center_is_exact() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([100, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([200, 0, 0, 255]));
        assert_eq!(sample_bilinear(&img, 0.5, 0.5), Rgba([100, 0, 0, 255]));
        assert_eq!(sample_bilinear(&img, 1.5, 0.5), Rgba([200, 0, 0, 255]));
    }

    #[test]
    fn test_bilinear_midpoint() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([100, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([200, 0, 0, 255]));
        let mid = sample_bilinear(&img, 1.0, 0.5);
        assert_eq!(mid.0[0], 150);
    }

    #[test]
    fn test_bilinear_outside_is_clear() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        assert_eq!(sample_bilinear(&img, -5.0, 2.0).0[3], 0);
        assert_eq!(sample_bilinear(&img, 2.0, 10.0).0[3], 0);
    }

    #[test]
    fn test_transparent_neighbor_no_bleed() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 0]));
        let mid = sample_bilinear(&img, 1.0, 0.5);
        assert_eq!(mid.0[2], 0);
        assert_eq!(mid.0[0], 255);
    }

    #[test]
    fn test_nearest_clamped() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]));
        assert_eq!(sample_nearest_clamped(&img, 50.0, -3.0), Some(Rgba([9, 9, 9, 255])));
        assert_eq!(sample_nearest_clamped(&RgbaImage::new(0, 0), 0.0, 0.0), None);
    }
}
