//! Pixel blending for RGBA layers (straight, non-premultiplied alpha).

use image::Rgba;

use super::adjust::{channel, unit};

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0`, `b` when `t = 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Multiply blend of two channels.
#[inline]
pub fn blend_multiply(a: u8, b: u8) -> u8 {
    channel(unit(a) * unit(b))
}

/// Tint a pixel by multiplying its color with `tint`, keeping alpha.
#[inline]
pub fn tint_pixel(pixel: Rgba<u8>, tint: [u8; 3]) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    Rgba([
        blend_multiply(r, tint[0]),
        blend_multiply(g, tint[1]),
        blend_multiply(b, tint[2]),
        a,
    ])
}

/// Porter-Duff source-over: `src` composited on top of `dst`.
pub fn source_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = unit(src.0[3]);
    if src_a <= 0.0 {
        return dst;
    }
    if src_a >= 1.0 {
        return src;
    }
    let dst_a = unit(dst.0[3]);
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |s: u8, d: u8| {
        channel((unit(s) * src_a + unit(d) * dst_a * (1.0 - src_a)) / out_a)
    };
    Rgba([
        mix(src.0[0], dst.0[0]),
        mix(src.0[1], dst.0[1]),
        mix(src.0[2], dst.0[2]),
        channel(out_a),
    ])
}
