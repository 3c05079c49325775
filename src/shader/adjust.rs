//! Luminance and contrast adjustments on 8-bit channels.

/// Mid-gray on the 8-bit scale; the fixed point of [`contrast_u8`].
pub const MID_GRAY: f32 = 128.0;

/// Rec. 601 luma weights.
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// Perceived brightness of an RGB triple, in [0, 255].
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Stretch a value away from mid-gray by `amount` and clamp to a channel.
///
/// - amount > 1: Increases contrast
/// - amount < 1: Flattens toward gray
/// - amount = 1: No change
#[inline]
pub fn contrast_u8(value: f32, amount: f32) -> u8 {
    (MID_GRAY + (value - MID_GRAY) * amount)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Convert a channel to [0, 1].
#[inline]
pub fn unit(channel: u8) -> f32 {
    channel as f32 / 255.0
}

/// Convert [0, 1] back to a channel, clamped and rounded.
#[inline]
pub fn channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-3);
        assert!(luminance(0, 0, 0).abs() < 1e-6);
        assert!((luminance(255, 0, 0) - 76.245).abs() < 1e-3);
    }

    #[test]
    fn test_contrast_fixed_point() {
        assert_eq!(contrast_u8(128.0, 3.0), 128);
    }

    #[test]
    fn test_contrast_stretch_and_clamp() {
        assert_eq!(contrast_u8(148.0, 1.5), 158);
        assert_eq!(contrast_u8(108.0, 1.5), 98);
        assert_eq!(contrast_u8(250.0, 4.0), 255);
        assert_eq!(contrast_u8(5.0, 4.0), 0);
    }

    #[test]
    fn test_flatten() {
        assert_eq!(contrast_u8(228.0, 0.5), 178);
        assert_eq!(contrast_u8(255.0, 0.0), 128);
    }

    #[test]
    fn test_unit_channel_roundtrip() {
        for c in [0u8, 1, 127, 128, 254, 255] {
            assert_eq!(channel(unit(c)), c);
        }
    }
}
