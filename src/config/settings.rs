//! Render settings shared by the compositor, the CLI and the editor's JSON.
//!
//! All types deserialize from camelCase JSON with every field optional, so a
//! partial settings object from the editor fills in the documented defaults.

use serde::{Deserialize, Serialize};

use crate::DrapeError;

/// Physical width used when a product has no usable dimensions.
pub const DEFAULT_PHYSICAL_WIDTH_IN: f64 = 20.0;

/// Physical height used when a product has no usable dimensions.
pub const DEFAULT_PHYSICAL_HEIGHT_IN: f64 = 24.0;

/// Edge length of the neutral texture emitted when an image cannot be decoded.
pub const FALLBACK_TEXTURE_SIZE: u32 = 512;

/// Largest surface, in pixels, any render stage or texture may allocate.
///
/// 8192x8192 RGBA is 256 MiB.
pub const MAX_SURFACE_PIXELS: u64 = 8192 * 8192;

/// Check that a `width` x `height` RGBA surface is non-empty and allocatable.
pub fn check_surface_size(width: u32, height: u32) -> Result<(), DrapeError> {
    if width == 0 || height == 0 {
        return Err(DrapeError::InvalidSettings(format!(
            "output size must be non-zero, got {}x{}",
            width, height
        )));
    }
    let pixels = width as u64 * height as u64;
    if pixels > MAX_SURFACE_PIXELS {
        return Err(DrapeError::InvalidSettings(format!(
            "output size {}x{} exceeds the {} pixel limit",
            width, height, MAX_SURFACE_PIXELS
        )));
    }
    Ok(())
}

/// Encoded output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// MIME type for data URLs and HTTP responses.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Parse a format name (`png`, `jpeg`, `jpg`), case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// Size and quality of the rasterized mockup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Encoder quality in (0, 1]; only JPEG honors it
    pub quality: f32,
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            quality: 0.8,
            format: OutputFormat::Png,
        }
    }
}

impl OutputSettings {
    /// Reject settings the rasterizer cannot honor.
    pub fn validate(&self) -> Result<(), DrapeError> {
        check_surface_size(self.width, self.height)?;
        if !self.quality.is_finite() || self.quality <= 0.0 || self.quality > 1.0 {
            return Err(DrapeError::InvalidSettings(format!(
                "quality must be in (0, 1], got {}",
                self.quality
            )));
        }
        Ok(())
    }

    /// JPEG encoder quality on the 1-100 scale.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Strength of the fabric-fold warp applied to the design layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplacementSettings {
    /// Set to false to composite the design flat
    pub enabled: bool,
    /// Maximum horizontal offset in garment pixels
    pub horizontal_strength: f32,
    /// Maximum vertical offset in garment pixels
    pub vertical_strength: f32,
    /// Fold contrast multiplier around mid-gray
    pub contrast_boost: f32,
}

impl Default for DisplacementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            horizontal_strength: 20.0,
            vertical_strength: 20.0,
            contrast_boost: 1.5,
        }
    }
}
