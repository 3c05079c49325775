//! Grayscale fold map built from a garment photo.
//!
//! Each pixel becomes its luminance, pushed away from mid-gray by a contrast
//! boost and written to all three color channels with the original alpha.
//! Sources whose pixels can't be read yield a flat mid-gray map instead, so
//! the compositor always has a usable (if effect-free) displacement input.

use std::io::Cursor;

use image::{DynamicImage, ImageReader, Rgba, RgbaImage};

use crate::DrapeError;
use crate::config::{FALLBACK_TEXTURE_SIZE, check_surface_size};
use crate::shader::{MID_GRAY, contrast_u8, luminance};

/// Value written to every color channel of a neutral map.
const NEUTRAL: u8 = MID_GRAY as u8;

/// Something a displacement map can be built from.
///
/// Dimensions may be known even when pixel data is not readable, as with a
/// cross-origin image in a browser or a stream whose header parsed but whose
/// body is corrupt.
pub trait PixelSource {
    /// Reported size, if known.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Full RGBA pixel data.
    fn read_pixels(&self) -> Result<RgbaImage, DrapeError>;
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width(), self.height()))
    }

    fn read_pixels(&self) -> Result<RgbaImage, DrapeError> {
        Ok(self.clone())
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width(), self.height()))
    }

    fn read_pixels(&self) -> Result<RgbaImage, DrapeError> {
        Ok(self.to_rgba8())
    }
}

/// Undecoded image bytes.
///
/// Dimensions come from the header alone, so a truncated body still
/// reports its size.
#[derive(Debug, Clone)]
pub struct EncodedImage<'a>(pub &'a [u8]);

impl PixelSource for EncodedImage<'_> {
    fn dimensions(&self) -> Option<(u32, u32)> {
        ImageReader::new(Cursor::new(self.0))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }

    fn read_pixels(&self) -> Result<RgbaImage, DrapeError> {
        let image = image::load_from_memory(self.0)?;
        Ok(image.to_rgba8())
    }
}

/// A grayscale fold map. R = G = B, alpha copied from the garment.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementMap {
    texture: RgbaImage,
}

impl DisplacementMap {
    /// Flat mid-gray map: produces no displacement.
    pub fn neutral(width: u32, height: u32) -> Self {
        Self {
            texture: RgbaImage::from_pixel(width, height, Rgba([NEUTRAL, NEUTRAL, NEUTRAL, 255])),
        }
    }

    /// Build from readable garment pixels.
    ///
    /// `contrast_boost` > 1 makes folds more pronounced, < 1 flattens them.
    pub fn from_garment(garment: &RgbaImage, contrast_boost: f32) -> Self {
        let mut texture = RgbaImage::new(garment.width(), garment.height());
        for (x, y, pixel) in garment.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            let v = contrast_u8(luminance(r, g, b), contrast_boost);
            texture.put_pixel(x, y, Rgba([v, v, v, a]));
        }
        Self { texture }
    }

    pub fn width(&self) -> u32 {
        self.texture.width()
    }

    pub fn height(&self) -> u32 {
        self.texture.height()
    }

    pub fn is_empty(&self) -> bool {
        self.texture.width() == 0 || self.texture.height() == 0
    }

    /// True when every pixel is neutral gray, i.e. the map moves nothing.
    pub fn is_neutral(&self) -> bool {
        self.texture
            .pixels()
            .all(|p| p.0[0] == NEUTRAL && p.0[1] == NEUTRAL && p.0[2] == NEUTRAL)
    }

    pub fn texture(&self) -> &RgbaImage {
        &self.texture
    }

    pub fn into_texture(self) -> RgbaImage {
        self.texture
    }
}

/// Build a displacement map from a garment, never failing.
///
/// Unreadable pixels produce a neutral map at the source's reported size, or
/// 512x512 if the size is unknown, empty or too large to allocate.
pub fn create_displacement_texture_from_garment(
    source: &dyn PixelSource,
    contrast_boost: f32,
) -> DisplacementMap {
    match source.read_pixels() {
        Ok(pixels) => DisplacementMap::from_garment(&pixels, contrast_boost),
        Err(e) => {
            let (w, h) = source
                .dimensions()
                .filter(|&(w, h)| check_surface_size(w, h).is_ok())
                .unwrap_or((FALLBACK_TEXTURE_SIZE, FALLBACK_TEXTURE_SIZE));
            log::warn!("Garment pixels unreadable ({}), using neutral {}x{} map", e, w, h);
            DisplacementMap::neutral(w, h)
        }
    }
}

/// Build a displacement map straight from encoded garment bytes.
pub fn displacement_map_from_bytes(bytes: &[u8], contrast_boost: f32) -> DisplacementMap {
    create_displacement_texture_from_garment(&EncodedImage(bytes), contrast_boost)
}
