//! Output encoding for rendered mockups.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage, RgbaImage};

use crate::DrapeError;
use crate::config::{OutputFormat, OutputSettings};
use crate::shader::{channel, lerp, unit};

/// An encoded mockup image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMockup {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl RenderedMockup {
    /// `data:` URL for direct use in an `<img>` tag.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Flatten transparency onto an opaque background color.
pub fn flatten(image: &RgbaImage, background: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let t = unit(a);
        let mix = |c: u8, bg: u8| channel(lerp(unit(bg), unit(c), t));
        Rgb([mix(r, background[0]), mix(g, background[1]), mix(b, background[2])])
    })
}

/// Encode a stage with the requested format and quality.
///
/// PNG keeps transparency and ignores quality. JPEG is flattened onto white
/// and encoded at `quality * 100`.
pub fn encode(image: &RgbaImage, settings: &OutputSettings) -> Result<RenderedMockup, DrapeError> {
    let mut bytes = Vec::new();
    match settings.format {
        OutputFormat::Png => {
            image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        }
        OutputFormat::Jpeg => {
            let rgb = flatten(image, [255, 255, 255]);
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, settings.jpeg_quality());
            encoder.encode_image(&rgb)?;
        }
    }
    Ok(RenderedMockup {
        width: image.width(),
        height: image.height(),
        format: settings.format,
        bytes,
    })
}
