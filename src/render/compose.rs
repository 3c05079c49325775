//! Mockup compositor: garment + design + fabric folds -> one encoded image.
//!
//! ## Pipeline
//!
//! ```text
//! load garment ─┐
//! load design  ─┼─> contain-fit garment ─> tint ─> draw garment
//!               │                                        │
//!               └─> place design (same scale) ─> clip ─> displace ─> composite ─> encode
//! ```
//!
//! One garment scale factor drives everything after the fit: the design's
//! placement, its clip outline and the displacement strength, so the result
//! looks the same at any output resolution.

use std::sync::Arc;
use std::time::Instant;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::DrapeError;
use crate::config::{DisplacementSettings, OutputSettings};
use crate::displacement::{DisplacementFilter, create_displacement_texture_from_garment};
use crate::geometry::{MockupPlacement, Point};
use crate::shader::{RotatedRect, sample_bilinear, tint_pixel};
use crate::shape::contains_point;

use super::context::{ContextTracker, RenderContext};
use super::encode::{RenderedMockup, encode};
use super::loader::{AssetLoader, UrlAssetLoader};

/// Width of the fallback design placement, as a fraction of the garment width.
pub const DEFAULT_DESIGN_WIDTH_RATIO: f64 = 0.5;

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Garment color multiplied over the mockup photo.
///
/// Deserializes from `"#rrggbb"`, `"rrggbb"` or `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tint(pub [u8; 3]);

impl Tint {
    /// Parse a `#rrggbb` / `rrggbb` hex color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Tint([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// White tint leaves the garment unchanged.
    pub fn is_identity(&self) -> bool {
        self.0 == [255, 255, 255]
    }
}

impl<'de> Deserialize<'de> for Tint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum TintValue {
            Hex(String),
            Triple([u8; 3]),
        }

        match TintValue::deserialize(deserializer)? {
            TintValue::Hex(hex) => Tint::from_hex(&hex)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid tint color '{}'", hex))),
            TintValue::Triple(rgb) => Ok(Tint(rgb)),
        }
    }
}

/// Everything needed to render one mockup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    pub mockup_url: String,
    /// Flattened design with a transparent background
    pub design_url: String,
    #[serde(default)]
    pub displacement: DisplacementSettings,
    #[serde(default)]
    pub tint: Option<Tint>,
    /// Design placement in raw mockup pixels; centered at half width if absent
    #[serde(default)]
    pub placement: Option<MockupPlacement>,
    #[serde(default)]
    pub output: OutputSettings,
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Where the garment lands on the output stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarmentLayout {
    /// Output pixels per raw mockup pixel
    pub scale: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GarmentLayout {
    /// Contain-fit and center a garment in the output.
    pub fn contain(garment_width: u32, garment_height: u32, out_width: u32, out_height: u32) -> Self {
        let (gw, gh) = (garment_width as f64, garment_height as f64);
        let (ow, oh) = (out_width as f64, out_height as f64);
        let scale = (ow / gw).min(oh / gh);
        let width = gw * scale;
        let height = gh * scale;
        Self {
            scale,
            x: (ow - width) / 2.0,
            y: (oh - height) / 2.0,
            width,
            height,
        }
    }

    /// Map a raw mockup point onto the stage.
    #[inline]
    pub fn to_stage(&self, p: Point) -> Point {
        Point::new(self.x + p.x * self.scale, self.y + p.y * self.scale)
    }

    /// Integer pixel size of the drawn garment, at least 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }

    /// Stage rectangle of the design.
    ///
    /// With a placement, its mockup-pixel box is scaled like the garment.
    /// Without one, the design is centered on the garment at half its width,
    /// keeping the design's aspect ratio.
    pub fn design_rect(
        &self,
        placement: Option<&MockupPlacement>,
        design_width: u32,
        design_height: u32,
    ) -> RotatedRect {
        match placement {
            Some(p) => {
                let top_left = self.to_stage(Point::new(p.x, p.y));
                let width = p.width * self.scale;
                let height = p.height * self.scale;
                RotatedRect {
                    center_x: (top_left.x + width / 2.0) as f32,
                    center_y: (top_left.y + height / 2.0) as f32,
                    width: width as f32,
                    height: height as f32,
                    rotation: p.rotation_deg.to_radians() as f32,
                }
            }
            None => {
                let width = self.width * DEFAULT_DESIGN_WIDTH_RATIO;
                let aspect = if design_width > 0 {
                    design_height as f64 / design_width as f64
                } else {
                    1.0
                };
                RotatedRect {
                    center_x: (self.x + self.width / 2.0) as f32,
                    center_y: (self.y + self.height / 2.0) as f32,
                    width: width as f32,
                    height: (width * aspect) as f32,
                    rotation: 0.0,
                }
            }
        }
    }
}

// ============================================================================
// RASTERIZATION
// ============================================================================

/// Draw `design` into a transparent full-stage layer.
///
/// Pixels outside `clip` (stage coordinates) are left transparent. The stage
/// size must already have passed [`check_surface_size`](crate::config::check_surface_size).
pub(crate) fn rasterize_design(
    design: &RgbaImage,
    rect: &RotatedRect,
    clip: Option<&[Point]>,
    width: u32,
    height: u32,
) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    if design.width() == 0 || design.height() == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return layer;
    }
    let Some((x0, y0, x1, y1)) = rect.pixel_bounds(width, height) else {
        return layer;
    };
    let (dw, dh) = (design.width() as f32, design.height() as f32);

    for y in y0..y1 {
        for x in x0..x1 {
            let (sx, sy) = (x as f32 + 0.5, y as f32 + 0.5);
            let (u, v) = rect.to_local(sx, sy);
            if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                continue;
            }
            if let Some(outline) = clip
                && !contains_point(outline, sx as f64, sy as f64)
            {
                continue;
            }
            layer.put_pixel(x, y, sample_bilinear(design, u * dw, v * dh));
        }
    }
    layer
}

/// Render a request's already-loaded assets inside `ctx`.
fn rasterize(
    mut ctx: RenderContext,
    garment: DynamicImage,
    design: DynamicImage,
    request: &ComposeRequest,
) -> Result<RenderedMockup, DrapeError> {
    let started = Instant::now();
    let garment = garment.to_rgba8();
    let design = design.to_rgba8();
    if garment.width() == 0 || garment.height() == 0 {
        return Err(DrapeError::Image("garment image has no pixels".to_string()));
    }

    let layout = GarmentLayout::contain(garment.width(), garment.height(), ctx.width(), ctx.height());
    let (gw, gh) = layout.pixel_size();
    let (gx, gy) = (layout.x.round() as i64, layout.y.round() as i64);

    let mut garment_drawn = imageops::resize(&garment, gw, gh, FilterType::Lanczos3);
    if let Some(tint) = request.tint.filter(|t| !t.is_identity()) {
        for pixel in garment_drawn.pixels_mut() {
            *pixel = tint_pixel(*pixel, tint.0);
        }
    }
    ctx.draw_image(&garment_drawn, gx, gy);

    let rect = layout.design_rect(request.placement.as_ref(), design.width(), design.height());
    let clip: Option<Vec<Point>> = request
        .placement
        .as_ref()
        .and_then(|p| p.clip_polygon.as_ref())
        .filter(|outline| outline.len() >= 3)
        .map(|outline| outline.iter().map(|&p| layout.to_stage(p)).collect());
    let mut layer = rasterize_design(&design, &rect, clip.as_deref(), ctx.width(), ctx.height());

    let settings = &request.displacement;
    if settings.enabled {
        let map = create_displacement_texture_from_garment(&garment, settings.contrast_boost);
        let strength = layout.scale as f32;
        match DisplacementFilter::new(
            &map,
            gx,
            gy,
            gw,
            gh,
            settings.horizontal_strength * strength,
            settings.vertical_strength * strength,
        ) {
            Ok(filter) => layer = filter.apply(&layer),
            Err(e) => log::warn!("Displacement unavailable, compositing flat: {}", e),
        }
    }

    ctx.composite_layer(&layer);
    let context_id = ctx.id();
    let stage = ctx.finish();
    let rendered = encode(&stage, &request.output)?;

    log::debug!(
        "Render context #{} rasterized {}x{} in {:?}",
        context_id,
        rendered.width,
        rendered.height,
        started.elapsed()
    );
    Ok(rendered)
}

// ============================================================================
// COMPOSITOR
// ============================================================================

/// Renders mockups, each call in its own [`RenderContext`].
#[derive(Clone)]
pub struct Compositor {
    loader: Arc<dyn AssetLoader>,
    tracker: Arc<ContextTracker>,
}

impl Compositor {
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self {
            loader,
            tracker: ContextTracker::new(),
        }
    }

    /// A compositor that loads assets from URLs and paths.
    pub fn with_url_loader() -> Result<Self, DrapeError> {
        Ok(Self::new(Arc::new(UrlAssetLoader::new()?)))
    }

    /// Context bookkeeping, for callers that monitor resource use.
    pub fn tracker(&self) -> &Arc<ContextTracker> {
        &self.tracker
    }

    /// Render one mockup.
    ///
    /// Fails only if settings are invalid or an asset cannot be loaded or
    /// decoded. A displacement problem degrades to a flat composite. The
    /// render context is released on every path.
    pub async fn compose(&self, request: &ComposeRequest) -> Result<RenderedMockup, DrapeError> {
        request.output.validate()?;
        let started = Instant::now();
        let ctx = RenderContext::acquire(
            request.output.width,
            request.output.height,
            self.tracker.clone(),
        )?;

        let garment = self.loader.load(&request.mockup_url).await?;
        let design = self.loader.load(&request.design_url).await?;

        let request = request.clone();
        let rendered = tokio::task::spawn_blocking(move || {
            rasterize(ctx, garment, design, &request)
        })
        .await
        .map_err(|e| DrapeError::Image(format!("Render task failed: {}", e)))??;

        log::info!(
            "Composed {}x{} mockup ({} bytes) in {:?}",
            rendered.width,
            rendered.height,
            rendered.bytes.len(),
            started.elapsed()
        );
        Ok(rendered)
    }
}

/// Render one mockup with a fresh URL-loading compositor.
pub async fn compose_mockup(request: &ComposeRequest) -> Result<RenderedMockup, DrapeError> {
    Compositor::with_url_loader()?.compose(request).await
}
