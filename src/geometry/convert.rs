//! Conversions between the five coordinate spaces.
//!
//! | Space | Units | Origin |
//! |-------|-------|--------|
//! | inches | physical inches | product top-left |
//! | editor pixels | logical px on the [`CanvasModel`] | canvas top-left, padding included |
//! | normalized | 0-1 fractions | print area top-left |
//! | mockup pixels | raw pixels of the mockup image | image top-left |
//! | stage | output pixels, center anchored | output top-left |
//!
//! Every function is pure. Degenerate input (zero-size boxes, non-positive
//! dimensions) is handled by substitution, never by an error.

use crate::config::CanvasModel;

use super::types::{
    DesignBounds, DesignPlacement, PhysicalDimensions, Placeholder, Point, PrintAreaPixels,
    StageTransform, ViewKey,
};

/// Divisor used in place of a zero (or negative) extent.
#[inline]
fn safe_divisor(extent: f64) -> f64 {
    if extent > 0.0 && extent.is_finite() {
        extent
    } else {
        1.0
    }
}

/// How a mockup image sits inside the effective canvas area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFit {
    /// Canvas pixels per raw image pixel
    pub scale: f64,
    /// Canvas position of the image's top-left corner
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ImageFit {
    /// Map a canvas-space point to raw image pixels.
    #[inline]
    pub fn canvas_to_image(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}

impl CanvasModel {
    /// Print area in editor pixels for a placeholder.
    pub fn placeholder_to_pixels(
        &self,
        placeholder: &Placeholder,
        physical_width: f64,
        physical_height: f64,
    ) -> PrintAreaPixels {
        let ppi = self.px_per_inch(physical_width, physical_height);
        PrintAreaPixels {
            x: self.padding + placeholder.x_in * ppi,
            y: self.padding + placeholder.y_in * ppi,
            width: placeholder.width_in * ppi,
            height: placeholder.height_in * ppi,
            rotation_deg: placeholder.rotation_deg,
        }
    }

    /// Contain-fit a mockup image of the given raw size inside the effective
    /// area, centered. A non-positive image size gets scale 1.
    pub fn fit_image(&self, image_width: f64, image_height: f64) -> ImageFit {
        if !(image_width > 0.0 && image_height > 0.0) {
            log::warn!(
                "Degenerate mockup size {}x{}, using identity fit",
                image_width,
                image_height
            );
            return ImageFit {
                scale: 1.0,
                offset_x: self.padding,
                offset_y: self.padding,
            };
        }
        let scale = self.contain_scale(image_width, image_height);
        let displayed_w = image_width * scale;
        let displayed_h = image_height * scale;
        ImageFit {
            scale,
            offset_x: self.padding + (self.effective_width() - displayed_w) / 2.0,
            offset_y: self.padding + (self.effective_height() - displayed_h) / 2.0,
        }
    }

    /// Print area in raw mockup-image pixels for a placeholder.
    ///
    /// Replays the editor's layout: the placeholder is positioned on the
    /// canvas at `padding + inches * ppi`, while the mockup image is
    /// contain-fit and centered in the same effective area. The placeholder
    /// box is made image-relative, then scaled from canvas to raw pixels.
    pub fn placeholder_to_mockup_pixels(
        &self,
        placeholder: &Placeholder,
        mockup_width: f64,
        mockup_height: f64,
        physical: Option<&PhysicalDimensions>,
    ) -> PrintAreaPixels {
        let dims = PhysicalDimensions::usable_or_default(physical);
        let canvas_box = self.placeholder_to_pixels(placeholder, dims.width, dims.height);
        let fit = self.fit_image(mockup_width, mockup_height);
        let (x, y) = fit.canvas_to_image(canvas_box.x, canvas_box.y);

        PrintAreaPixels {
            x,
            y,
            width: canvas_box.width / fit.scale,
            height: canvas_box.height / fit.scale,
            rotation_deg: canvas_box.rotation_deg,
        }
    }

    /// Placeholder outline (see [`Placeholder::outline`]) in raw mockup pixels.
    pub fn polygon_to_mockup_pixels(
        &self,
        placeholder: &Placeholder,
        mockup_width: f64,
        mockup_height: f64,
        physical: Option<&PhysicalDimensions>,
    ) -> Vec<Point> {
        let dims = PhysicalDimensions::usable_or_default(physical);
        let ppi = self.px_per_inch(dims.width, dims.height);
        let fit = self.fit_image(mockup_width, mockup_height);

        placeholder
            .outline()
            .into_iter()
            .map(|p| {
                let (x, y) =
                    fit.canvas_to_image(self.padding + p.x * ppi, self.padding + p.y * ppi);
                Point::new(x, y)
            })
            .collect()
    }
}

/// Editor pixels per inch on the editor canvas.
///
/// Both dimensions must be positive; callers without usable dimensions use
/// [`CanvasModel::px_per_inch_or_default`].
pub fn calculate_px_per_inch(physical_width: f64, physical_height: f64) -> f64 {
    CanvasModel::EDITOR.px_per_inch(physical_width, physical_height)
}

/// Print area in editor pixels for a placeholder on the editor canvas.
pub fn placeholder_to_pixels(
    placeholder: &Placeholder,
    physical_width: f64,
    physical_height: f64,
) -> PrintAreaPixels {
    CanvasModel::EDITOR.placeholder_to_pixels(placeholder, physical_width, physical_height)
}

/// Print area in raw mockup pixels, using the editor canvas layout.
pub fn placeholder_to_mockup_pixels(
    placeholder: &Placeholder,
    mockup_width: f64,
    mockup_height: f64,
    physical: Option<&PhysicalDimensions>,
) -> PrintAreaPixels {
    CanvasModel::EDITOR.placeholder_to_mockup_pixels(
        placeholder,
        mockup_width,
        mockup_height,
        physical,
    )
}

/// Placeholder outline in raw mockup pixels, using the editor canvas layout.
pub fn polygon_to_mockup_pixels(
    placeholder: &Placeholder,
    mockup_width: f64,
    mockup_height: f64,
    physical: Option<&PhysicalDimensions>,
) -> Vec<Point> {
    CanvasModel::EDITOR.polygon_to_mockup_pixels(placeholder, mockup_width, mockup_height, physical)
}

/// Normalize pixel-space design bounds against a print area.
///
/// A zero-size print area divides by 1 instead, so the result stays finite
/// but is not meaningful.
pub fn pixels_to_normalized(
    design: &DesignBounds,
    area: &PrintAreaPixels,
    view: ViewKey,
    placeholder_id: &str,
) -> DesignPlacement {
    let area_w = safe_divisor(area.width);
    let area_h = safe_divisor(area.height);
    let original_aspect_ratio = (design.width > 0.0 && design.height > 0.0)
        .then(|| design.width / design.height);

    DesignPlacement {
        view,
        placeholder_id: placeholder_id.to_string(),
        x: (design.x - area.x) / area_w,
        y: (design.y - area.y) / area_h,
        w: design.width / area_w,
        h: design.height / area_h,
        rotation_deg: design.rotation_deg,
        original_aspect_ratio,
    }
}

/// Pixel-space bounds of a normalized placement within a print area.
pub fn normalized_to_pixels(placement: &DesignPlacement, area: &PrintAreaPixels) -> DesignBounds {
    DesignBounds {
        x: area.x + placement.x * area.width,
        y: area.y + placement.y * area.height,
        width: placement.w * area.width,
        height: placement.h * area.height,
        rotation_deg: placement.rotation_deg,
    }
}

/// Stage transform (center anchored, radians) of a placement within a print area.
pub fn placement_to_stage(placement: &DesignPlacement, area: &PrintAreaPixels) -> StageTransform {
    let bounds = normalized_to_pixels(placement, area);
    StageTransform {
        center_x: bounds.x + bounds.width / 2.0,
        center_y: bounds.y + bounds.height / 2.0,
        width: bounds.width,
        height: bounds.height,
        rotation_rad: bounds.rotation_deg.to_radians(),
    }
}
