//! # Editor Canvas Model
//!
//! The admin product editor draws mockups and placeholders on a fixed logical
//! canvas. Placement math and mockup-pixel math both derive their scale from
//! this one model, so they cannot drift apart.
//!
//! ```text
//! ┌──────────────────── 800 ────────────────────┐
//! │ 40                                       40 │
//! │   ┌────────────── 720 ──────────────┐       │
//! │   │                                 │       │
//! │   │        effective drawing        │ 520   │ 600
//! │   │              area               │       │
//! │   └─────────────────────────────────┘       │
//! │ 40                                       40 │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use drape::config::CanvasModel;
//!
//! let canvas = CanvasModel::EDITOR;
//! assert_eq!(canvas.effective_width(), 720.0);
//! assert_eq!(canvas.effective_height(), 520.0);
//! ```

use crate::geometry::PhysicalDimensions;

/// Logical canvas the editor lays placeholders out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasModel {
    /// Full canvas width in logical pixels
    pub width: f64,

    /// Full canvas height in logical pixels
    pub height: f64,

    /// Margin kept free on every side
    pub padding: f64,
}

impl CanvasModel {
    /// The product editor canvas: 800x600 with 40px padding.
    pub const EDITOR: Self = Self {
        width: 800.0,
        height: 600.0,
        padding: 40.0,
    };

    /// Width left for drawing once padding is removed from both sides.
    #[inline]
    pub fn effective_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height left for drawing once padding is removed from both sides.
    #[inline]
    pub fn effective_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// Uniform contain-fit scale that fits a `width` x `height` area inside
    /// the effective drawing area.
    ///
    /// Callers must pass positive dimensions; see [`CanvasModel::px_per_inch_or_default`]
    /// for the guarded form.
    #[inline]
    pub fn contain_scale(&self, width: f64, height: f64) -> f64 {
        (self.effective_width() / width).min(self.effective_height() / height)
    }

    /// Editor pixels per physical inch.
    ///
    /// ## Example
    ///
    /// ```
    /// use drape::config::CanvasModel;
    ///
    /// // min(720 / 20, 520 / 24) = min(36, 21.67)
    /// let ppi = CanvasModel::EDITOR.px_per_inch(20.0, 24.0);
    /// assert!((ppi - 520.0 / 24.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn px_per_inch(&self, physical_width: f64, physical_height: f64) -> f64 {
        self.contain_scale(physical_width, physical_height)
    }

    /// Pixels per inch for optional physical dimensions, substituting the
    /// default 20x24in product when they are absent or non-positive.
    pub fn px_per_inch_or_default(&self, physical: Option<&PhysicalDimensions>) -> f64 {
        let dims = PhysicalDimensions::usable_or_default(physical);
        self.px_per_inch(dims.width, dims.height)
    }
}

impl Default for CanvasModel {
    fn default() -> Self {
        Self::EDITOR
    }
}
