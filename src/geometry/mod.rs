//! # Geometry Module
//!
//! Data model and coordinate conversions for print-area placement.
//!
//! ## Modules
//!
//! - [`types`]: Placeholders, views, placements and pixel-space records
//! - [`convert`]: Inches, editor pixels, normalized, mockup pixels, stage
//! - [`placement`]: Default placement, clamping, approximate equality
//!
//! ## Usage Example
//!
//! ```
//! use drape::geometry::{self, Placeholder, ViewKey};
//!
//! let chest = Placeholder::rect("chest", 2.0, 3.0, 5.0, 4.0);
//! let area = geometry::placeholder_to_pixels(&chest, 20.0, 24.0);
//!
//! let placement = geometry::create_default_placement(1.0, area.aspect_ratio(), ViewKey::Front, "chest");
//! let bounds = geometry::normalized_to_pixels(&placement, &area);
//! let back = geometry::pixels_to_normalized(&bounds, &area, ViewKey::Front, "chest");
//! assert!(geometry::placements_equal(&placement, &back, 1e-9));
//! ```

pub mod convert;
pub mod placement;
pub mod types;

pub use convert::{
    ImageFit, calculate_px_per_inch, normalized_to_pixels, pixels_to_normalized,
    placeholder_to_mockup_pixels, placeholder_to_pixels, placement_to_stage,
    polygon_to_mockup_pixels,
};
pub use placement::{
    MIN_PLACEMENT_SIZE, POSITION_TOLERANCE, ROTATION_TOLERANCE_DEG, clamp_placement,
    create_default_placement, placement_to_mockup_config, placements_equal,
};
pub use types::{
    DesignBounds, DesignPlacement, MockupPlacement, PhysicalDimensions, Placeholder, Point,
    PrintAreaPixels, ShapeType, StageTransform, ViewConfig, ViewKey,
};
