//! # Configuration Module
//!
//! Constants and settings shared by every stage of the pipeline.
//!
//! ## Modules
//!
//! - [`canvas`]: The editor canvas model all coordinate conversions use
//! - [`settings`]: Output, displacement and fallback defaults

pub mod canvas;
pub mod settings;

pub use canvas::CanvasModel;
pub use settings::{
    DEFAULT_PHYSICAL_HEIGHT_IN, DEFAULT_PHYSICAL_WIDTH_IN, DisplacementSettings,
    FALLBACK_TEXTURE_SIZE, MAX_SURFACE_PIXELS, OutputFormat, OutputSettings, check_surface_size,
};
