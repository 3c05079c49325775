//! # Drape - Print-Area Placement and Mockup Compositing
//!
//! Drape maps user designs onto garment mockups for a print-on-demand
//! storefront. It provides:
//!
//! - **Geometry**: Conversions between physical inches, editor canvas
//!   pixels, normalized placements, raw mockup pixels and stage transforms
//! - **Shape refinement**: Corner rounding, Catmull-Rom smoothing and bulge
//!   for freehand print-area outlines
//! - **Displacement**: Fabric-fold maps built from a garment's luminance
//! - **Rendering**: Async compositor producing PNG/JPEG mockups
//!
//! ## Quick Start
//!
//! ```
//! use drape::geometry::{self, DesignPlacement, Placeholder, ViewKey};
//!
//! // A 10x12 inch front print area on a 20x24 inch garment
//! let front = Placeholder::rect("front", 5.0, 4.0, 10.0, 12.0);
//! let area = geometry::placeholder_to_pixels(&front, 20.0, 24.0);
//!
//! // Fit a square design inside it, then clamp after a user drag
//! let placement = geometry::create_default_placement(1.0, area.aspect_ratio(), ViewKey::Front, "front");
//! let dragged = geometry::clamp_placement(&DesignPlacement { x: 0.9, ..placement });
//! assert!(dragged.is_contained());
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Editor canvas model and default settings |
//! | [`geometry`] | Data model and coordinate converters |
//! | [`shape`] | Polygon refinement and polygon utilities |
//! | [`displacement`] | Displacement maps and the displacement filter |
//! | [`shader`] | Per-pixel primitives |
//! | [`render`] | Asset loading, compositor, encoding, previews |
//! | [`error`] | Error types |

pub mod config;
pub mod displacement;
pub mod error;
pub mod geometry;
pub mod render;
pub mod shader;
pub mod shape;

// Re-exports for convenience
pub use config::CanvasModel;
pub use error::DrapeError;
pub use render::{ComposeRequest, Compositor, RenderedMockup};
