//! # Shader Primitives Library
//!
//! Per-pixel building blocks shared by the displacement builder and the
//! compositor. These mirror the operations a GPU fragment stage would do
//! for the same effect, written for `image::RgbaImage` buffers.
//!
//! ## Categories
//!
//! - [`adjust`]: Luminance, contrast around mid-gray, channel conversion
//! - [`blend`]: Linear interpolation, multiply tint, source-over
//! - [`sample`]: Bilinear and nearest texture lookups
//! - [`transform`]: Rotation and rotated-rectangle mapping
//! - [`grid`]: Checkerboard cells
//!
//! ## Example
//!
//! ```rust
//! use drape::shader::*;
//!
//! // Fold intensity for a light-gray fabric pixel, boosted 1.5x
//! let lum = luminance(180, 180, 180);
//! assert_eq!(contrast_u8(lum, 1.5), 206);
//! ```

pub mod adjust;
pub mod blend;
pub mod grid;
pub mod sample;
pub mod transform;

// Re-export all primitives at the top level for convenience
pub use adjust::*;
pub use blend::*;
pub use grid::*;
pub use sample::*;
pub use transform::*;
