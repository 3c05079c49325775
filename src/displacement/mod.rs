//! # Displacement Module
//!
//! Simulates how a flat design drapes over fabric folds.
//!
//! ## Modules
//!
//! - [`map`]: Build a grayscale height map from a garment photo
//! - [`filter`]: Warp a layer with that map
//!
//! ## Usage Example
//!
//! ```
//! use drape::displacement::{DisplacementFilter, create_displacement_texture_from_garment};
//! use image::{Rgba, RgbaImage};
//!
//! let garment = RgbaImage::from_pixel(64, 64, Rgba([200, 200, 200, 255]));
//! let map = create_displacement_texture_from_garment(&garment, 1.5);
//!
//! let design = RgbaImage::new(64, 64);
//! let filter = DisplacementFilter::new(&map, 0, 0, 64, 64, 20.0, 20.0)?;
//! let warped = filter.apply(&design);
//! assert_eq!(warped.dimensions(), (64, 64));
//! # Ok::<(), drape::DrapeError>(())
//! ```

pub mod filter;
pub mod map;

pub use filter::DisplacementFilter;
pub use map::{
    DisplacementMap, EncodedImage, PixelSource, create_displacement_texture_from_garment,
    displacement_map_from_bytes,
};
