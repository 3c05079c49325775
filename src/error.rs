//! # Error Types
//!
//! This module defines error types used throughout the drape library.
//!
//! Geometry and polygon functions never fail: degenerate input is handled by
//! documented substitutions. Only asset loading, pixel access and the
//! compositor surface a [`DrapeError`].

use thiserror::Error;

/// Main error type for drape operations
#[derive(Debug, Error)]
pub enum DrapeError {
    /// Asset could not be fetched (network, missing file, bad URL)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Image decode or encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Pixel data exists but cannot be read (tainted or unreadable source)
    #[error("Unreadable pixels: {0}")]
    Unreadable(String),

    /// Invalid render settings (zero-size output, empty texture)
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for DrapeError {
    fn from(err: image::ImageError) -> Self {
        DrapeError::Image(err.to_string())
    }
}
