//! # Rendering Module
//!
//! Turns loaded assets into finished mockup images.
//!
//! ## Modules
//!
//! - [`loader`]: The [`AssetLoader`] seam and URL/data/file loading
//! - [`context`]: Scoped render stage, released on drop
//! - [`compose`]: Garment + design + displacement compositor
//! - [`encode`]: PNG/JPEG output and data URLs
//! - [`preview`]: Checkerboard design preview with an owned tile cache
//!
//! ## Usage Example
//!
//! ```no_run
//! use drape::render::{ComposeRequest, Compositor};
//!
//! # async fn run() -> Result<(), drape::DrapeError> {
//! let compositor = Compositor::with_url_loader()?;
//! let request = ComposeRequest {
//!     mockup_url: "mockups/tee-front.png".into(),
//!     design_url: "designs/logo.png".into(),
//!     ..Default::default()
//! };
//! let mockup = compositor.compose(&request).await?;
//! std::fs::write("mockup.png", &mockup.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod context;
pub mod encode;
pub mod loader;
pub mod preview;

pub use compose::{ComposeRequest, Compositor, GarmentLayout, Tint, compose_mockup};
pub use context::{ContextTracker, RenderContext};
pub use encode::{RenderedMockup, encode, flatten};
pub use loader::{AssetLoader, UrlAssetLoader};
pub use preview::{CheckerboardCache, PreviewRenderer};
