//! Editor preview: a transparent design drawn over a checkerboard.
//!
//! The checkerboard backdrop is memoized per (width, height, cell) in a
//! [`CheckerboardCache`] that the renderer owns. The cache holds at most
//! [`MAX_CACHED_BACKDROPS`] backdrops, evicting the least recently used.
//! Dropping the renderer drops its tiles; nothing is cached at module level.

use std::collections::HashMap;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::DrapeError;
use crate::config::check_surface_size;
use crate::shader::{checkerboard_xy, source_over};

/// Default checkerboard cell edge in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Backdrops kept before the least recently used one is dropped.
pub const MAX_CACHED_BACKDROPS: usize = 4;

const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const DARK: Rgba<u8> = Rgba([204, 204, 204, 255]);

/// Memoized checkerboard backdrops, bounded to [`MAX_CACHED_BACKDROPS`].
#[derive(Debug, Default)]
pub struct CheckerboardCache {
    tiles: HashMap<(u32, u32, u32), Arc<RgbaImage>>,
    /// Keys from least to most recently used
    recent: Vec<(u32, u32, u32)>,
}

impl CheckerboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backdrop of the given size, built on first use.
    ///
    /// The size must already have passed [`check_surface_size`].
    pub fn get_or_build(&mut self, width: u32, height: u32, cell_size: u32) -> Arc<RgbaImage> {
        let key = (width, height, cell_size);
        self.recent.retain(|k| *k != key);
        self.recent.push(key);

        if let Some(tile) = self.tiles.get(&key) {
            return tile.clone();
        }
        while self.recent.len() > MAX_CACHED_BACKDROPS {
            let evicted = self.recent.remove(0);
            self.tiles.remove(&evicted);
        }

        log::debug!("Building {}x{} checkerboard (cell {})", width, height, cell_size);
        let tile = Arc::new(RgbaImage::from_fn(width, height, |x, y| {
            if checkerboard_xy(x, y, cell_size) { LIGHT } else { DARK }
        }));
        self.tiles.insert(key, tile.clone());
        tile
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.recent.clear();
    }
}

/// Renders design previews for the editor.
#[derive(Debug)]
pub struct PreviewRenderer {
    cell_size: u32,
    cache: CheckerboardCache,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE)
    }
}

impl PreviewRenderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            cache: CheckerboardCache::new(),
        }
    }

    pub fn cache(&self) -> &CheckerboardCache {
        &self.cache
    }

    /// Drop all memoized backdrops.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Contain-fit `design` into a `width` x `height` checkerboard, centered.
    pub fn render(
        &mut self,
        design: &RgbaImage,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, DrapeError> {
        check_surface_size(width, height)?;
        let mut out = self.cache.get_or_build(width, height, self.cell_size).as_ref().clone();
        if design.width() == 0 || design.height() == 0 {
            return Ok(out);
        }

        let scale = (width as f64 / design.width() as f64).min(height as f64 / design.height() as f64);
        let fw = ((design.width() as f64 * scale).round() as u32).clamp(1, width);
        let fh = ((design.height() as f64 * scale).round() as u32).clamp(1, height);
        let fitted = if (fw, fh) == design.dimensions() {
            design.clone()
        } else {
            imageops::resize(design, fw, fh, FilterType::Triangle)
        };

        let ox = (width - fw) / 2;
        let oy = (height - fh) / 2;
        for (x, y, src) in fitted.enumerate_pixels() {
            let dst = out.get_pixel_mut(ox + x, oy + y);
            *dst = source_over(*dst, *src);
        }
        Ok(out)
    }
}
