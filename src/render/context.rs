//! Render context: the isolated drawing surface one composite owns.
//!
//! Every compositor call acquires its own `RenderContext` on entry and the
//! context is released when it goes out of scope, whether the call finished,
//! failed, panicked on a blocking thread, or was cancelled by dropping its
//! future. Nothing on the surface is shared between concurrent calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use image::RgbaImage;

use crate::DrapeError;
use crate::config::check_surface_size;
use crate::shader::source_over;

/// Counts contexts handed out and still alive, per compositor.
#[derive(Debug, Default)]
pub struct ContextTracker {
    live: AtomicUsize,
    issued: AtomicU64,
}

impl ContextTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Contexts acquired and not yet released.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Contexts acquired over the tracker's lifetime.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

/// A transparent RGBA stage plus release bookkeeping.
#[derive(Debug)]
pub struct RenderContext {
    id: u64,
    stage: RgbaImage,
    tracker: Arc<ContextTracker>,
}

impl RenderContext {
    /// Acquire a `width` x `height` transparent stage.
    ///
    /// Empty or oversized stages are rejected before anything is allocated
    /// or counted.
    pub fn acquire(
        width: u32,
        height: u32,
        tracker: Arc<ContextTracker>,
    ) -> Result<Self, DrapeError> {
        check_surface_size(width, height)?;
        let id = tracker.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracker.live.fetch_add(1, Ordering::SeqCst);
        log::debug!("Acquired render context #{} ({}x{})", id, width, height);
        Ok(Self {
            id,
            stage: RgbaImage::new(width, height),
            tracker,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.stage.width()
    }

    pub fn height(&self) -> u32 {
        self.stage.height()
    }

    /// Draw `image` with its top-left at (`x`, `y`), clipped to the stage.
    pub fn draw_image(&mut self, image: &RgbaImage, x: i64, y: i64) {
        let (sw, sh) = (self.stage.width() as i64, self.stage.height() as i64);
        for (ix, iy, src) in image.enumerate_pixels() {
            let tx = x + ix as i64;
            let ty = y + iy as i64;
            if tx < 0 || ty < 0 || tx >= sw || ty >= sh {
                continue;
            }
            let dst = self.stage.get_pixel_mut(tx as u32, ty as u32);
            *dst = source_over(*dst, *src);
        }
    }

    /// Composite a full-stage layer over the current contents.
    ///
    /// A layer of a different size is drawn from the top-left and clipped.
    pub fn composite_layer(&mut self, layer: &RgbaImage) {
        self.draw_image(layer, 0, 0);
    }

    pub fn stage(&self) -> &RgbaImage {
        &self.stage
    }

    /// Take the rendered stage and release the context.
    pub fn finish(mut self) -> RgbaImage {
        std::mem::take(&mut self.stage)
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        self.tracker.live.fetch_sub(1, Ordering::SeqCst);
        log::debug!("Released render context #{}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_acquire_release() {
        let tracker = ContextTracker::new();
        {
            let a = RenderContext::acquire(4, 4, tracker.clone()).unwrap();
            let b = RenderContext::acquire(4, 4, tracker.clone()).unwrap();
            assert_eq!(tracker.live(), 2);
            assert_ne!(a.id(), b.id());
        }
        assert_eq!(tracker.live(), 0);
        assert_eq!(tracker.issued(), 2);
    }

    #[test]
    fn test_oversized_stage_rejected() {
        let tracker = ContextTracker::new();
        let err = RenderContext::acquire(u32::MAX, u32::MAX, tracker.clone()).unwrap_err();
        assert!(matches!(err, DrapeError::InvalidSettings(_)));
        assert!(RenderContext::acquire(0, 10, tracker.clone()).is_err());
        assert_eq!(tracker.live(), 0);
        assert_eq!(tracker.issued(), 0);
    }

    #[test]
    fn test_finish_releases() {
        let tracker = ContextTracker::new();
        let ctx = RenderContext::acquire(3, 2, tracker.clone()).unwrap();
        let stage = ctx.finish();
        assert_eq!(stage.dimensions(), (3, 2));
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_draw_clips() {
        let tracker = ContextTracker::new();
        let mut ctx = RenderContext::acquire(4, 4, tracker).unwrap();
        let red = RgbaImage::from_pixel(3, 3, Rgba([255, 0, 0, 255]));
        ctx.draw_image(&red, -1, 2);
        assert_eq!(*ctx.stage().get_pixel(0, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(*ctx.stage().get_pixel(1, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(ctx.stage().get_pixel(2, 2).0[3], 0);
        assert_eq!(ctx.stage().get_pixel(0, 0).0[3], 0);
    }
}
