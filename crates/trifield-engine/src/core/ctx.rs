use anyhow::{bail, Result};
use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::device::Gpu;
use crate::render::{FrameScheduler, RenderCtx, RenderTarget};
use crate::time::FrameStats;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Frame scheduling primitive for this window.
    pub fn scheduler(&self) -> &'a dyn FrameScheduler {
        self.window
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub stats: FrameStats,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the next surface texture, calls `draw` with a ready
    /// [`RenderCtx`] and [`RenderTarget`], then presents the frame.
    ///
    /// Returns `Ok(None)` when no texture could be acquired (surface outdated,
    /// timeout). `draw` did not run, so the caller must request the next frame
    /// itself. A fatal surface error is returned as `Err` so the host stops
    /// scheduling frames against a dead surface.
    pub fn render<F, R>(&mut self, draw: F) -> Result<Option<R>>
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>) -> R,
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = self.gpu.handle_surface_error(&err);
                if !action.keeps_running() {
                    bail!("surface is unusable: {err}");
                }
                log::debug!("skipping frame: {err} ({action:?})");
                return Ok(None);
            }
        };

        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
        );

        let size = frame.size();

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        let out = {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, size);
            draw(&rctx, &mut target)
        };

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        Ok(Some(out))
    }
}
