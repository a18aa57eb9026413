use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::WindowId;

use crate::device::Gpu;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Errors returned from any callback stop the loop and are handed back to the
/// caller of `Runtime::run`.
pub trait App {
    /// Called once the window and its GPU context exist.
    ///
    /// Create GPU resources here and request the first frame.
    fn on_window_ready(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> Result<()>;

    /// Called for window events, before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called after the surface has been reconfigured for a new size.
    fn on_resize(&mut self, window: &WindowCtx<'_>, size: PhysicalSize<u32>) {
        let _ = (window, size);
    }

    /// Called for every frame callback.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;

    /// Called once before the window and GPU context are torn down.
    fn on_exit(&mut self) {}
}
