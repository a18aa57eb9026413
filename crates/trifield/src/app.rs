use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use trifield_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use trifield_engine::coords::Viewport;
use trifield_engine::device::Gpu;
use trifield_engine::render::{RenderCtx, RendererConfig, TriangleRenderer};

/// Hosts the triangle renderer and shows the frame rate in the title bar.
pub struct TrifieldApp {
    title: String,
    config: RendererConfig,
    renderer: Option<TriangleRenderer>,
    shown_fps: Option<u32>,
}

impl TrifieldApp {
    pub fn new(title: impl Into<String>, config: RendererConfig) -> Self {
        Self {
            title: title.into(),
            config,
            renderer: None,
            shown_fps: None,
        }
    }

    fn show_fps(&mut self, window: &WindowCtx<'_>, fps: u32) {
        if self.shown_fps == Some(fps) {
            return;
        }
        self.shown_fps = Some(fps);
        window.set_title(&format!("{} | {fps} fps", self.title));
        log::debug!("{fps} fps");
    }
}

impl App for TrifieldApp {
    fn on_window_ready(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> Result<()> {
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
        let size = gpu.size();

        let mut renderer = TriangleRenderer::new(
            &ctx,
            Viewport::new(size.width, size.height),
            self.config.clone(),
        )
        .context("failed to initialize triangle renderer")?;

        renderer.start(window.scheduler());
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_resize(&mut self, window: &WindowCtx<'_>, size: PhysicalSize<u32>) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.on_resize(size.width, size.height);
            renderer.request_draw(window.scheduler());
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let fps = ctx.stats.fps;
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(AppControl::Continue);
        };

        let scheduler = ctx.window.scheduler();
        let drawn = ctx.render(|rctx, target| renderer.render(rctx, target, scheduler))?;
        if drawn.is_none() {
            // No surface texture this time; the callback is spent, so ask again.
            renderer.frame_skipped(scheduler);
        }

        self.show_fps(&ctx.window, fps);
        Ok(AppControl::Continue)
    }

    fn on_exit(&mut self) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.stop();
        }
        self.renderer = None;
    }
}
