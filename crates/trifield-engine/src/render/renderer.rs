use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::scene::{Scene, SceneGenerator};

use super::common::TransformUniform;
use super::{
    AnimationDriver, AnimationState, FrameScheduler, GpuBufferSet, Oscillator, RenderCtx,
    RenderError, RenderTarget, ShaderPipeline, SurfaceController,
};

pub const DEFAULT_TRIANGLE_COUNT: u32 = 1_000_000;

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Number of triangles in the scene.
    pub triangle_count: u32,

    /// RNG seed for scene generation. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Per-frame increment of the translation offset.
    pub step: f32,

    /// Background color the frame is cleared to before drawing.
    pub clear_color: wgpu::Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            triangle_count: DEFAULT_TRIANGLE_COUNT,
            seed: None,
            step: Oscillator::DEFAULT_STEP,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

/// One issued draw call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// Animated field of random flat-colored triangles.
///
/// Lifecycle: `new` (compile + generate + upload) -> `start` -> per-frame
/// `render` -> `stop`. GPU resources are released on drop.
pub struct TriangleRenderer {
    config: RendererConfig,
    generator: SceneGenerator,
    scene: Scene,

    pipeline: ShaderPipeline,
    buffers: GpuBufferSet,
    transform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    driver: AnimationDriver,
    surface: SurfaceController,
}

impl TriangleRenderer {
    /// Compiles the pipeline, then generates and uploads the initial scene.
    ///
    /// `viewport` is the current surface size.
    pub fn new(
        ctx: &RenderCtx<'_>,
        viewport: Viewport,
        config: RendererConfig,
    ) -> Result<Self, RenderError> {
        validate_triangle_count(config.triangle_count)?;

        let pipeline = ShaderPipeline::compile(ctx.device, ctx.surface_format)?;

        let mut generator = SceneGenerator::new(config.seed);
        let scene = generator.generate(config.triangle_count as usize);

        let mut buffers = GpuBufferSet::new();
        buffers.upload(ctx.device, &pipeline, &scene)?;

        let driver = AnimationDriver::new(config.step);

        let transform_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trifield transform ubo"),
            contents: bytemuck::bytes_of(&TransformUniform::from_offset(driver.offset())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trifield transform bind group"),
            layout: pipeline.bind_group_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: pipeline.handles().transform_binding,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        log::info!(
            "renderer ready: {} triangles, {} vertices",
            scene.len(),
            buffers.vertex_count()
        );

        Ok(Self {
            config,
            generator,
            scene,
            pipeline,
            buffers,
            transform_ubo,
            bind_group,
            driver,
            surface: SurfaceController::new(viewport.width, viewport.height),
        })
    }

    #[inline]
    pub fn triangle_count(&self) -> u32 {
        self.config.triangle_count
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn buffers(&self) -> &GpuBufferSet {
        &self.buffers
    }

    #[inline]
    pub fn pipeline(&self) -> &ShaderPipeline {
        &self.pipeline
    }

    #[inline]
    pub fn animation_state(&self) -> AnimationState {
        self.driver.state()
    }

    /// Current translation offset.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.driver.offset()
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    /// Regenerates the scene with `count` triangles and re-uploads it.
    ///
    /// Rejected counts leave the current scene and buffers untouched.
    pub fn set_triangle_count(
        &mut self,
        device: &wgpu::Device,
        count: u32,
    ) -> Result<(), RenderError> {
        if let Err(e) = validate_triangle_count(count) {
            log::warn!("{e}; keeping {} triangles", self.config.triangle_count);
            return Err(e);
        }

        let scene = self.generator.generate(count as usize);
        self.buffers.upload(device, &self.pipeline, &scene)?;

        log::info!("scene regenerated: {} -> {count} triangles", self.scene.len());
        self.scene = scene;
        self.config.triangle_count = count;
        Ok(())
    }

    /// Starts the animation loop.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) {
        self.driver.start(scheduler);
    }

    /// Stops the animation loop; pending callbacks become no-ops.
    pub fn stop(&mut self) {
        self.driver.stop();
    }

    /// Requests a redraw, e.g. after a resize. Collapses with a pending request.
    pub fn request_draw<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> bool {
        self.driver.request_draw(scheduler)
    }

    /// Re-arms the loop after a frame callback that had nothing to draw into.
    pub fn frame_skipped<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> bool {
        self.driver.skip_frame(scheduler)
    }

    /// Records the new surface size for subsequent frames.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.surface.on_resize(width, height);
    }

    /// Runs one frame callback.
    ///
    /// Order: advance transform, clear, draw every triangle, re-arm the next
    /// frame. Returns the issued draw call, or `None` if nothing was drawn
    /// (stopped, empty viewport, or empty scene).
    pub fn render<S: FrameScheduler + ?Sized>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scheduler: &S,
    ) -> Option<DrawCall> {
        let offset = self.driver.begin_frame()?;

        let uniform = TransformUniform::from_offset(offset);
        ctx.queue
            .write_buffer(&self.transform_ubo, 0, bytemuck::bytes_of(&uniform));

        let draw = self.encode(target);

        self.driver.request_draw(scheduler);
        draw
    }

    fn encode(&self, target: &mut RenderTarget<'_>) -> Option<DrawCall> {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trifield pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.config.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if !self.surface.apply(&mut rpass, target.size) {
            return None;
        }

        rpass.set_pipeline(self.pipeline.pipeline());
        rpass.set_bind_group(self.pipeline.handles().transform_group, &self.bind_group, &[]);

        if !self.buffers.bind(&mut rpass) {
            return None;
        }

        let vertex_count = self.buffers.vertex_count();
        rpass.draw(0..vertex_count, 0..1);

        Some(DrawCall {
            first_vertex: 0,
            vertex_count,
        })
    }
}

/// Zero triangles, or more than `u32` vertices can address, are rejected.
fn validate_triangle_count(count: u32) -> Result<(), RenderError> {
    if count == 0 || count.checked_mul(3).is_none() {
        return Err(RenderError::InvalidTriangleCount(count as u64));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::animation::tests::CountingScheduler;
    use crate::render::test_support::headless_device;

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    fn config(count: u32) -> RendererConfig {
        RendererConfig {
            triangle_count: count,
            seed: Some(17),
            ..Default::default()
        }
    }

    fn offscreen(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("trifield test target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    /// Runs one frame into a fresh offscreen target and submits it.
    fn frame(
        renderer: &mut TriangleRenderer,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        sched: &CountingScheduler,
    ) -> Option<DrawCall> {
        let texture = offscreen(device, 64, 48);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("trifield test encoder"),
        });

        let ctx = RenderCtx::new(device, queue, FORMAT);
        let draw = {
            let mut target = RenderTarget::new(&mut encoder, &view, (64, 48));
            renderer.render(&ctx, &mut target, sched)
        };
        queue.submit(std::iter::once(encoder.finish()));
        draw
    }

    #[test]
    fn triangle_count_validation() {
        assert!(validate_triangle_count(1).is_ok());
        assert!(validate_triangle_count(DEFAULT_TRIANGLE_COUNT).is_ok());
        assert!(validate_triangle_count(u32::MAX / 3).is_ok());
        assert!(matches!(
            validate_triangle_count(0),
            Err(RenderError::InvalidTriangleCount(0))
        ));
        assert!(validate_triangle_count(u32::MAX / 3 + 1).is_err());
    }

    #[test]
    fn zero_triangles_rejected_at_init() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);
        let result = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(0));
        assert!(matches!(result, Err(RenderError::InvalidTriangleCount(0))));
    }

    #[test]
    fn hundred_triangles_draw_three_hundred_vertices() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);
        let sched = CountingScheduler::default();

        let mut renderer = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(10)).unwrap();
        renderer.set_triangle_count(&device, 100).unwrap();
        renderer.start(&sched);

        let draw = frame(&mut renderer, &device, &queue, &sched);
        assert_eq!(
            draw,
            Some(DrawCall {
                first_vertex: 0,
                vertex_count: 300
            })
        );
        assert_eq!(renderer.buffers().byte_sizes(), (300 * 8, 300 * 12));
        assert_eq!(renderer.animation_state(), AnimationState::FrameRequested);
        assert_eq!(sched.requests.get(), 2);
    }

    #[test]
    fn rejected_count_keeps_previous_scene() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);

        let mut renderer = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(100)).unwrap();
        let before = renderer.scene().clone();

        let err = renderer.set_triangle_count(&device, 0).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTriangleCount(0)));
        assert_eq!(renderer.triangle_count(), 100);
        assert_eq!(renderer.scene(), &before);
        assert_eq!(renderer.buffers().vertex_count(), 300);
    }

    #[test]
    fn stopped_renderer_draws_nothing() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);
        let sched = CountingScheduler::default();

        let mut renderer = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(5)).unwrap();
        renderer.start(&sched);
        renderer.stop();

        assert_eq!(frame(&mut renderer, &device, &queue, &sched), None);
        assert_eq!(sched.requests.get(), 1);
    }

    #[test]
    fn empty_viewport_skips_draw_but_keeps_looping() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);
        let sched = CountingScheduler::default();

        let mut renderer = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(5)).unwrap();
        renderer.on_resize(0, 0);
        renderer.start(&sched);

        assert_eq!(frame(&mut renderer, &device, &queue, &sched), None);
        assert_eq!(renderer.animation_state(), AnimationState::FrameRequested);

        renderer.on_resize(800, 600);
        renderer.on_resize(400, 300);
        assert_eq!(renderer.viewport(), Viewport::new(400, 300));
        assert!(frame(&mut renderer, &device, &queue, &sched).is_some());
    }

    #[test]
    fn resize_request_collapses_with_pending_frame() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);
        let sched = CountingScheduler::default();

        let mut renderer = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(5)).unwrap();
        renderer.start(&sched);
        renderer.on_resize(32, 32);
        assert!(!renderer.request_draw(&sched));
        assert_eq!(sched.requests.get(), 1);
    }

    #[test]
    fn skipped_frame_keeps_loop_alive() {
        let Some((device, queue)) = headless_device() else { return };
        let ctx = RenderCtx::new(&device, &queue, FORMAT);
        let sched = CountingScheduler::default();

        let mut renderer = TriangleRenderer::new(&ctx, Viewport::new(64, 48), config(5)).unwrap();
        renderer.start(&sched);

        // Surface handed out no texture for this callback.
        assert!(renderer.frame_skipped(&sched));
        assert_eq!(sched.requests.get(), 2);
        assert_eq!(renderer.offset(), Oscillator::REST);

        // A resize after the skip still collapses into the re-armed request.
        renderer.on_resize(32, 32);
        assert!(!renderer.request_draw(&sched));

        assert!(frame(&mut renderer, &device, &queue, &sched).is_some());
        assert_eq!(sched.requests.get(), 3);
    }
}
