//! GPU rendering subsystem.
//!
//! The triangle field renderer and its parts:
//! - `ShaderPipeline`: compiled + linked WGSL program, attribute/uniform slots
//! - `GpuBufferSet`: position and color vertex buffers mirroring the scene
//! - `AnimationDriver`: transform oscillation and single-outstanding frame requests
//! - `SurfaceController`: viewport tracking across resizes
//! - `TriangleRenderer`: owns all of the above behind the public contract
//!
//! Convention:
//! - CPU geometry is in world space `[0, 1]^2`.
//! - Vertex shader converts to clip space with a world-to-clip matrix uniform.

mod animation;
mod buffers;
mod common;
mod ctx;
mod error;
mod pipeline;
mod renderer;
mod surface;

pub use animation::{AnimationDriver, AnimationState, FrameScheduler, Oscillator};
pub use buffers::GpuBufferSet;
pub use common::{COLOR_LOCATION, POSITION_LOCATION, TRANSFORM_BINDING, TRANSFORM_GROUP};
pub use ctx::{RenderCtx, RenderTarget};
pub use error::RenderError;
pub use pipeline::{
    check_program, PipelineHandles, ShaderPipeline, FRAGMENT_ENTRY, TRIANGLE_SHADER, VERTEX_ENTRY,
};
pub use renderer::{DrawCall, RendererConfig, TriangleRenderer, DEFAULT_TRIANGLE_COUNT};
pub use surface::SurfaceController;

#[cfg(test)]
pub(crate) mod test_support {
    /// Creates a device without a surface, or `None` on machines with no
    /// usable adapter (GPU-backed tests then return early).
    pub(crate) fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok()?;

        pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("trifield test device"),
            required_features: wgpu::Features::empty(),
            required_limits: adapter.limits(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .ok()
    }
}
