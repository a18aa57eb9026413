use wgpu::util::DeviceExt;

use crate::scene::Scene;

use super::{PipelineHandles, RenderError, ShaderPipeline};

/// GPU-resident copies of a scene's position and color arrays.
///
/// Both buffers are immutable once created (`VERTEX` usage only). Uploading
/// a new scene replaces them wholesale; the old buffers are released when
/// the replacement succeeds.
#[derive(Default)]
pub struct GpuBufferSet {
    positions: Option<wgpu::Buffer>,
    colors: Option<wgpu::Buffer>,
    vertex_count: u32,
    handles: Option<PipelineHandles>,
}

impl GpuBufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `scene`, replacing any previous buffers.
    ///
    /// Requires a compiled pipeline: its attribute locations define the
    /// vertex-buffer slots used at draw time. On error the previous buffers
    /// stay bound.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        pipeline: &ShaderPipeline,
        scene: &Scene,
    ) -> Result<(), RenderError> {
        let vertex_count = u32::try_from(scene.vertex_count())
            .map_err(|_| RenderError::InvalidTriangleCount(scene.len() as u64))?;

        let positions: &[u8] = bytemuck::cast_slice(scene.positions());
        let colors: &[u8] = bytemuck::cast_slice(scene.colors());

        let limit = device.limits().max_buffer_size;
        check_size("position", positions.len(), limit)?;
        check_size("color", colors.len(), limit)?;

        self.handles = Some(pipeline.handles());

        if vertex_count == 0 {
            self.release();
            return Ok(());
        }

        let position_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trifield position vbo"),
            contents: positions,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let color_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("trifield color vbo"),
            contents: colors,
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "uploaded {} triangles ({} + {} bytes)",
            scene.len(),
            positions.len(),
            colors.len()
        );

        self.release();
        self.positions = Some(position_vbo);
        self.colors = Some(color_vbo);
        self.vertex_count = vertex_count;
        Ok(())
    }

    /// Number of vertices in the uploaded scene.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Byte sizes of the `(position, color)` buffers.
    pub fn byte_sizes(&self) -> (u64, u64) {
        let size = |b: &Option<wgpu::Buffer>| b.as_ref().map_or(0, wgpu::Buffer::size);
        (size(&self.positions), size(&self.colors))
    }

    /// Binds both buffers to their attribute slots.
    ///
    /// Returns `false` when there is nothing to draw.
    pub(super) fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) -> bool {
        let (Some(positions), Some(colors), Some(handles)) =
            (self.positions.as_ref(), self.colors.as_ref(), self.handles)
        else {
            return false;
        };

        // Buffer slot index == attribute location: one attribute per buffer.
        rpass.set_vertex_buffer(handles.position_location, positions.slice(..));
        rpass.set_vertex_buffer(handles.color_location, colors.slice(..));
        true
    }

    /// Drops both buffers; wgpu frees them once in-flight frames finish.
    fn release(&mut self) {
        self.positions = None;
        self.colors = None;
        self.vertex_count = 0;
    }
}

fn check_size(what: &'static str, bytes: usize, limit: u64) -> Result<(), RenderError> {
    let required = bytes as u64;
    if required > limit {
        return Err(RenderError::BufferTooLarge {
            what,
            required,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_within_limit_passes() {
        assert!(check_size("position", 1024, 1024).is_ok());
    }

    #[test]
    fn size_over_limit_reports_both_numbers() {
        let err = check_size("color", 2048, 1024).unwrap_err();
        match err {
            RenderError::BufferTooLarge { what, required, limit } => {
                assert_eq!(what, "color");
                assert_eq!(required, 2048);
                assert_eq!(limit, 1024);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn fresh_set_has_nothing_to_draw() {
        let set = GpuBufferSet::new();
        assert_eq!(set.vertex_count(), 0);
        assert_eq!(set.byte_sizes(), (0, 0));
    }
}
