//! Shared GPU types for the triangle pipeline.

use bytemuck::{Pod, Zeroable};

use crate::scene::{COLOR_COMPONENTS, POSITION_COMPONENTS};

// ── attribute slots ───────────────────────────────────────────────────────

/// Shader location of the per-vertex position attribute.
pub const POSITION_LOCATION: u32 = 0;
/// Shader location of the per-vertex color attribute.
pub const COLOR_LOCATION: u32 = 1;

/// Bind group / binding of the transform uniform.
pub const TRANSFORM_GROUP: u32 = 0;
pub const TRANSFORM_BINDING: u32 = 0;

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![POSITION_LOCATION => Float32x2];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![COLOR_LOCATION => Float32x3];

/// Layout of the position buffer: 2 floats per vertex, tightly packed.
pub(super) fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (POSITION_COMPONENTS * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

/// Layout of the color buffer: 3 floats per vertex, tightly packed.
pub(super) fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (COLOR_COMPONENTS * std::mem::size_of::<f32>()) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &COLOR_ATTRS,
    }
}

// ── transform uniform ─────────────────────────────────────────────────────

/// World-to-clip matrix, column-major as WGSL `mat4x4<f32>` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct TransformUniform {
    pub world_to_clip: [[f32; 4]; 4],
}

impl TransformUniform {
    /// Maps world `[0, 1]^2` onto the clip square, then shifts along X by
    /// `offset + 1`. `offset = -1` is the rest position.
    pub(super) fn from_offset(offset: f32) -> Self {
        let shift = offset + 1.0;
        Self {
            world_to_clip: [
                [2.0, 0.0, 0.0, 0.0],
                [0.0, 2.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [-1.0 + shift, -1.0, 0.0, 1.0],
            ],
        }
    }

    /// Applies the matrix to a world-space point, as the vertex stage does.
    pub(super) fn apply(&self, p: [f32; 2]) -> [f32; 2] {
        let m = &self.world_to_clip;
        [
            m[0][0] * p[0] + m[1][0] * p[1] + m[3][0],
            m[0][1] * p[0] + m[1][1] * p[1] + m[3][1],
        ]
    }
}

/// Minimum binding size for the transform uniform buffer.
///
/// `TransformUniform` is a 64-byte matrix, so the size is never zero.
pub(super) fn transform_ubo_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(std::mem::size_of::<TransformUniform>() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_position_covers_clip_square() {
        let t = TransformUniform::from_offset(-1.0);
        assert_eq!(t.apply([0.0, 0.0]), [-1.0, -1.0]);
        assert_eq!(t.apply([1.0, 1.0]), [1.0, 1.0]);
        assert_eq!(t.apply([0.5, 0.5]), [0.0, 0.0]);
    }

    #[test]
    fn offset_shifts_horizontally_only() {
        let t = TransformUniform::from_offset(0.0);
        assert_eq!(t.apply([0.0, 0.0]), [0.0, -1.0]);

        let t = TransformUniform::from_offset(-2.0);
        assert_eq!(t.apply([1.0, 1.0]), [0.0, 1.0]);
    }

    #[test]
    fn layouts_are_tightly_packed() {
        assert_eq!(position_layout().array_stride, 8);
        assert_eq!(color_layout().array_stride, 12);
        assert_eq!(std::mem::size_of::<TransformUniform>(), 64);
    }
}
