use super::{Rgb, Triangle};

/// Floats per vertex position (`x, y`).
pub(crate) const POSITION_COMPONENTS: usize = 2;
/// Floats per vertex color (`r, g, b`).
pub(crate) const COLOR_COMPONENTS: usize = 3;

/// An ordered set of triangles, packed for upload.
///
/// Layout (tightly packed, not interleaved):
/// - `positions`: 3 vertices x 2 floats per triangle
/// - `colors`:    3 vertices x 3 floats per triangle, the triangle color
///   replicated on every vertex
///
/// A scene is never edited in place; changing the triangle count produces
/// a new scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl Scene {
    /// Creates an empty scene with room for `count` triangles.
    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(count * 3 * POSITION_COMPONENTS),
            colors: Vec::with_capacity(count * 3 * COLOR_COMPONENTS),
        }
    }

    pub(crate) fn push(&mut self, tri: Triangle) {
        let Rgb { r, g, b } = tri.color;
        for v in tri.vertices {
            self.positions.extend_from_slice(&v);
            self.colors.extend_from_slice(&[r, g, b]);
        }
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / (3 * POSITION_COMPONENTS)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of vertices (three per triangle).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.len() * 3
    }

    /// Packed vertex positions, `6 * len()` floats.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Packed per-vertex colors, `9 * len()` floats.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Returns triangle `index`, or `None` if out of range.
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        if index >= self.len() {
            return None;
        }

        let p = &self.positions[index * 6..index * 6 + 6];
        let c = &self.colors[index * 9..index * 9 + 3];

        Some(Triangle {
            vertices: [[p[0], p[1]], [p[2], p[3]], [p[4], p[5]]],
            color: Rgb::new(c[0], c[1], c[2]),
        })
    }

    /// Iterates triangles in order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.len()).filter_map(|i| self.triangle(i))
    }
}
