/// Straight RGB color, each channel in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn is_normalized(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

/// A single flat-colored triangle in world space.
///
/// World space is `[0, 1] x [0, 1]`, +Y up. The first vertex is the anchor;
/// the other two sit a small positive offset away from it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [[f32; 2]; 3],
    pub color: Rgb,
}

impl Triangle {
    /// Twice the signed area. Zero means the vertices are collinear.
    pub fn doubled_area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(vertices: [[f32; 2]; 3]) -> Triangle {
        Triangle {
            vertices,
            color: Rgb::default(),
        }
    }

    #[test]
    fn doubled_area_sign_follows_winding() {
        let ccw = tri([[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(ccw.doubled_area(), 1.0);
        let cw = tri([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(cw.doubled_area(), -1.0);
    }

    #[test]
    fn collinear_or_coincident_has_no_area() {
        assert_eq!(tri([[0.0, 0.0], [0.5, 0.5], [1.0, 1.0]]).doubled_area(), 0.0);
        assert_eq!(tri([[0.2, 0.3], [0.2, 0.3], [0.4, 0.1]]).doubled_area(), 0.0);
    }

    #[test]
    fn normalized_channels() {
        assert!(Rgb::new(0.0, 0.5, 1.0).is_normalized());
        assert!(!Rgb::new(0.0, 1.5, 1.0).is_normalized());
    }
}
