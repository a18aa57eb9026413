/// Rendering viewport in physical pixels.
///
/// Always anchored at the surface origin; it tracks the latest surface size.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport cannot be drawn into (e.g. minimized window).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamps the viewport to a render target of the given size.
    #[inline]
    pub fn clamped_to(self, width: u32, height: u32) -> Self {
        Self::new(self.width.min(width), self.height.min(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_any_side_is_zero() {
        assert!(Viewport::new(0, 10).is_empty());
        assert!(Viewport::new(10, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }

    #[test]
    fn clamped_to_smaller_target() {
        let vp = Viewport::new(800, 600).clamped_to(640, 700);
        assert_eq!(vp, Viewport::new(640, 600));
    }
}
