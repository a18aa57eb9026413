use crate::coords::Viewport;

/// Tracks the output surface size and applies it as the draw viewport.
///
/// Resizes only record the latest size; the viewport is applied at draw time,
/// so calling `on_resize` before the first frame (or several times between
/// frames) is safe and only the last call matters.
#[derive(Debug, Clone, Default)]
pub struct SurfaceController {
    viewport: Viewport,
}

impl SurfaceController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
        }
    }

    /// Records a new surface size. Returns `true` if it changed.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        let next = Viewport::new(width, height);
        if next == self.viewport {
            return false;
        }
        log::debug!("surface resized to {width}x{height}");
        self.viewport = next;
        true
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Sets the pass viewport, clamped to the target.
    ///
    /// Returns `false` if the resulting viewport is empty and drawing should
    /// be skipped.
    pub(super) fn apply(&self, rpass: &mut wgpu::RenderPass<'_>, target_size: (u32, u32)) -> bool {
        let vp = self.viewport.clamped_to(target_size.0, target_size.1);
        if vp.is_empty() {
            return false;
        }
        rpass.set_viewport(0.0, 0.0, vp.width as f32, vp.height as f32, 0.0, 1.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_resize_wins() {
        let mut surface = SurfaceController::default();
        assert!(surface.on_resize(800, 600));
        assert!(surface.on_resize(400, 300));
        assert_eq!(surface.viewport(), Viewport::new(400, 300));
    }

    #[test]
    fn repeated_resize_is_idempotent() {
        let mut surface = SurfaceController::new(640, 480);
        assert!(!surface.on_resize(640, 480));
        assert!(!surface.on_resize(640, 480));
        assert_eq!(surface.viewport(), Viewport::new(640, 480));
    }

    #[test]
    fn zero_size_is_recorded() {
        let mut surface = SurfaceController::new(640, 480);
        surface.on_resize(0, 0);
        assert!(surface.viewport().is_empty());
    }
}
