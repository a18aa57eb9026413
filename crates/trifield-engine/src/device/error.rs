/// What the frame loop does after the surface refused to hand out a texture.
///
/// Every action except `Fatal` skips only the current frame; the animation
/// has to request the next one itself.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface lost or outdated (typically mid-resize). Reconfigure at the
    /// current size and draw on the next callback.
    Reconfigure,
    /// Acquire timed out or failed transiently.
    Skip,
    /// Out of memory. The loop stops and the error reaches `Runtime::run`.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigure,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::Skip,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
        }
    }

    /// Whether the animation should keep requesting frames.
    #[inline]
    pub fn keeps_running(self) -> bool {
        self != Self::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        for err in [wgpu::SurfaceError::Lost, wgpu::SurfaceError::Outdated] {
            let action = SurfaceErrorAction::for_error(&err);
            assert_eq!(action, SurfaceErrorAction::Reconfigure);
            assert!(action.keeps_running());
        }
    }

    #[test]
    fn transient_errors_skip() {
        for err in [wgpu::SurfaceError::Timeout, wgpu::SurfaceError::Other] {
            let action = SurfaceErrorAction::for_error(&err);
            assert_eq!(action, SurfaceErrorAction::Skip);
            assert!(action.keeps_running());
        }
    }

    #[test]
    fn out_of_memory_stops_the_loop() {
        let action = SurfaceErrorAction::for_error(&wgpu::SurfaceError::OutOfMemory);
        assert_eq!(action, SurfaceErrorAction::Fatal);
        assert!(!action.keeps_running());
    }
}
