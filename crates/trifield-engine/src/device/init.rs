/// GPU setup options chosen by the binary.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pace presents to the display refresh.
    ///
    /// With vsync the animation advances once per refresh. Without it the
    /// surface uses `AutoNoVsync` and frames run as fast as the GPU allows.
    pub vsync: bool,
}

impl GpuInit {
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self { vsync: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_by_default() {
        assert_eq!(GpuInit::default().present_mode(), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn no_vsync_never_blocks_on_refresh() {
        let init = GpuInit { vsync: false };
        assert_eq!(init.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
