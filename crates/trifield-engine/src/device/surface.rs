use winit::dpi::PhysicalSize;

use super::GpuInit;

/// Frames the presentation engine may queue ahead of the display.
const FRAME_LATENCY: u32 = 2;

/// Picks an sRGB format so the scene's straight RGB colors are encoded for
/// display. Falls back to the surface's first format.
pub(crate) fn choose_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// The triangle field is opaque over a cleared background; it is never
/// composited against the desktop.
pub(crate) fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// Builds the initial surface configuration, or `None` if the surface
/// supports no formats on this adapter.
pub(crate) fn surface_config(
    caps: &wgpu::SurfaceCapabilities,
    size: PhysicalSize<u32>,
    init: &GpuInit,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = choose_format(&caps.formats)?;

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: init.present_mode(),
        alpha_mode: choose_alpha_mode(&caps.alpha_modes),
        view_formats: vec![],
        desired_maximum_frame_latency: FRAME_LATENCY,
    })
}

/// Writes the new extent into `config`.
///
/// Returns `false` for a zero-sized surface (minimized window): wgpu cannot
/// configure it, so the previous extent is kept until the window grows again.
pub(crate) fn resize_config(
    config: &mut wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
) -> bool {
    if size.width == 0 || size.height == 0 {
        return false;
    }
    config.width = size.width;
    config.height = size.height;
    true
}
