use super::helpers;
use wgpu;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Depth buffer matching the surface size. Slides overlap while the
/// entrance ring spins and in orbit mode.
pub(crate) struct DepthTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) = helpers::create_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        Self { tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.tex.destroy();
        *self = Self::new(device, width, height);
    }

    pub(crate) fn destroy(&self) {
        self.tex.destroy();
    }
}
