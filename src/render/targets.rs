use super::helpers;
use super::scene::DEPTH_FORMAT;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen targets for the frame.
///
/// - `hdr_*` hold the scene color in Rgba16Float for post-processing.
/// - `depth_*` is the scene depth buffer at the same size.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
///
/// Textures are kept alongside their views so they live as long as the views.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let full = (width, height);
        let half = bloom_size(width, height);
        let (hdr_tex, hdr_view) = helpers::render_target(device, "hdr_tex", full, HDR_FORMAT);
        let (depth_tex, depth_view) =
            helpers::render_target(device, "depth_tex", full, DEPTH_FORMAT);
        let (bloom_a, bloom_a_view) = helpers::render_target(device, "bloom_a", half, HDR_FORMAT);
        let (bloom_b, bloom_b_view) = helpers::render_target(device, "bloom_b", half, HDR_FORMAT);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        for tex in [&self.hdr_tex, &self.depth_tex, &self.bloom_a, &self.bloom_b] {
            tex.destroy();
        }
        *self = Self::new(device, width, height);
    }
}
