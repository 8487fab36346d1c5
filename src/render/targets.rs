use super::helpers::{self, HDR_FORMAT, MASK_FORMAT};
use wgpu;

/// Offscreen targets for the viewer's render pipeline.
///
/// - `hdr_*` holds the lit scene in Rgba16Float, with `depth_*` alongside.
/// - `mask_*` is the outline selection mask (selected mesh in white).
/// - `ping_*` / `pong_*` alternate as intermediate post-pass targets.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) mask_tex: wgpu::Texture,
    pub(crate) mask_view: wgpu::TextureView,
    pub(crate) ping_tex: wgpu::Texture,
    pub(crate) ping_view: wgpu::TextureView,
    pub(crate) pong_tex: wgpu::Texture,
    pub(crate) pong_view: wgpu::TextureView,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = helpers::create_offscreen(device, "hdr_tex", width, height, HDR_FORMAT);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        let (mask_tex, mask_view) =
            helpers::create_offscreen(device, "outline_mask", width, height, MASK_FORMAT);
        let (ping_tex, ping_view) = helpers::create_offscreen(device, "post_ping", width, height, HDR_FORMAT);
        let (pong_tex, pong_view) = helpers::create_offscreen(device, "post_pong", width, height, HDR_FORMAT);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            mask_tex,
            mask_view,
            ping_tex,
            ping_view,
            pong_tex,
            pong_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }

    /// Intermediate target for post pass `i` (0-based, excluding the final pass).
    pub(crate) fn intermediate(&self, i: usize) -> &wgpu::TextureView {
        if i % 2 == 0 {
            &self.ping_view
        } else {
            &self.pong_view
        }
    }
}
