use crate::constants::{
    BRIGHTNESS_NEUTRAL, CONTRAST_NEUTRAL, OUTLINE_COLOR, OUTLINE_EDGE_STRENGTH,
    OUTLINE_THICKNESS_PX, TONE_MAPPING_EXPOSURE, VIGNETTE_DARKNESS, VIGNETTE_OFFSET,
};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteParams {
    pub offset: f32,
    pub darkness: f32,
}

impl Default for VignetteParams {
    fn default() -> Self {
        Self {
            offset: VIGNETTE_OFFSET,
            darkness: VIGNETTE_DARKNESS,
        }
    }
}

impl VignetteParams {
    /// Same math as `fs_vignette`; `uv` in [0, 1].
    pub fn apply(&self, rgb: Vec3, uv: Vec2) -> Vec3 {
        let d = (uv - Vec2::splat(0.5)) * self.offset;
        rgb.lerp(Vec3::splat(1.0 - self.darkness), d.dot(d))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorCorrection {
    pub brightness: f32,
    pub contrast: f32,
}

impl Default for ColorCorrection {
    fn default() -> Self {
        Self {
            brightness: BRIGHTNESS_NEUTRAL,
            contrast: CONTRAST_NEUTRAL,
        }
    }
}

impl ColorCorrection {
    /// Same math as `fs_color`.
    pub fn apply(&self, rgb: Vec3) -> Vec3 {
        let lifted = rgb + Vec3::splat(self.brightness);
        (lifted - Vec3::splat(0.5)) * self.contrast + Vec3::splat(0.5)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineStyle {
    pub color: [f32; 3],
    pub edge_strength: f32,
    pub thickness_px: f32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            color: OUTLINE_COLOR,
            edge_strength: OUTLINE_EDGE_STRENGTH,
            thickness_px: OUTLINE_THICKNESS_PX,
        }
    }
}

/// One image-space step of the post chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PostPass {
    Render,
    Outline(OutlineStyle),
    Vignette(VignetteParams),
    ColorCorrection,
}

impl PostPass {
    pub fn label(&self) -> &'static str {
        match self {
            PostPass::Render => "render",
            PostPass::Outline(_) => "outline",
            PostPass::Vignette(_) => "vignette",
            PostPass::ColorCorrection => "color_correction",
        }
    }
}

pub type PostChain = SmallVec<[PostPass; 4]>;

/// The fixed pass order; the vignette is present only when configured.
pub fn post_chain(vignette: Option<VignetteParams>) -> PostChain {
    let mut chain = PostChain::new();
    chain.push(PostPass::Render);
    chain.push(PostPass::Outline(OutlineStyle::default()));
    if let Some(v) = vignette {
        chain.push(PostPass::Vignette(v));
    }
    chain.push(PostPass::ColorCorrection);
    chain
}

/// Live parameters the render backend reads each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostParams {
    pub exposure: f32,
    pub color: ColorCorrection,
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            exposure: TONE_MAPPING_EXPOSURE,
            color: ColorCorrection::default(),
        }
    }
}

/// Parse a range-input value; non-finite input is rejected.
pub fn parse_slider(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_color_correction_is_identity() {
        let cc = ColorCorrection::default();
        let rgb = Vec3::new(0.1, 0.5, 0.9);
        assert!((cc.apply(rgb) - rgb).length() < 1e-6);
    }

    #[test]
    fn contrast_pivots_on_mid_grey() {
        let cc = ColorCorrection {
            brightness: 0.0,
            contrast: 2.0,
        };
        assert!((cc.apply(Vec3::splat(0.5)) - Vec3::splat(0.5)).length() < 1e-6);
        assert!((cc.apply(Vec3::splat(0.75)).x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn vignette_leaves_center_untouched_and_darkens_corners() {
        let v = VignetteParams::default();
        let rgb = Vec3::splat(0.8);
        assert_eq!(v.apply(rgb, Vec2::splat(0.5)), rgb);
        assert!(v.apply(rgb, Vec2::ZERO).x < rgb.x);
    }

    #[test]
    fn slider_parsing() {
        assert_eq!(parse_slider("0.25"), Some(0.25));
        assert_eq!(parse_slider(" 1 "), Some(1.0));
        assert_eq!(parse_slider("abc"), None);
        assert_eq!(parse_slider("NaN"), None);
    }
}
