use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START, CAMERA_TARGET, FOV_MAX_DEG,
    FOV_MIN_DEG, RESET_DURATION_SEC,
};
use crate::scene::{Aabb, Layers};
use glam::{Mat4, Vec2, Vec3, Vec4};
use thiserror::Error;

/// Right-handed perspective camera. FOV is vertical, in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    pub layers: Layers,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::from(CAMERA_START),
            target: Vec3::from(CAMERA_TARGET),
            up: Vec3::Y,
            aspect: 1.0,
            fov_deg: CAMERA_FOV_DEG,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            layers: Layers::default(),
        }
    }
}

impl Camera {
    pub fn with_fov(fov_deg: f32) -> Self {
        Self {
            fov_deg,
            ..Self::default()
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_deg.to_radians(),
            self.aspect.max(1e-6),
            self.znear,
            self.zfar,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector from the eye toward the target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Camera-space right and up axes expressed in world space.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let fwd = self.forward();
        let right = fwd.cross(self.up).normalize_or_zero();
        let up = right.cross(fwd).normalize_or_zero();
        (right, up)
    }

    /// Project a world point to normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Vec3 {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w.abs() < f32::EPSILON {
            return Vec3::splat(f32::NAN);
        }
        clip.truncate() / clip.w
    }

    /// Clamp the eye into `bounds`, one axis at a time.
    pub fn clamp_to_bounds(&mut self, bounds: &Aabb) {
        self.eye = bounds.clamp_point(self.eye);
    }
}

/// Map NDC x/y to pixel coordinates in a viewport of `size` (origin top-left).
#[inline]
pub fn ndc_to_screen(ndc: Vec3, size: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * size.x,
        (1.0 - (ndc.y * 0.5 + 0.5)) * size.y,
    )
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FovError {
    #[error("Please enter a valid FOV between {min} and {max}.")]
    OutOfRange { value: f32, min: f32, max: f32 },
    #[error("Please enter a valid FOV between {min} and {max}.")]
    NotANumber { input: String, min: f32, max: f32 },
}

/// Accept `value` as a user FOV iff it lies in the inclusive valid range.
pub fn validate_fov(value: f32) -> Result<f32, FovError> {
    if value.is_nan() || !(FOV_MIN_DEG..=FOV_MAX_DEG).contains(&value) {
        return Err(FovError::OutOfRange {
            value,
            min: FOV_MIN_DEG,
            max: FOV_MAX_DEG,
        });
    }
    Ok(value)
}

/// Parse the FOV text input, then validate it.
pub fn parse_fov(input: &str) -> Result<f32, FovError> {
    let value = input
        .trim()
        .parse::<f32>()
        .map_err(|_| FovError::NotANumber {
            input: input.to_string(),
            min: FOV_MIN_DEG,
            max: FOV_MAX_DEG,
        })?;
    validate_fov(value)
}

/// gsap `power2.inOut`: cubic ease-in-out on `[0, 1]`.
#[inline]
pub fn ease_power2_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Eye, FOV and orbit target, as captured at startup and restored by reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub fov_deg: f32,
    pub target: Vec3,
}

impl CameraPose {
    pub fn lerp(&self, to: &CameraPose, s: f32) -> CameraPose {
        CameraPose {
            eye: self.eye.lerp(to.eye, s),
            fov_deg: self.fov_deg + (to.fov_deg - self.fov_deg) * s,
            target: self.target.lerp(to.target, s),
        }
    }
}

/// Eased interpolation between two poses over a fixed duration.
#[derive(Clone, Debug)]
pub struct CameraTween {
    from: CameraPose,
    to: CameraPose,
    elapsed: f32,
    duration: f32,
}

impl CameraTween {
    pub fn new(from: CameraPose, to: CameraPose) -> Self {
        Self::with_duration(from, to, RESET_DURATION_SEC)
    }

    pub fn with_duration(from: CameraPose, to: CameraPose, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt_sec` and return the pose for the new time.
    pub fn step(&mut self, dt_sec: f32) -> CameraPose {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed / self.duration;
        self.from.lerp(&self.to, ease_power2_in_out(t))
    }
}
