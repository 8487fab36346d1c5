use crate::camera::Camera;
use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_PAN_SPEED, ORBIT_POLAR_EPS, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_BASE,
    ORBIT_ZOOM_SPEED,
};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Orbit camera controller with exponential damping.
///
/// Input handlers only accumulate deltas; `update` applies a damped share of
/// them to the camera each frame, so motion coasts to a stop after release.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
    drag: Option<DragMode>,
    last_pointer: Vec2,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enabled: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            drag: None,
            last_pointer: Vec2::ZERO,
        }
    }

    /// True between a drag start and its end.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begin a drag. Returns true when a drag actually started.
    pub fn pointer_down(&mut self, mode: DragMode, pos_px: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        self.drag = Some(mode);
        self.last_pointer = pos_px;
        true
    }

    /// Accumulate drag motion. `viewport_h` is the element height in pixels.
    pub fn pointer_move(&mut self, pos_px: Vec2, viewport_h: f32, camera: &Camera) {
        let Some(mode) = self.drag else {
            return;
        };
        if !self.enabled {
            return;
        }
        let delta = pos_px - self.last_pointer;
        self.last_pointer = pos_px;
        let h = viewport_h.max(1.0);
        match mode {
            DragMode::Rotate => {
                self.delta_theta -= TAU * delta.x / h * self.rotate_speed;
                self.delta_phi -= TAU * delta.y / h * self.rotate_speed;
            }
            DragMode::Pan => {
                let offset = camera.eye - self.target;
                let target_distance =
                    offset.length() * (camera.fov_deg.to_radians() * 0.5).tan();
                let (right, up) = camera.basis();
                let dx = 2.0 * delta.x * target_distance / h * self.pan_speed;
                let dy = 2.0 * delta.y * target_distance / h * self.pan_speed;
                self.pan_offset += -right * dx + up * dy;
            }
        }
    }

    /// End a drag. Returns true when a drag was in progress.
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Dolly toward (negative `delta_y`) or away from the target.
    pub fn wheel(&mut self, delta_y: f32) {
        if !self.enabled || delta_y == 0.0 {
            return;
        }
        let zoom = ORBIT_ZOOM_BASE.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= zoom;
        } else {
            self.scale /= zoom;
        }
    }

    /// Apply pending motion to `camera` and aim it at the target.
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.eye - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI * 0.5)
        };

        let damping = self.damping_factor.clamp(0.0, 1.0);
        theta += self.delta_theta * damping;
        phi += self.delta_phi * damping;
        phi = phi.clamp(ORBIT_POLAR_EPS, PI - ORBIT_POLAR_EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pan_offset * damping;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = self.target + new_offset;
        camera.target = self.target;

        self.delta_theta *= 1.0 - damping;
        self.delta_phi *= 1.0 - damping;
        self.pan_offset *= 1.0 - damping;
        self.scale = 1.0;
    }

    /// Drop any motion still coasting from earlier input.
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }
}
