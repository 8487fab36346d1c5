use crate::camera::{parse_fov, ndc_to_screen, Camera, CameraPose, CameraTween};
use crate::config::ViewerConfig;
use crate::constants::{
    IDLE_FOV_DEG, IDLE_SWEEP_AMPLITUDE, IDLE_SWEEP_RATE_PER_MS, LABEL_OFFSET_PX, ORIGIN_LAYER,
};
use crate::idle::{IdleEvent, IdleTimer};
use crate::markers::OriginMarkers;
use crate::orbit::{DragMode, OrbitControls};
use crate::passes::{post_chain, PostChain, PostParams, PostPass};
use crate::picking::{pick, ray_from_ndc};
use crate::scene::{Aabb, Layers, MeshId, Model};
use crate::state::{Effect, Effects, ViewerState};
use glam::{Vec2, Vec3};
use std::time::Duration;

/// What the viewer needs from a renderer. The GPU implementation lives in
/// `render`; tests use a recording stand-in.
pub trait RenderBackend {
    fn load_model(&mut self, model: &Model);
    fn load_markers(&mut self, markers: &OriginMarkers);
    fn set_camera(&mut self, camera: &Camera);
    fn set_outline_targets(&mut self, targets: &[MeshId]);
    fn set_markers_visible(&mut self, visible: bool);
    fn set_post_chain(&mut self, chain: &[PostPass]);
    fn set_post_params(&mut self, params: &PostParams);
    fn render(&mut self, dt_sec: f32) -> anyhow::Result<()>;
}

/// All session state of one viewer page, independent of the DOM and GPU.
///
/// Every UI command is a method returning the DOM [`Effects`] it causes;
/// [`Viewer::frame`] runs the per-frame update and [`Viewer::render_to`]
/// pushes the result to a [`RenderBackend`].
pub struct Viewer {
    pub config: ViewerConfig,
    pub state: ViewerState,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub idle: IdleTimer,
    pub post: PostParams,
    chain: PostChain,
    model: Option<Model>,
    bounds: Option<Aabb>,
    markers: OriginMarkers,
    initial_pose: CameraPose,
    tween: Option<CameraTween>,
    pointer_ndc: Vec2,
    pick_mask: Layers,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let camera = Camera::with_fov(config.fov_deg);
        let orbit = OrbitControls::new(camera.target);
        let initial_pose = CameraPose {
            eye: camera.eye,
            fov_deg: camera.fov_deg,
            target: orbit.target,
        };
        let post = PostParams {
            exposure: config.exposure,
            ..PostParams::default()
        };
        Self {
            idle: IdleTimer::new(config.idle_time_limit, config.countdown_secs),
            chain: post_chain(config.vignette),
            state: ViewerState::default(),
            camera,
            orbit,
            post,
            model: None,
            bounds: None,
            markers: OriginMarkers::default(),
            initial_pose,
            tween: None,
            pointer_ndc: Vec2::new(f32::NAN, f32::NAN),
            pick_mask: Layers::default(),
            config,
        }
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    pub fn markers(&self) -> &OriginMarkers {
        &self.markers
    }

    pub fn post_chain(&self) -> &PostChain {
        &self.chain
    }

    pub fn is_idle(&self) -> bool {
        self.idle.is_idle()
    }

    pub fn initial_pose(&self) -> CameraPose {
        self.initial_pose
    }

    /// Orbit drag in progress or reset animation running.
    pub fn camera_moving(&self) -> bool {
        self.orbit.is_dragging() || self.tween.is_some()
    }

    // ---------------- Asset lifecycle ----------------

    /// Install a successfully loaded model: markers and camera bounds.
    pub fn on_model_loaded(&mut self, model: Model) {
        self.markers = OriginMarkers::build(&model);
        self.markers
            .set_visible(self.state.origins_visible, &mut self.camera.layers);
        let raw = model.bounds();
        let shrunk = raw.shrink(self.config.bounds_margin);
        log::info!(
            "[load] {} meshes, bounds min={:?} max={:?}, camera box min={:?} max={:?}",
            model.meshes.len(),
            raw.min,
            raw.max,
            shrunk.min,
            shrunk.max
        );
        self.bounds = (!raw.is_empty()).then_some(shrunk);
        self.model = Some(model);
    }

    /// The asset could not be loaded; the viewer keeps running without it.
    pub fn on_model_failed(&mut self, err: &dyn std::fmt::Display) {
        log::error!("[load] error loading the model: {}", err);
    }

    // ---------------- Pointer / interaction ----------------

    /// Any mouse move, mouse down, touch start or key press.
    pub fn on_interaction(&mut self, now: Duration) -> Effects {
        self.reset_idle(now)
    }

    pub fn on_pointer_move(&mut self, ndc: Vec2) {
        self.pointer_ndc = ndc;
    }

    fn reset_idle(&mut self, now: Duration) -> Effects {
        let was_waiting = self.idle.is_counting_down() || self.idle.is_idle();
        self.idle.reset(now, !self.state.selection_enabled);
        if !self.state.fov_manually_set {
            self.camera.fov_deg = self.config.fov_deg;
        }
        if was_waiting {
            log::info!("[idle] interaction, back to active");
        }
        let mut fx = Effects::new();
        fx.push(Effect::HideCountdown);
        fx
    }

    fn hit_under_pointer(&self) -> Option<MeshId> {
        if !self.pointer_ndc.is_finite() {
            return None;
        }
        let model = self.model.as_ref()?;
        let ray = ray_from_ndc(&self.camera, self.pointer_ndc);
        pick(model, &ray, self.pick_mask).map(|h| h.mesh)
    }

    /// Click on the canvas.
    pub fn on_click(&mut self) -> Effects {
        let moving = self.camera_moving();
        if !self.state.can_select(moving) {
            return Effects::new();
        }
        let hit = self.hit_under_pointer();
        let name = hit
            .and_then(|id| self.model.as_ref()?.get(id))
            .map(|m| m.name.clone());
        let fx = self.state.click(hit.zip(name.as_deref()), moving);
        if let (Some(id), Some(name)) = (self.state.selected, name) {
            log::info!("[select] {} ({:?})", name, id);
        }
        fx
    }

    pub fn on_deselect(&mut self) -> Effects {
        self.state.deselect()
    }

    pub fn on_toggle_selection(&mut self, now: Duration) -> Effects {
        let mut fx = self.state.toggle_selection();
        fx.extend(self.reset_idle(now));
        fx
    }

    pub fn on_toggle_options(&mut self) -> Effects {
        self.state.toggle_options()
    }

    pub fn on_toggle_settings(&mut self) -> Effects {
        let mut fx = Effects::new();
        fx.push(Effect::ToggleSettingsPanel);
        fx
    }

    pub fn on_toggle_origins(&mut self) -> Effects {
        let visible = self.markers.toggle(&mut self.camera.layers);
        self.state.set_origins_visible(visible)
    }

    // ---------------- Camera commands ----------------

    /// FOV text input. Out-of-range or unparsable input leaves the camera
    /// untouched and surfaces an alert.
    pub fn on_set_fov(&mut self, input: &str) -> Effects {
        let mut fx = Effects::new();
        match parse_fov(input) {
            Ok(fov) => {
                self.camera.fov_deg = fov;
                self.state.fov_manually_set = true;
                log::info!("[camera] fov set to {}", fov);
            }
            Err(e) => fx.push(Effect::Alert(e.to_string())),
        }
        fx
    }

    pub fn on_toggle_lock(&mut self) -> Effects {
        let fx = self.state.toggle_lock();
        self.orbit.enabled = !self.state.camera_locked;
        if self.state.camera_locked {
            self.orbit.pointer_up();
        }
        fx
    }

    /// Animate back to the startup pose.
    pub fn on_reset_camera(&mut self) {
        let from = CameraPose {
            eye: self.camera.eye,
            fov_deg: self.camera.fov_deg,
            target: self.orbit.target,
        };
        self.orbit.stop();
        self.tween = Some(CameraTween::new(from, self.initial_pose));
    }

    pub fn on_orbit_start(&mut self, mode: DragMode, pos_px: Vec2) -> bool {
        self.orbit.pointer_down(mode, pos_px)
    }

    pub fn on_orbit_move(&mut self, pos_px: Vec2, viewport_h: f32) {
        self.orbit.pointer_move(pos_px, viewport_h, &self.camera);
    }

    pub fn on_orbit_end(&mut self) -> bool {
        self.orbit.pointer_up()
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.orbit.wheel(delta_y);
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.camera.aspect = width / height;
        }
    }

    // ---------------- Post parameters ----------------

    pub fn on_brightness(&mut self, v: f32) {
        self.post.color.brightness = v;
    }

    pub fn on_contrast(&mut self, v: f32) {
        self.post.color.contrast = v;
    }

    pub fn on_exposure(&mut self, v: f32) {
        self.post.exposure = v.max(0.0);
    }

    // ---------------- Frame ----------------

    /// Per-frame update: idle timer, hover picking, label placement, idle
    /// motion, reset animation, orbit damping and bounds clamp.
    ///
    /// `now` is the monotonic clock, `viewport` the canvas size in CSS px.
    pub fn frame(&mut self, now: Duration, dt_sec: f32, viewport: Vec2) -> Effects {
        let mut fx = Effects::new();

        for ev in self.idle.poll(now) {
            match ev {
                IdleEvent::CountdownStarted(n) | IdleEvent::CountdownTick(n) => {
                    fx.push(Effect::ShowCountdown(n));
                }
                IdleEvent::EnteredIdle => {
                    fx.push(Effect::HideCountdown);
                    self.state.fov_manually_set = false;
                    log::info!("[idle] attract mode");
                }
            }
        }

        let hit = if self.state.hover_active() {
            self.hit_under_pointer()
        } else {
            None
        };
        self.state.update_hover(hit);

        if let Some(origin) = self
            .state
            .selected
            .and_then(|id| self.model.as_ref()?.get(id))
            .map(|m| m.origin)
        {
            let p = ndc_to_screen(self.camera.project(origin), viewport);
            if p.is_finite() {
                fx.push(Effect::PlaceLabel {
                    x: p.x + LABEL_OFFSET_PX[0],
                    y: p.y + LABEL_OFFSET_PX[1],
                });
            }
        }

        if self.idle.is_idle() && !self.state.selection_enabled {
            self.apply_idle_motion(now);
        }

        if let Some(tween) = self.tween.as_mut() {
            let pose = tween.step(dt_sec);
            self.camera.eye = pose.eye;
            self.camera.fov_deg = pose.fov_deg;
            self.orbit.target = pose.target;
            if tween.is_finished() {
                self.tween = None;
            }
        }

        self.orbit.update(&mut self.camera);

        if let Some(bounds) = &self.bounds {
            self.camera.clamp_to_bounds(bounds);
        }
        fx
    }

    fn apply_idle_motion(&mut self, now: Duration) {
        let phase = (now.as_secs_f64() * 1000.0 * IDLE_SWEEP_RATE_PER_MS).sin() as f32;
        self.camera.fov_deg = IDLE_FOV_DEG;
        self.camera.eye.x = phase * IDLE_SWEEP_AMPLITUDE;
        self.camera.eye.y = phase * IDLE_SWEEP_AMPLITUDE;
        self.camera.target = Vec3::ZERO;
    }

    /// Push camera, outline targets, marker visibility and the post chain, then
    /// render one frame.
    pub fn render_to<B: RenderBackend>(&self, backend: &mut B, dt_sec: f32) -> anyhow::Result<()> {
        backend.set_camera(&self.camera);
        let targets: Vec<MeshId> = self.state.outline_target().into_iter().collect();
        backend.set_outline_targets(&targets);
        backend.set_markers_visible(
            self.markers.is_visible() && self.camera.layers.is_enabled(ORIGIN_LAYER),
        );
        backend.set_post_chain(&self.chain);
        backend.set_post_params(&self.post);
        backend.render(dt_sec)
    }

    /// Upload the loaded model and its markers to `backend`.
    pub fn upload_to<B: RenderBackend>(&self, backend: &mut B) {
        if let Some(model) = &self.model {
            backend.load_model(model);
            backend.load_markers(&self.markers);
        }
    }
}
