// Host-side tests for the viewer state machine and its render handoff.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod scene {
    include!("../src/scene.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod passes {
    include!("../src/passes.rs");
}
mod config {
    include!("../src/config.rs");
}
mod idle {
    include!("../src/idle.rs");
}
mod markers {
    include!("../src/markers.rs");
}
mod orbit {
    include!("../src/orbit.rs");
}
mod picking {
    include!("../src/picking.rs");
}
mod state {
    include!("../src/state.rs");
}
mod viewer {
    include!("../src/viewer.rs");
}

use camera::Camera;
use config::ViewerConfig;
use glam::{Vec2, Vec3};
use markers::OriginMarkers;
use orbit::DragMode;
use passes::{PostParams, PostPass};
use scene::{MeshId, MeshNode, Model};
use state::{Effect, Toggle};
use std::time::Duration;
use viewer::{RenderBackend, Viewer};

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const DT: f32 = 1.0 / 60.0;
const CENTER: Vec2 = Vec2::ZERO;
const EMPTY_SPACE: Vec2 = Vec2::new(0.95, 0.95);

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

fn quad(id: usize, name: &str, z: f32, half: f32) -> MeshNode {
    MeshNode::new(
        MeshId(id),
        name,
        Vec3::new(0.0, 0.0, z),
        vec![
            Vec3::new(-half, -half, z),
            Vec3::new(half, -half, z),
            Vec3::new(half, half, z),
            Vec3::new(-half, half, z),
        ],
        vec![Vec3::Z; 4],
        vec![0, 1, 2, 0, 2, 3],
        [0.8, 0.8, 0.8, 1.0],
    )
}

// Two slivers at opposite corners so the model spans [-5, 5]^3 without
// blocking the view axis.
fn frame_mesh(id: usize) -> MeshNode {
    MeshNode::new(
        MeshId(id),
        "Frame",
        Vec3::ZERO,
        vec![
            Vec3::new(-5.0, -5.0, -5.0),
            Vec3::new(-4.9, -5.0, -5.0),
            Vec3::new(-5.0, -4.9, -5.0),
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(4.9, 5.0, 5.0),
            Vec3::new(5.0, 4.9, 5.0),
        ],
        vec![Vec3::Z; 6],
        vec![0, 1, 2, 3, 4, 5],
        [0.8, 0.8, 0.8, 1.0],
    )
}

fn bike() -> Model {
    Model::new(vec![quad(0, "Wheel", -2.0, 0.5), frame_mesh(1)])
}

fn loaded_viewer() -> Viewer {
    let mut v = Viewer::new(ViewerConfig::default());
    v.on_resize(VIEWPORT.x, VIEWPORT.y);
    v.on_model_loaded(bike());
    v
}

fn selecting_viewer() -> Viewer {
    let mut v = loaded_viewer();
    v.on_toggle_selection(Duration::ZERO);
    assert!(v.state.selection_enabled);
    v
}

#[derive(Default)]
struct Recorder {
    meshes: usize,
    markers: usize,
    camera: Option<Camera>,
    outline: Vec<MeshId>,
    markers_visible: bool,
    chain: Vec<PostPass>,
    params: Option<PostParams>,
    frames: u32,
}

impl RenderBackend for Recorder {
    fn load_model(&mut self, model: &Model) {
        self.meshes = model.meshes.len();
    }
    fn load_markers(&mut self, markers: &OriginMarkers) {
        self.markers = markers.len();
    }
    fn set_camera(&mut self, camera: &Camera) {
        self.camera = Some(camera.clone());
    }
    fn set_outline_targets(&mut self, targets: &[MeshId]) {
        self.outline = targets.to_vec();
    }
    fn set_markers_visible(&mut self, visible: bool) {
        self.markers_visible = visible;
    }
    fn set_post_chain(&mut self, chain: &[PostPass]) {
        self.chain = chain.to_vec();
    }
    fn set_post_params(&mut self, params: &PostParams) {
        self.params = Some(*params);
    }
    fn render(&mut self, _dt_sec: f32) -> anyhow::Result<()> {
        self.frames += 1;
        Ok(())
    }
}

#[test]
fn wheel_scenario() {
    let mut v = selecting_viewer();

    v.on_pointer_move(CENTER);
    let fx = v.on_click();
    assert_eq!(fx.as_slice(), &[Effect::ShowLabel("Wheel".into())]);
    assert_eq!(v.state.selected, Some(MeshId(0)));
    assert_eq!(v.state.outline_target(), Some(MeshId(0)));

    v.on_pointer_move(EMPTY_SPACE);
    assert!(v.on_click().is_empty());
    assert_eq!(v.state.outline_target(), Some(MeshId(0)));

    let fx = v.on_deselect();
    assert_eq!(fx.as_slice(), &[Effect::FadeOutLabel]);
    assert_eq!(v.state.selected, None);
    assert_eq!(v.state.outline_target(), None);
}

#[test]
fn click_on_empty_space_selects_nothing() {
    let mut v = selecting_viewer();
    v.on_pointer_move(EMPTY_SPACE);
    assert!(v.on_click().is_empty());
    assert_eq!(v.state.selected, None);
}

#[test]
fn selecting_while_selected_is_a_noop() {
    let mut v = selecting_viewer();
    v.on_pointer_move(CENTER);
    v.on_click();
    let before = v.state.clone();
    assert!(v.on_click().is_empty());
    assert_eq!(v.state, before);
}

#[test]
fn deselect_with_nothing_selected_is_a_noop() {
    let mut v = selecting_viewer();
    let before = v.state.clone();
    assert!(v.on_deselect().is_empty());
    assert_eq!(v.state, before);
}

#[test]
fn clicks_are_ignored_with_selection_disabled_or_camera_moving() {
    let mut v = loaded_viewer();
    v.on_pointer_move(CENTER);
    assert!(v.on_click().is_empty());

    v.on_toggle_selection(Duration::ZERO);
    assert!(v.on_orbit_start(DragMode::Rotate, Vec2::new(10.0, 10.0)));
    assert!(v.camera_moving());
    assert!(v.on_click().is_empty());
    assert!(v.on_orbit_end());
    assert!(!v.on_click().is_empty());
}

#[test]
fn disabling_selection_clears_selection_and_hides_label() {
    let mut v = selecting_viewer();
    v.on_pointer_move(CENTER);
    v.on_click();
    let fx = v.on_toggle_selection(secs(1.0));
    assert!(fx.contains(&Effect::SetToggleText {
        toggle: Toggle::Selection,
        text: "Enable Selection",
    }));
    assert!(fx.contains(&Effect::HideLabel));
    assert_eq!(v.state.selected, None);
}

#[test]
fn hover_highlight_follows_the_pointer() {
    let mut v = selecting_viewer();
    v.on_pointer_move(CENTER);
    v.frame(secs(0.1), DT, VIEWPORT);
    assert_eq!(v.state.highlighted, Some(MeshId(0)));

    v.on_pointer_move(EMPTY_SPACE);
    v.frame(secs(0.2), DT, VIEWPORT);
    assert_eq!(v.state.highlighted, None);

    // selection off clears a stale hover
    v.on_pointer_move(CENTER);
    v.frame(secs(0.3), DT, VIEWPORT);
    v.on_toggle_selection(secs(0.3));
    v.frame(secs(0.4), DT, VIEWPORT);
    assert_eq!(v.state.highlighted, None);
}

#[test]
fn label_tracks_the_selected_origin() {
    let mut v = selecting_viewer();
    v.on_pointer_move(CENTER);
    v.on_click();
    let fx = v.frame(secs(0.1), DT, VIEWPORT);
    let placed = fx
        .iter()
        .find_map(|e| match e {
            Effect::PlaceLabel { x, y } => Some(Vec2::new(*x, *y)),
            _ => None,
        })
        .expect("label placement");
    assert!((placed - Vec2::new(410.0, 270.0)).length() < 0.5);
}

#[test]
fn fov_is_set_only_inside_the_valid_range() {
    let mut v = loaded_viewer();
    for ok in ["10", "45", "100"] {
        assert!(v.on_set_fov(ok).is_empty());
        assert_eq!(v.camera.fov_deg, ok.parse::<f32>().unwrap());
        assert!(v.state.fov_manually_set);
    }
    let before = v.camera.fov_deg;
    for bad in ["9.5", "101", "abc", ""] {
        let fx = v.on_set_fov(bad);
        assert_eq!(
            fx.as_slice(),
            &[Effect::Alert(
                "Please enter a valid FOV between 10 and 100.".into()
            )]
        );
        assert_eq!(v.camera.fov_deg, before);
    }
}

#[test]
fn lock_disables_orbit_input() {
    let mut v = loaded_viewer();
    let fx = v.on_toggle_lock();
    assert_eq!(
        fx.as_slice(),
        &[Effect::SetToggleText {
            toggle: Toggle::LockCamera,
            text: "Unlock Camera",
        }]
    );
    assert!(!v.orbit.enabled);
    assert!(!v.on_orbit_start(DragMode::Rotate, Vec2::ZERO));

    v.on_toggle_lock();
    assert!(v.orbit.enabled);
    assert!(v.on_orbit_start(DragMode::Rotate, Vec2::ZERO));
}

#[test]
fn options_toggle_shows_and_hides_the_controls() {
    let mut v = loaded_viewer();
    assert_eq!(v.on_toggle_options().as_slice(), &[Effect::SetOptionsVisible(true)]);
    assert_eq!(v.on_toggle_options().as_slice(), &[Effect::SetOptionsVisible(false)]);
}

#[test]
fn origins_toggle_round_trips() {
    let mut v = loaded_viewer();
    assert_eq!(v.markers().len(), 4);
    assert!(!v.markers().is_visible());
    let layers = v.camera.layers;

    let fx = v.on_toggle_origins();
    assert_eq!(
        fx.as_slice(),
        &[Effect::SetToggleText {
            toggle: Toggle::Origins,
            text: "Hide Origins",
        }]
    );
    assert!(v.markers().is_visible());
    assert!(v.camera.layers.is_enabled(constants::ORIGIN_LAYER));

    v.on_toggle_origins();
    assert!(!v.markers().is_visible());
    assert_eq!(v.camera.layers, layers);
}

#[test]
fn origin_markers_are_never_picked() {
    let mut v = selecting_viewer();
    v.on_toggle_origins();
    v.on_pointer_move(CENTER);
    v.on_click();
    assert_eq!(v.state.selected, Some(MeshId(0)));
}

#[test]
fn idle_countdown_then_attract_then_restore() {
    let mut v = loaded_viewer();
    v.on_interaction(secs(0.0));

    assert!(v.frame(secs(2.9), DT, VIEWPORT).is_empty());
    let fx = v.frame(secs(3.0), DT, VIEWPORT);
    assert_eq!(fx.as_slice(), &[Effect::ShowCountdown(5)]);
    let fx = v.frame(secs(4.0), DT, VIEWPORT);
    assert_eq!(fx.as_slice(), &[Effect::ShowCountdown(4)]);

    let fx = v.frame(secs(8.0), DT, VIEWPORT);
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::ShowCountdown(3),
            Effect::ShowCountdown(2),
            Effect::ShowCountdown(1),
            Effect::HideCountdown,
        ]
    );
    assert!(v.is_idle());
    assert_eq!(v.camera.fov_deg, constants::IDLE_FOV_DEG);

    let fx = v.on_interaction(secs(9.0));
    assert!(fx.contains(&Effect::HideCountdown));
    assert!(!v.is_idle());
    assert_eq!(v.camera.fov_deg, constants::CAMERA_FOV_DEG);
}

#[test]
fn manual_fov_survives_interaction_until_idle() {
    let mut v = loaded_viewer();
    v.on_interaction(secs(0.0));
    v.frame(secs(3.5), DT, VIEWPORT);
    v.on_set_fov("30");
    v.on_interaction(secs(4.0));
    assert_eq!(v.camera.fov_deg, 30.0);

    // entering idle forgets the manual FOV
    v.frame(secs(20.0), DT, VIEWPORT);
    assert!(v.is_idle());
    assert!(!v.state.fov_manually_set);
    v.on_interaction(secs(21.0));
    assert_eq!(v.camera.fov_deg, constants::CAMERA_FOV_DEG);
}

#[test]
fn selection_mode_cancels_idle_scheduling() {
    let mut v = selecting_viewer();
    v.on_interaction(secs(0.0));
    assert!(v.frame(secs(60.0), DT, VIEWPORT).is_empty());
    assert!(!v.is_idle());
}

#[test]
fn eye_stays_inside_shrunk_bounds_once_loaded() {
    let mut v = loaded_viewer();
    let bounds = *v.bounds().expect("bounds");
    assert_eq!(bounds.min, Vec3::splat(-4.5));
    assert_eq!(bounds.max, Vec3::splat(4.5));

    v.camera.eye = Vec3::new(100.0, 0.0, 0.0);
    v.frame(secs(0.1), DT, VIEWPORT);
    assert!(bounds.contains(v.camera.eye));

    for _ in 0..50 {
        v.on_wheel(100.0);
        v.frame(secs(0.2), DT, VIEWPORT);
        assert!(bounds.contains(v.camera.eye));
    }
}

#[test]
fn clamp_is_inactive_after_a_failed_load() {
    let mut v = Viewer::new(ViewerConfig::default());
    v.on_model_failed(&"HTTP 404 for assets/scene.glb");
    assert!(v.model().is_none());
    assert!(v.bounds().is_none());
    assert!(v.markers().is_empty());

    let far = Vec3::new(50.0, 40.0, 30.0);
    v.camera.eye = far;
    v.frame(secs(0.1), DT, VIEWPORT);
    assert!((v.camera.eye - far).length() < 1e-2);
}

#[test]
fn reset_animates_back_to_the_startup_pose() {
    let mut v = loaded_viewer();
    let start = v.initial_pose();
    v.camera.eye = Vec3::new(1.0, 0.5, 2.0);
    v.camera.fov_deg = 30.0;

    v.on_reset_camera();
    assert!(v.camera_moving());
    v.frame(secs(0.1), 0.5, VIEWPORT);
    assert!(v.camera_moving());
    v.frame(secs(0.2), 0.5, VIEWPORT);
    v.frame(secs(0.3), 0.6, VIEWPORT);
    assert!(!v.camera_moving());

    assert!((v.camera.eye - start.eye).length() < 1e-4);
    assert_eq!(v.camera.fov_deg, start.fov_deg);
    assert_eq!(v.orbit.target, start.target);
}

#[test]
fn post_chain_order_is_fixed() {
    let studio = Viewer::new(ViewerConfig::studio());
    let labels: Vec<&str> = studio.post_chain().iter().map(|p| p.label()).collect();
    assert_eq!(labels, ["render", "outline", "color_correction"]);

    let showcase = Viewer::new(ViewerConfig::showcase());
    let labels: Vec<&str> = showcase.post_chain().iter().map(|p| p.label()).collect();
    assert_eq!(labels, ["render", "outline", "vignette", "color_correction"]);
}

#[test]
fn sliders_update_post_params() {
    let mut v = loaded_viewer();
    v.on_brightness(0.2);
    v.on_contrast(1.5);
    v.on_exposure(-1.0);
    assert_eq!(v.post.color.brightness, 0.2);
    assert_eq!(v.post.color.contrast, 1.5);
    assert_eq!(v.post.exposure, 0.0);
}

#[test]
fn render_handoff_reflects_viewer_state() {
    let mut v = selecting_viewer();
    let mut backend = Recorder::default();
    v.upload_to(&mut backend);
    assert_eq!(backend.meshes, 2);
    assert_eq!(backend.markers, 4);

    v.render_to(&mut backend, DT).expect("render");
    assert_eq!(backend.frames, 1);
    assert!(backend.outline.is_empty());
    assert!(!backend.markers_visible);
    assert_eq!(backend.chain.as_slice(), v.post_chain().as_slice());
    assert_eq!(backend.params, Some(v.post));

    v.on_pointer_move(CENTER);
    v.on_click();
    v.on_toggle_origins();
    v.render_to(&mut backend, DT).expect("render");
    assert_eq!(backend.outline, vec![MeshId(0)]);
    assert!(backend.markers_visible);
    assert_eq!(backend.camera.as_ref(), Some(&v.camera));
}

fn quad_at(id: usize, name: &str, center: Vec3, half: f32) -> MeshNode {
    let mut mesh = quad(id, name, center.z, half);
    let shift = Vec3::new(center.x, center.y, 0.0);
    mesh.origin += shift;
    for p in &mut mesh.positions {
        *p += shift;
    }
    MeshNode::new(
        mesh.id,
        mesh.name,
        mesh.origin,
        mesh.positions,
        mesh.normals,
        mesh.indices,
        mesh.base_color,
    )
}

#[test]
fn hover_stays_off_while_something_is_selected() {
    // "Pedal" sits right of the wheel, around NDC x = 0.39.
    let pedal_ndc = Vec2::new(0.39, 0.0);
    let mut v = Viewer::new(ViewerConfig::default());
    v.on_resize(VIEWPORT.x, VIEWPORT.y);
    v.on_model_loaded(Model::new(vec![
        quad(0, "Wheel", -2.0, 0.5),
        quad_at(1, "Pedal", Vec3::new(1.0, 0.0, -2.0), 0.4),
        frame_mesh(2),
    ]));
    v.on_toggle_selection(Duration::ZERO);

    v.on_pointer_move(pedal_ndc);
    v.frame(secs(0.1), DT, VIEWPORT);
    assert_eq!(v.state.highlighted, Some(MeshId(1)));

    v.on_pointer_move(CENTER);
    v.on_click();
    assert_eq!(v.state.selected, Some(MeshId(0)));

    v.on_pointer_move(pedal_ndc);
    v.frame(secs(0.2), DT, VIEWPORT);
    assert_eq!(v.state.highlighted, None);
    assert_eq!(v.state.outline_target(), Some(MeshId(0)));
}

#[test]
fn attract_mode_sweeps_the_eye_around_the_origin() {
    let mut v = loaded_viewer();
    v.on_interaction(secs(0.0));
    v.frame(secs(8.0), DT, VIEWPORT);
    assert!(v.is_idle());

    v.frame(secs(12.0), DT, VIEWPORT);
    let expected = 0.1 * (12_000.0f32 * 1e-4).sin();
    assert!((v.camera.eye.x - expected).abs() < 1e-4, "{:?}", v.camera.eye);
    assert!((v.camera.eye.y - expected).abs() < 1e-4, "{:?}", v.camera.eye);
    assert_eq!(v.camera.target, Vec3::ZERO);
    assert_eq!(v.camera.fov_deg, constants::IDLE_FOV_DEG);
}

#[test]
fn origins_shown_before_load_apply_to_the_loaded_model() {
    let mut v = Viewer::new(ViewerConfig::default());
    v.on_toggle_origins();
    assert!(v.markers().is_empty());

    v.on_model_loaded(bike());
    assert_eq!(v.markers().len(), 4);
    assert!(v.markers().is_visible());
    assert!(v.camera.layers.is_enabled(constants::ORIGIN_LAYER));
}
