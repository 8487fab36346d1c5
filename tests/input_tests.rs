// Host-side tests for pure input functions.
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
mod orbit {
    include!("../src/orbit.rs");
}
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use orbit::DragMode;

fn rect() -> CanvasRect {
    CanvasRect {
        left: 100.0,
        top: 50.0,
        width: 800.0,
        height: 600.0,
    }
}

#[test]
fn corners_map_to_ndc_extremes() {
    let r = rect();
    assert_eq!(r.to_ndc(100.0, 50.0), Vec2::new(-1.0, 1.0));
    assert_eq!(r.to_ndc(900.0, 650.0), Vec2::new(1.0, -1.0));
    assert_eq!(r.to_ndc(500.0, 350.0), Vec2::ZERO);
}

#[test]
fn local_is_relative_to_the_canvas() {
    assert_eq!(rect().local(110.0, 70.0), Vec2::new(10.0, 20.0));
    assert_eq!(rect().size(), Vec2::new(800.0, 600.0));
}

#[test]
fn zero_sized_canvas_maps_to_center() {
    let r = CanvasRect::default();
    assert_eq!(r.to_ndc(10.0, 10.0), Vec2::ZERO);
}

#[test]
fn mouse_buttons_pick_drag_mode() {
    assert_eq!(drag_mode_for_button(0), Some(DragMode::Rotate));
    assert_eq!(drag_mode_for_button(1), Some(DragMode::Pan));
    assert_eq!(drag_mode_for_button(2), Some(DragMode::Pan));
    assert_eq!(drag_mode_for_button(3), None);
}
