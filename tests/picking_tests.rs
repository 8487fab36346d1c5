// Host-side tests for ray picking against the owned scene.
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
mod picking {
    include!("../src/picking.rs");
}

use camera::Camera;
use glam::{Vec2, Vec3};
use picking::*;
use scene::{Aabb, Layers, MeshId, MeshNode, Model};

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

#[test]
fn center_ray_points_down_the_view_axis() {
    let cam = Camera::default();
    let ray = ray_from_ndc(&cam, Vec2::ZERO);
    assert_eq!(ray.origin, cam.eye);
    assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
}

#[test]
fn triangle_hit_and_miss() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 1.0),
        dir: Vec3::NEG_Z,
    };
    let tri = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let t = ray_triangle(&ray, tri).expect("hit");
    assert!((t - 1.0).abs() < 1e-5);
    // back face is hit too
    let flipped = [tri[0], tri[2], tri[1]];
    assert!(ray_triangle(&ray, flipped).is_some());
    // behind the origin
    let behind = Ray {
        origin: ray.origin,
        dir: Vec3::Z,
    };
    assert!(ray_triangle(&behind, tri).is_none());
}

#[test]
fn aabb_slab_test() {
    let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let ray = Ray {
        origin: Vec3::new(0.2, 0.3, 5.0),
        dir: Vec3::NEG_Z,
    };
    assert!((ray_aabb(&ray, &b).expect("hit") - 4.0).abs() < 1e-5);
    let inside = Ray {
        origin: Vec3::new(0.2, 0.3, 0.0),
        dir: Vec3::NEG_Z,
    };
    assert_eq!(ray_aabb(&inside, &b), Some(0.0));
    assert!(ray_aabb(&ray, &Aabb::EMPTY).is_none());
}

#[test]
fn nearest_mesh_wins() {
    let model = Model::new(vec![quad(0, "Back", -3.0, 1.0), quad(1, "Front", -1.0, 0.25)]);
    let ray = ray_from_ndc(&Camera::default(), Vec2::ZERO);
    let hit = pick(&model, &ray, Layers::default()).expect("hit");
    assert_eq!(hit.mesh, MeshId(1));
    assert!((hit.distance - 2.0).abs() < 1e-4);
}

#[test]
fn empty_space_is_no_hit() {
    let model = Model::new(vec![quad(0, "Wheel", -2.0, 0.5)]);
    let ray = ray_from_ndc(&Camera::default(), Vec2::new(0.95, 0.95));
    assert!(pick(&model, &ray, Layers::default()).is_none());
}

#[test]
fn meshes_outside_the_mask_are_ignored() {
    let mut front = quad(1, "Marker", -1.0, 0.25);
    front.layers = Layers::single(1);
    let model = Model::new(vec![quad(0, "Wheel", -2.0, 0.5), front]);
    let ray = ray_from_ndc(&Camera::default(), Vec2::ZERO);
    assert_eq!(
        pick(&model, &ray, Layers::single(0)).map(|h| h.mesh),
        Some(MeshId(0))
    );
    assert!(pick(&model, &ray, Layers::NONE).is_none());
}
