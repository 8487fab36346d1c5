use crate::camera::Camera;
use crate::scene::{Aabb, Layers, MeshId, Model};
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub mesh: MeshId,
    pub distance: f32,
}

/// Compute a world-space ray through `ndc` (x right, y up, both in [-1, 1]).
///
/// The origin is the camera eye; the direction points at the unprojected
/// far-plane point.
pub fn ray_from_ndc(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = camera.view_projection().inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let far: Vec3 = p_far.truncate() / p_far.w;
    Ray {
        origin: camera.eye,
        dir: (far - camera.eye).normalize_or_zero(),
    }
}

/// Slab test. Returns the entry distance (0 when starting inside).
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if aabb.is_empty() {
        return None;
    }
    let inv = ray.dir.recip();
    let t0 = (aabb.min - ray.origin) * inv;
    let t1 = (aabb.max - ray.origin) * inv;
    let tmin = t0.min(t1);
    let tmax = t0.max(t1);
    let enter = tmin.max_element().max(0.0);
    let exit = tmax.min_element();
    (enter <= exit).then_some(enter)
}

/// Möller–Trumbore, double sided. Returns the hit distance along the ray.
pub fn ray_triangle(ray: &Ray, tri: [Vec3; 3]) -> Option<f32> {
    const EPS: f32 = 1e-7;
    let [a, b, c] = tri;
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > EPS).then_some(t)
}

/// Nearest mesh hit by `ray` among meshes sharing a layer with `mask`.
pub fn pick(model: &Model, ray: &Ray, mask: Layers) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for mesh in &model.meshes {
        if !mesh.layers.test(mask) {
            continue;
        }
        let Some(enter) = ray_aabb(ray, &mesh.bounds) else {
            continue;
        };
        if matches!(best, Some(b) if enter >= b.distance) {
            continue;
        }
        for tri in mesh.triangles() {
            if let Some(t) = ray_triangle(ray, tri) {
                match best {
                    Some(b) if t >= b.distance => {}
                    _ => {
                        best = Some(Hit {
                            mesh: mesh.id,
                            distance: t,
                        })
                    }
                }
            }
        }
    }
    best
}
