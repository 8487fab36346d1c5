use crate::constants::DEFAULT_LAYER;
use glam::Vec3;

/// Index of a mesh inside the loaded [`Model`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub usize);

/// Render/pick layer membership, one bit per layer (0..32).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layers(u32);

impl Layers {
    pub const NONE: Layers = Layers(0);

    #[inline]
    pub const fn single(layer: u8) -> Self {
        Layers(1 << (layer as u32 & 31))
    }

    #[inline]
    pub fn enable(&mut self, layer: u8) {
        self.0 |= 1 << (layer as u32 & 31);
    }

    #[inline]
    pub fn disable(&mut self, layer: u8) {
        self.0 &= !(1 << (layer as u32 & 31));
    }

    #[inline]
    pub fn is_enabled(&self, layer: u8) -> bool {
        self.0 & (1 << (layer as u32 & 31)) != 0
    }

    /// True when the two masks share at least one layer.
    #[inline]
    pub fn test(&self, other: Layers) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for Layers {
    fn default() -> Self {
        Layers::single(DEFAULT_LAYER)
    }
}

/// Axis-aligned bounding box. An empty box has `min > max` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.expand_to(*p);
        }
        b
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn expand_to(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Move every face inward by `margin`. A box thinner than `2 * margin`
    /// on some axis ends up inverted on that axis; `clamp_point` still
    /// yields a defined result for it.
    pub fn shrink(&self, margin: f32) -> Aabb {
        Aabb {
            min: self.min + Vec3::splat(margin),
            max: self.max - Vec3::splat(margin),
        }
    }

    /// Component-wise `max(min, min(max, p))`.
    #[inline]
    pub fn clamp_point(&self, p: Vec3) -> Vec3 {
        p.min(self.max).max(self.min)
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// A single pickable mesh with geometry baked into world space.
#[derive(Clone, Debug)]
pub struct MeshNode {
    pub id: MeshId,
    pub name: String,
    /// World-space position of the mesh's local origin.
    pub origin: Vec3,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub bounds: Aabb,
    pub layers: Layers,
}

impl MeshNode {
    pub fn new(
        id: MeshId,
        name: impl Into<String>,
        origin: Vec3,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
        base_color: [f32; 4],
    ) -> Self {
        let bounds = Aabb::from_points(&positions);
        Self {
            id,
            name: name.into(),
            origin,
            positions,
            normals,
            indices,
            base_color,
            bounds,
            layers: Layers::default(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(move |t| {
            let a = *self.positions.get(t[0] as usize)?;
            let b = *self.positions.get(t[1] as usize)?;
            let c = *self.positions.get(t[2] as usize)?;
            Some([a, b, c])
        })
    }
}

/// The loaded asset: a flat list of meshes in traversal order.
#[derive(Clone, Debug, Default)]
pub struct Model {
    pub meshes: Vec<MeshNode>,
}

impl Model {
    pub fn new(meshes: Vec<MeshNode>) -> Self {
        Self { meshes }
    }

    pub fn get(&self, id: MeshId) -> Option<&MeshNode> {
        self.meshes.get(id.0)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&MeshNode> {
        self.meshes.iter().find(|m| m.name == name)
    }

    pub fn bounds(&self) -> Aabb {
        self.meshes
            .iter()
            .filter(|m| !m.bounds.is_empty())
            .fold(Aabb::EMPTY, |acc, m| acc.union(&m.bounds))
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
