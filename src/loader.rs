use crate::constants::DEFAULT_BASE_COLOR;
use crate::scene::{MeshId, MeshNode, Model};
use glam::{Mat3, Mat4, Vec3};
use gltf::mesh::util::ReadIndices;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("failed to import glTF")]
    Gltf(#[from] gltf::Error),
    #[error("asset has no scene")]
    NoScene,
    #[error("no geometry found in asset")]
    NoGeometry,
}

/// Parse a glTF/GLB byte slice into a [`Model`], placing the scene root at
/// `root_offset`.
///
/// Every node that references a mesh becomes one [`MeshNode`] named after the
/// node (falling back to the mesh name, then `mesh_<n>`). All triangle
/// primitives of that mesh are merged and baked into world space. Images are
/// never decoded; only base-color factors are read.
pub fn parse_model(bytes: &[u8], root_offset: Vec3) -> Result<Model, LoadError> {
    let gltf::Gltf { document: doc, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&doc, None, blob)?;
    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or(LoadError::NoScene)?;

    let root = Mat4::from_translation(root_offset);
    let mut meshes = Vec::new();
    for node in scene.nodes() {
        collect_node(&node, root, &buffers, &mut meshes);
    }

    if meshes.iter().all(|m: &MeshNode| m.indices.is_empty()) {
        return Err(LoadError::NoGeometry);
    }
    Ok(Model::new(meshes))
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<MeshNode>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        let mut positions: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut base_color = None;

        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::warn!(
                    "[load] skipping non-triangle primitive in mesh {:?}",
                    mesh.name()
                );
                continue;
            }
            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(pos_iter) = reader.read_positions() else {
                continue;
            };
            let start = positions.len() as u32;
            let local: Vec<[f32; 3]> = pos_iter.collect();
            let count = local.len();
            positions.extend(local.iter().map(|p| world.transform_point3(Vec3::from(*p))));
            match reader.read_normals() {
                Some(it) => normals.extend(
                    it.map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero()),
                ),
                None => normals.extend(std::iter::repeat(Vec3::Y).take(count)),
            }
            let prim_indices: Vec<u32> = match reader.read_indices() {
                Some(ReadIndices::U8(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U16(it)) => it.map(u32::from).collect(),
                Some(ReadIndices::U32(it)) => it.collect(),
                None => (0..count as u32).collect(),
            };
            indices.extend(prim_indices.into_iter().map(|i| start + i));
            base_color.get_or_insert(prim.material().pbr_metallic_roughness().base_color_factor());
        }

        let id = MeshId(out.len());
        let name = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh_{}", id.0));
        out.push(MeshNode::new(
            id,
            name,
            world.transform_point3(Vec3::ZERO),
            positions,
            normals,
            indices,
            base_color.unwrap_or(DEFAULT_BASE_COLOR),
        ));
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}

/// Fetch the asset at `path` relative to the page.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(LoadError::Fetch(format!(
            "HTTP {} for {}",
            resp.status(),
            path
        )));
    }
    let buf_promise = resp
        .array_buffer()
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let buf = JsFuture::from(buf_promise)
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
