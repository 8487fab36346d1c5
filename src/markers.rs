use crate::constants::{
    MARKER_FILL_COLOR, MARKER_FILL_SIZE, MARKER_OUTLINE_COLOR, MARKER_OUTLINE_OFFSET,
    MARKER_OUTLINE_SIZE, ORIGIN_LAYER,
};
use crate::scene::{Layers, MeshId, Model};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Fill,
    Outline,
}

/// Debug point drawn at a mesh's world-space origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OriginMarker {
    pub mesh: MeshId,
    pub kind: MarkerKind,
    pub position: Vec3,
    pub color: [f32; 3],
    pub size: f32,
    pub layers: Layers,
    /// Lower draws first.
    pub render_order: u8,
}

/// The marker group for one loaded model. Membership is fixed at build time;
/// only group visibility changes afterwards.
#[derive(Clone, Debug, Default)]
pub struct OriginMarkers {
    markers: Vec<OriginMarker>,
    visible: bool,
}

impl OriginMarkers {
    /// Two markers per mesh (fill and offset outline), hidden initially.
    pub fn build(model: &Model) -> Self {
        let mut markers = Vec::with_capacity(model.meshes.len() * 2);
        for mesh in &model.meshes {
            markers.push(OriginMarker {
                mesh: mesh.id,
                kind: MarkerKind::Fill,
                position: mesh.origin,
                color: MARKER_FILL_COLOR,
                size: MARKER_FILL_SIZE,
                layers: Layers::single(ORIGIN_LAYER),
                render_order: 1,
            });
            markers.push(OriginMarker {
                mesh: mesh.id,
                kind: MarkerKind::Outline,
                position: mesh.origin + Vec3::from(MARKER_OUTLINE_OFFSET),
                color: MARKER_OUTLINE_COLOR,
                size: MARKER_OUTLINE_SIZE,
                layers: Layers::single(ORIGIN_LAYER),
                render_order: 0,
            });
        }
        Self {
            markers,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip group visibility and mirror it onto the camera's layer mask.
    /// Returns the new visibility.
    pub fn toggle(&mut self, camera_layers: &mut Layers) -> bool {
        self.set_visible(!self.visible, camera_layers);
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool, camera_layers: &mut Layers) {
        self.visible = visible;
        if visible {
            camera_layers.enable(ORIGIN_LAYER);
        } else {
            camera_layers.disable(ORIGIN_LAYER);
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers sorted by render order (stable within an order).
    pub fn draw_order(&self) -> Vec<OriginMarker> {
        let mut sorted = self.markers.clone();
        sorted.sort_by_key(|m| m.render_order);
        sorted
    }
}
