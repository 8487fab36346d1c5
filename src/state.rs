use crate::scene::MeshId;
use smallvec::SmallVec;

/// Buttons whose caption tracks a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    Selection,
    LockCamera,
    Origins,
}

/// DOM-side consequence of a state transition, applied by the web shell.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Set label text, make it visible and opaque.
    ShowLabel(String),
    /// Clear label text, fade to transparent, hide after the fade delay.
    FadeOutLabel,
    /// Hide the label at once.
    HideLabel,
    /// Move the label to this CSS pixel position (already offset).
    PlaceLabel { x: f32, y: f32 },
    SetToggleText { toggle: Toggle, text: &'static str },
    SetOptionsVisible(bool),
    ToggleSettingsPanel,
    ShowCountdown(u32),
    HideCountdown,
    Alert(String),
}

pub type Effects = SmallVec<[Effect; 4]>;

/// Interaction state owned by the viewer and mutated only by UI events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewerState {
    pub selection_enabled: bool,
    pub highlighted: Option<MeshId>,
    pub selected: Option<MeshId>,
    pub camera_locked: bool,
    pub options_visible: bool,
    pub origins_visible: bool,
    pub fov_manually_set: bool,
}

impl ViewerState {
    /// Mesh the outline pass should draw, selection first.
    pub fn outline_target(&self) -> Option<MeshId> {
        self.selected.or(self.highlighted)
    }

    pub fn toggle_selection(&mut self) -> Effects {
        self.selection_enabled = !self.selection_enabled;
        let mut fx = Effects::new();
        fx.push(Effect::SetToggleText {
            toggle: Toggle::Selection,
            text: if self.selection_enabled {
                "Disable Selection"
            } else {
                "Enable Selection"
            },
        });
        if !self.selection_enabled && self.selected.take().is_some() {
            fx.push(Effect::HideLabel);
        }
        fx
    }

    /// Per-frame hover update. `hit` is the nearest mesh under the pointer,
    /// or `None` when hover picking is not running this frame.
    pub fn update_hover(&mut self, hit: Option<MeshId>) {
        if self.hover_active() {
            self.highlighted = hit;
        } else if self.highlighted.is_some() && self.highlighted != self.selected {
            self.highlighted = None;
        }
    }

    /// Hover picking runs only with selection on and nothing selected.
    pub fn hover_active(&self) -> bool {
        self.selection_enabled && self.selected.is_none()
    }

    /// Whether a click may select something right now.
    pub fn can_select(&self, camera_moving: bool) -> bool {
        self.selection_enabled && self.selected.is_none() && !camera_moving
    }

    /// Select `hit` (id and display name) if a click may select.
    pub fn click(&mut self, hit: Option<(MeshId, &str)>, camera_moving: bool) -> Effects {
        let mut fx = Effects::new();
        if !self.can_select(camera_moving) {
            return fx;
        }
        if let Some((id, name)) = hit {
            self.selected = Some(id);
            self.highlighted = None;
            fx.push(Effect::ShowLabel(name.to_string()));
        }
        fx
    }

    pub fn deselect(&mut self) -> Effects {
        let mut fx = Effects::new();
        if self.selected.take().is_some() {
            fx.push(Effect::FadeOutLabel);
        }
        fx
    }

    pub fn toggle_options(&mut self) -> Effects {
        self.options_visible = !self.options_visible;
        let mut fx = Effects::new();
        fx.push(Effect::SetOptionsVisible(self.options_visible));
        fx
    }

    pub fn toggle_lock(&mut self) -> Effects {
        self.camera_locked = !self.camera_locked;
        let mut fx = Effects::new();
        fx.push(Effect::SetToggleText {
            toggle: Toggle::LockCamera,
            text: if self.camera_locked {
                "Unlock Camera"
            } else {
                "Lock Camera"
            },
        });
        fx
    }

    pub fn set_origins_visible(&mut self, visible: bool) -> Effects {
        self.origins_visible = visible;
        let mut fx = Effects::new();
        fx.push(Effect::SetToggleText {
            toggle: Toggle::Origins,
            text: if visible { "Hide Origins" } else { "Show Origins" },
        });
        fx
    }
}
