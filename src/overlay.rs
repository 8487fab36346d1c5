use crate::constants::LABEL_FADE_MS;
use crate::dom;
use crate::state::{Effect, Toggle};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const LABEL_ID: &str = "object-name";
pub const LABEL_TEXT_ID: &str = "object-text";
pub const COUNTDOWN_DISPLAY_ID: &str = "idle-timer-display";
pub const COUNTDOWN_TEXT_ID: &str = "idle-countdown";
pub const SETTINGS_PANEL_ID: &str = "controls";

/// Controls shown/hidden together by the options toggle.
pub const OPTION_CONTROL_IDS: [&str; 5] = [
    "fov-button",
    "fov-input",
    "lock-camera-button",
    "reset-camera-button",
    "toggle-selection-button",
];

fn toggle_button_id(toggle: Toggle) -> &'static str {
    match toggle {
        Toggle::Selection => "toggle-selection-button",
        Toggle::LockCamera => "lock-camera-button",
        Toggle::Origins => "toggle-origins-button",
    }
}

/// Apply viewer effects to the page.
pub fn apply<'a>(document: &web::Document, effects: impl IntoIterator<Item = &'a Effect>) {
    for effect in effects {
        apply_one(document, effect);
    }
}

fn apply_one(document: &web::Document, effect: &Effect) {
    match effect {
        Effect::ShowLabel(text) => {
            dom::set_text(document, LABEL_TEXT_ID, text);
            dom::set_style(document, LABEL_ID, "display", "block");
            dom::set_style(document, LABEL_ID, "opacity", "1");
        }
        Effect::FadeOutLabel => {
            dom::set_text(document, LABEL_TEXT_ID, "");
            dom::set_style(document, LABEL_ID, "opacity", "0");
            hide_label_later(document);
        }
        Effect::HideLabel => {
            dom::set_style(document, LABEL_ID, "opacity", "0");
            dom::set_style(document, LABEL_ID, "display", "none");
        }
        Effect::PlaceLabel { x, y } => {
            dom::set_style(
                document,
                LABEL_ID,
                "transform",
                &format!("translate({:.1}px, {:.1}px)", x, y),
            );
        }
        Effect::SetToggleText { toggle, text } => {
            dom::set_text(document, toggle_button_id(*toggle), text);
        }
        Effect::SetOptionsVisible(visible) => {
            let display = if *visible { "inline-block" } else { "none" };
            for id in OPTION_CONTROL_IDS {
                dom::set_style(document, id, "display", display);
            }
        }
        Effect::ToggleSettingsPanel => toggle_settings_panel(document),
        Effect::ShowCountdown(n) => {
            dom::set_text(document, COUNTDOWN_TEXT_ID, &n.to_string());
            dom::set_style(document, COUNTDOWN_DISPLAY_ID, "display", "block");
        }
        Effect::HideCountdown => {
            dom::set_style(document, COUNTDOWN_DISPLAY_ID, "display", "none");
        }
        Effect::Alert(msg) => {
            if let Some(w) = web::window() {
                _ = w.alert_with_message(msg);
            }
        }
    }
}

// The hide is skipped if the label was shown again during the fade.
fn hide_label_later(document: &web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    let doc = document.clone();
    let closure = Closure::once(move || {
        if dom::style_value(&doc, LABEL_ID, "opacity").as_deref() == Some("0") {
            dom::set_style(&doc, LABEL_ID, "display", "none");
        }
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        LABEL_FADE_MS,
    );
    closure.forget();
}

fn toggle_settings_panel(document: &web::Document) {
    let visible = dom::style_value(document, SETTINGS_PANEL_ID, "display").as_deref() == Some("block");
    dom::set_style(
        document,
        SETTINGS_PANEL_ID,
        "display",
        if visible { "none" } else { "block" },
    );
    dom::set_style(
        document,
        SETTINGS_PANEL_ID,
        "opacity",
        if visible { "0" } else { "1" },
    );
}
