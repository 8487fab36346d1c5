// Host-side checks on the shipped page: every element the viewer looks up
// exists, and the canvas keeps touch input for orbiting.

const PAGE: &str = include_str!("../index.html");

const ELEMENT_IDS: [&str; 18] = [
    "viewer-canvas",
    "object-name",
    "object-text",
    "deselect-button",
    "toggle-selection-button",
    "toggle-options-button",
    "toggle-origins-button",
    "fov-button",
    "fov-input",
    "lock-camera-button",
    "reset-camera-button",
    "settings-button",
    "controls",
    "brightness-slider",
    "contrast-slider",
    "exposure-slider",
    "idle-timer-display",
    "idle-countdown",
];

#[test]
fn page_declares_every_element_id() {
    for id in ELEMENT_IDS {
        assert!(PAGE.contains(&format!(r#"id="{}""#, id)), "missing #{}", id);
    }
}

#[test]
fn canvas_disables_browser_touch_gestures() {
    let rule = PAGE
        .lines()
        .find(|l| l.trim_start().starts_with("#viewer-canvas"))
        .expect("canvas style rule");
    assert!(rule.contains("touch-action: none"), "{}", rule);
}
