use super::pointer::InputWiring;
use crate::dom;
use crate::input;
use crate::overlay;
use crate::passes::parse_slider;

/// Wire the buttons, text input and sliders of the control panel.
pub fn wire_controls(w: &InputWiring) {
    let doc = w.document.clone();

    let wc = w.clone();
    dom::add_click_listener(&doc, "toggle-selection-button", move |ev| {
        ev.stop_propagation();
        let fx = wc
            .viewer
            .borrow_mut()
            .on_toggle_selection(input::clock_since(wc.clock));
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "deselect-button", move |ev| {
        ev.stop_propagation();
        let fx = wc.viewer.borrow_mut().on_deselect();
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "toggle-options-button", move |_| {
        let fx = wc.viewer.borrow_mut().on_toggle_options();
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "toggle-origins-button", move |_| {
        let fx = wc.viewer.borrow_mut().on_toggle_origins();
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "fov-button", move |ev| {
        ev.stop_propagation();
        let value = dom::input_element(&wc.document, "fov-input")
            .map(|el| el.value())
            .unwrap_or_default();
        let fx = wc.viewer.borrow_mut().on_set_fov(&value);
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "lock-camera-button", move |_| {
        let fx = wc.viewer.borrow_mut().on_toggle_lock();
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "reset-camera-button", move |_| {
        wc.viewer.borrow_mut().on_reset_camera();
    });

    let wc = w.clone();
    dom::add_click_listener(&doc, "settings-button", move |_| {
        let fx = wc.viewer.borrow_mut().on_toggle_settings();
        overlay::apply(&wc.document, &fx);
    });

    let wc = w.clone();
    dom::add_input_listener(&doc, "brightness-slider", move |v| {
        if let Some(v) = parse_slider(&v) {
            wc.viewer.borrow_mut().on_brightness(v);
        }
    });

    let wc = w.clone();
    dom::add_input_listener(&doc, "contrast-slider", move |v| {
        if let Some(v) = parse_slider(&v) {
            wc.viewer.borrow_mut().on_contrast(v);
        }
    });

    let wc = w.clone();
    dom::add_input_listener(&doc, "exposure-slider", move |v| {
        if let Some(v) = parse_slider(&v) {
            wc.viewer.borrow_mut().on_exposure(v);
        }
    });
}
