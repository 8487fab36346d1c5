use crate::input::{self, CanvasRect};
use crate::overlay;
use crate::viewer::Viewer;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub viewer: Rc<RefCell<Viewer>>,
    pub clock: instant::Instant,
}

impl InputWiring {
    pub fn canvas_rect(&self) -> CanvasRect {
        let rect = self.canvas.get_bounding_client_rect();
        CanvasRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }

    /// Reset the idle timer and apply the resulting DOM changes.
    pub fn interaction(&self) {
        let fx = self
            .viewer
            .borrow_mut()
            .on_interaction(input::clock_since(self.clock));
        overlay::apply(&self.document, &fx);
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_mousemove(&w);
    wire_activity(&w, "mousedown");
    wire_activity(&w, "touchstart");
    wire_activity(&w, "keydown");
    wire_click(&w);
    wire_orbit_drag(&w);
    wire_wheel(&w);
}

fn wire_mousemove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let ndc = w
            .canvas_rect()
            .to_ndc(ev.client_x() as f32, ev.client_y() as f32);
        w.viewer.borrow_mut().on_pointer_move(ndc);
        w.interaction();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

// Any of these only counts as activity for the idle timer.
fn wire_activity(w: &InputWiring, event_name: &str) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
        w.interaction();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let ndc = w
            .canvas_rect()
            .to_ndc(ev.client_x() as f32, ev.client_y() as f32);
        let fx = {
            let mut viewer = w.viewer.borrow_mut();
            viewer.on_pointer_move(ndc);
            viewer.on_click()
        };
        overlay::apply(&w.document, &fx);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_orbit_drag(w: &InputWiring) {
    let down = {
        let w = w.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let Some(mode) = input::drag_mode_for_button(ev.button()) else {
                return;
            };
            let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            if w.viewer.borrow_mut().on_orbit_start(mode, pos) {
                _ = w.canvas.set_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>)
    };
    let moved = {
        let w = w.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let h = w.canvas_rect().height;
            w.viewer.borrow_mut().on_orbit_move(pos, h);
        }) as Box<dyn FnMut(_)>)
    };
    let up = {
        let w = w.clone();
        Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            if w.viewer.borrow_mut().on_orbit_end() {
                _ = w.canvas.release_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>)
    };
    let context_menu = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    let canvas = &w.canvas;
    _ = canvas.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
    _ = canvas.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
    _ = canvas.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
    _ = canvas.add_event_listener_with_callback("pointercancel", up.as_ref().unchecked_ref());
    _ = canvas
        .add_event_listener_with_callback("contextmenu", context_menu.as_ref().unchecked_ref());
    down.forget();
    moved.forget();
    up.forget();
    context_menu.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.viewer.borrow_mut().on_wheel(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
