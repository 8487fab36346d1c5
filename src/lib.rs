#![cfg(target_arch = "wasm32")]
use crate::config::ViewerConfig;
use crate::viewer::Viewer;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod idle;
mod input;
mod loader;
mod markers;
mod orbit;
mod overlay;
mod passes;
mod picking;
mod render;
mod scene;
mod state;
mod viewer;

const CANVAS_ID: &str = "viewer-canvas";

// Keep the canvas backing store at CSS size * devicePixelRatio
fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Preset and overrides from the canvas `data-*` attributes.
fn read_config(canvas: &web::HtmlCanvasElement) -> ViewerConfig {
    match ViewerConfig::from_attributes(|key| dom::data_attribute(canvas, key)) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            ViewerConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("model viewer starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);

    let config = read_config(&canvas);
    log::info!(
        "[config] model={} fov={} idle={:?} vignette={}",
        config.model_path,
        config.fov_deg,
        config.idle_time_limit,
        config.vignette.is_some()
    );
    let model_path = config.model_path.clone();
    let model_offset = config.model_offset;
    let viewer = Rc::new(RefCell::new(Viewer::new(config)));
    let clock = Instant::now();

    let wiring = events::InputWiring {
        canvas: canvas.clone(),
        document: document.clone(),
        viewer: viewer.clone(),
        clock,
    };
    events::wire_controls(&wiring);
    events::wire_input_handlers(wiring);

    // The viewer runs without a renderer if WebGPU is unavailable.
    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        viewer.clone(),
        document,
        canvas,
        gpu,
        clock,
    )));
    frame::start_loop(frame_ctx.clone());

    spawn_local(async move {
        let loaded = match loader::fetch_bytes(&model_path).await {
            Ok(bytes) => loader::parse_model(&bytes, model_offset),
            Err(e) => Err(e),
        };
        match loaded {
            Ok(model) => frame_ctx.borrow_mut().install_model(model),
            Err(e) => viewer.borrow_mut().on_model_failed(&e),
        }
    });

    Ok(())
}
