use crate::input;
use crate::overlay;
use crate::render;
use crate::scene::Model;
use crate::viewer::Viewer;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub viewer: Rc<RefCell<Viewer>>,
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub clock: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        viewer: Rc<RefCell<Viewer>>,
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
        clock: Instant,
    ) -> Self {
        Self {
            viewer,
            document,
            canvas,
            gpu,
            clock,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let rect = self.canvas.get_bounding_client_rect();
        let viewport = Vec2::new(rect.width() as f32, rect.height() as f32);

        let fx = {
            let mut viewer = self.viewer.borrow_mut();
            viewer.on_resize(viewport.x, viewport.y);
            viewer.frame(input::clock_since(self.clock), dt_sec, viewport)
        };
        overlay::apply(&self.document, &fx);

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = self.viewer.borrow().render_to(gpu, dt_sec) {
                log::error!("[frame] render error: {:?}", e);
            }
        }
    }

    /// Hand a freshly parsed model to the viewer and the GPU.
    pub fn install_model(&mut self, model: Model) {
        let mut viewer = self.viewer.borrow_mut();
        viewer.on_model_loaded(model);
        if let Some(gpu) = self.gpu.as_mut() {
            viewer.upload_to(gpu);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
