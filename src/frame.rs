use crate::core::{AnimationState, CameraRig, SparkleField, TransformEngine};
use crate::render;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub state: Rc<RefCell<AnimationState>>,
    pub rig: Rc<RefCell<CameraRig>>,
    pub engine: TransformEngine,
    pub sparkles: SparkleField,
    pub buffers: render::SceneBuffers,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let time = (now - self.started).as_secs_f32();

        // Snapshot the state once so the whole frame sees one factor
        let (factor, group_yaw) = {
            let mut state = self.state.borrow_mut();
            state.update(dt_sec);
            (state.factor(), state.group_yaw())
        };
        self.rig.borrow_mut().update(dt_sec, time);
        self.engine.update(factor, time, &mut self.buffers.classes);
        self.sparkles.update(time, &mut self.buffers.sparkles);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let camera = self.rig.borrow().camera(g.aspect());
            g.set_view(&camera, group_yaw);
            g.upload_instances(&mut self.buffers);
            if let Err(e) = g.render(dt_sec) {
                log::error!("render error: {:?}", e);
            }
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
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
