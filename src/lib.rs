#![cfg(target_arch = "wasm32")]
use crate::core::{
    seed_instance_colors, AnimationState, CameraRig, SparkleField, StarField, TransformEngine,
    TreeLayout,
};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

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

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

struct SceneParts {
    engine: TransformEngine,
    sparkles: SparkleField,
    buffers: render::SceneBuffers,
}

/// Generate the layout and decor, size one buffer per draw and seed instance
/// colors. A size mismatch here is a programming error and aborts start-up.
fn build_scene(seed: u64) -> anyhow::Result<SceneParts> {
    let mut rng = StdRng::seed_from_u64(seed);
    let layout = TreeLayout::generate_with(&mut rng);
    let engine = TransformEngine::new(layout)?;
    let sparkles = SparkleField::generate_with(&mut rng);
    let stars = StarField::generate_with(&mut rng);

    let mut buffers = render::SceneBuffers::new();
    engine.check_sinks(&buffers.classes)?;
    sparkles.check_sink(&buffers.sparkles)?;
    stars.check_sink(&buffers.stars)?;
    seed_instance_colors(engine.layout(), &mut buffers.classes, &mut rng);
    sparkles.seed_colors(&mut buffers.sparkles);
    stars.write(&mut buffers.stars);
    log::info!(
        "[scene] seed={} particles={} sparkles={} stars={}",
        seed,
        engine.layout().total(),
        sparkles.len(),
        stars.len()
    );
    Ok(SceneParts {
        engine,
        sparkles,
        buffers,
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-web starting");

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

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let SceneParts {
        engine,
        sparkles,
        buffers,
    } = build_scene(random_seed())?;

    let state = Rc::new(RefCell::new(AnimationState::new()));
    let rig = Rc::new(RefCell::new(CameraRig::new()));
    overlay::set_mode(&document, state.borrow().mode());

    // ---------------- Controls ----------------
    let state_click = state.clone();
    dom::add_click_listener(&document, overlay::TOGGLE_BUTTON_ID, move || {
        events::toggle_mode(&state_click);
    });
    events::wire_global_keydown(state.clone());
    events::wire_orbit_handlers(events::OrbitWiring {
        canvas: canvas.clone(),
        rig: rig.clone(),
        drag: Rc::new(RefCell::new(input::DragState::default())),
    });

    // Initialize WebGPU; the loop still runs the simulation without it
    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas).await;

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        rig,
        engine,
        sparkles,
        buffers,
        canvas,
        gpu,
        started: now,
        last_instant: now,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
