use crate::core::CameraRig;
use crate::dom;
use crate::input::{wheel_pixels, DragState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub rig: Rc<RefCell<CameraRig>>,
    pub drag: Rc<RefCell<DragState>>,
}

/// Drag to orbit, wheel to zoom. No panning.
pub fn wire_orbit_handlers(w: OrbitWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let at = dom::pointer_canvas_px(&ev, &w2.canvas);
        w2.drag.borrow_mut().begin(ev.pointer_id(), at);
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let at = dom::pointer_canvas_px(&ev, &w2.canvas);
        let delta = w2.drag.borrow_mut().advance(ev.pointer_id(), at);
        if let Some([dx, dy]) = delta {
            let height = w2.canvas.height() as f32;
            w2.rig.borrow_mut().drag(dx, dy, height);
        }
    });
}

fn wire_pointerup(w: &OrbitWiring) {
    for event in ["pointerup", "pointercancel"] {
        let w2 = w.clone();
        listen(&w.canvas, event, move |ev: web::PointerEvent| {
            if w2.drag.borrow_mut().end(ev.pointer_id()) {
                _ = w2.canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        let delta = wheel_pixels(ev.delta_y(), ev.delta_mode());
        w2.rig.borrow_mut().zoom(delta);
        ev.prevent_default();
    });
}
