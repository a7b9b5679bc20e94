use crate::core::{AnimationState, TreeMode};
use crate::input::{action_for_key, suppresses_default, KeyAction};
use crate::{dom, overlay};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, state: &Rc<RefCell<AnimationState>>) {
    // leave browser shortcuts alone
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = action_for_key(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::ToggleMode => super::toggle_mode(state),
        KeyAction::Assemble => super::request_mode(state, TreeMode::Assembled),
        KeyAction::Scatter => super::request_mode(state, TreeMode::Scattered),
        KeyAction::ToggleOverlay => {
            if let Some(doc) = dom::window_document() {
                overlay::toggle(&doc);
            }
        }
        KeyAction::ToggleFullscreen => dom::toggle_fullscreen(),
        KeyAction::ExitFullscreen => dom::exit_fullscreen(),
    }
    log::debug!("[keys] {:?}", action);
    if suppresses_default(action) {
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(state: Rc<RefCell<AnimationState>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &state);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
