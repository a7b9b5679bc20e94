pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{wire_orbit_handlers, OrbitWiring};

use crate::core::{AnimationState, TreeMode};
use crate::{dom, overlay};
use std::cell::RefCell;
use std::rc::Rc;

/// Request a mode and mirror it in the overlay. Re-requesting the active mode
/// changes nothing.
pub fn request_mode(state: &Rc<RefCell<AnimationState>>, mode: TreeMode) {
    let changed = state.borrow_mut().set_target(mode);
    if changed {
        if let Some(doc) = dom::window_document() {
            overlay::set_mode(&doc, mode);
        }
    }
}

pub fn toggle_mode(state: &Rc<RefCell<AnimationState>>) {
    let mode = state.borrow_mut().toggle();
    if let Some(doc) = dom::window_document() {
        overlay::set_mode(&doc, mode);
    }
}
