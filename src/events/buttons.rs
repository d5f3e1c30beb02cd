use super::ListenerRegistry;
use crate::constants::{FULLSCREEN_BTN_ID, ORBIT_BTN_ID, RESET_BTN_ID};
use crate::core::{PendingInput, StageCommand};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const BUTTONS: [(&str, StageCommand); 3] = [
    (FULLSCREEN_BTN_ID, StageCommand::EnterFullscreen),
    (RESET_BTN_ID, StageCommand::Reset),
    (ORBIT_BTN_ID, StageCommand::EnterOrbit),
];

/// Mode buttons queue a command for the next frame. Missing buttons are
/// skipped.
pub fn wire_buttons(
    registry: &mut ListenerRegistry,
    document: &web::Document,
    pending: &Rc<RefCell<PendingInput>>,
) {
    for (id, cmd) in BUTTONS {
        let Some(el) = document.get_element_by_id(id) else {
            continue;
        };
        let pending = pending.clone();
        registry.add(&el, "click", move |_: web::MouseEvent| {
            pending.borrow_mut().commands.push(cmd);
        });
    }
}

/// Show the button that makes sense for the current mode.
pub fn sync_buttons(document: &web::Document, fullscreen: bool) {
    dom::set_display(document, FULLSCREEN_BTN_ID, if fullscreen { "none" } else { "block" });
    dom::set_display(document, RESET_BTN_ID, if fullscreen { "block" } else { "none" });
}
