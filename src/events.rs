use crate::core::PendingInput;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod buttons;
mod listeners;
mod pointer;
mod scroll;

pub use buttons::sync_buttons;
pub use listeners::ListenerRegistry;

/// Attach every carousel stage listener. Handlers only record into
/// `pending`; nothing here touches scene state.
pub fn wire_stage_input(
    registry: &mut ListenerRegistry,
    window: &web::Window,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    pending: &Rc<RefCell<PendingInput>>,
) {
    pointer::wire_pointer(registry, window, canvas, pending);
    scroll::wire_scroll(registry, window, document, pending);
    buttons::wire_buttons(registry, document, pending);
    wire_resize(registry, window, pending);
    log::debug!("[events] {} stage listeners attached", registry.len());
}

fn wire_resize(registry: &mut ListenerRegistry, window: &web::Window, pending: &Rc<RefCell<PendingInput>>) {
    let pending = pending.clone();
    registry.add(window, "resize", move |_: web::Event| {
        let vp: Vec2 = crate::dom::viewport_css();
        pending.borrow_mut().viewport = Some(vp);
    });
}
