use super::ListenerRegistry;
use crate::core::PendingInput;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Hover and click picking. Positions are recorded relative to the canvas;
/// the frame step does the ray casting.
pub fn wire_pointer(
    registry: &mut ListenerRegistry,
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    pending: &Rc<RefCell<PendingInput>>,
) {
    {
        let canvas = canvas.clone();
        let pending = pending.clone();
        registry.add(window, "mousemove", move |ev: web::MouseEvent| {
            pending.borrow_mut().pointer = Some(input::pointer_canvas_px(&ev, &canvas));
        });
    }
    {
        let canvas = canvas.clone();
        let pending = pending.clone();
        registry.add(window, "click", move |ev: web::MouseEvent| {
            let px = input::pointer_canvas_px(&ev, &canvas);
            pending.borrow_mut().clicks.push(px);
        });
    }
    {
        let canvas = canvas.clone();
        let pending = pending.clone();
        registry.add(window, "touchmove", move |ev: web::TouchEvent| {
            if let Some(t) = ev.touches().get(0) {
                pending.borrow_mut().pointer = Some(input::touch_canvas_px(&t, &canvas));
            }
        });
    }
    {
        // A tap counts as a click
        let canvas = canvas.clone();
        let pending = pending.clone();
        registry.add(window, "touchstart", move |ev: web::TouchEvent| {
            if let Some(t) = ev.touches().get(0) {
                let px = input::touch_canvas_px(&t, &canvas);
                pending.borrow_mut().clicks.push(px);
            }
        });
    }
}
