use super::ListenerRegistry;
use crate::captions;
use crate::core::constants::{TOUCH_SCROLL_FACTOR, WHEEL_SCROLL_FACTOR};
use crate::core::PendingInput;
use crate::input::{self, TouchTracker};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Wheel and swipe input. Every gesture feeds both the track scroll and the
/// full-screen paging queue; the frame step keeps whichever applies.
pub fn wire_scroll(
    registry: &mut ListenerRegistry,
    window: &web::Window,
    document: &web::Document,
    pending: &Rc<RefCell<PendingInput>>,
) {
    {
        let document = document.clone();
        let pending = pending.clone();
        registry.add(window, "wheel", move |ev: web::WheelEvent| {
            let dy = ev.delta_y() as f32;
            if !dy.is_finite() {
                return;
            }
            let extent = captions::panel_extent(&document);
            let mut p = pending.borrow_mut();
            p.track_scroll += dy * WHEEL_SCROLL_FACTOR;
            p.page_scroll.push((dy, extent));
        });
    }

    let tracker = Rc::new(RefCell::new(TouchTracker::default()));
    {
        let tracker = tracker.clone();
        registry.add(window, "touchstart", move |ev: web::TouchEvent| {
            if let Some(t) = input::first_touch(&ev) {
                tracker
                    .borrow_mut()
                    .begin(glam::Vec2::new(t.client_x() as f32, t.client_y() as f32));
            }
        });
    }
    {
        let tracker = tracker.clone();
        let document = document.clone();
        let pending = pending.clone();
        registry.add(window, "touchmove", move |ev: web::TouchEvent| {
            let Some(t) = ev.touches().get(0) else { return };
            let d = tracker
                .borrow_mut()
                .delta(glam::Vec2::new(t.client_x() as f32, t.client_y() as f32));
            let extent = captions::panel_extent(&document);
            let mut p = pending.borrow_mut();
            p.track_scroll += d.x * TOUCH_SCROLL_FACTOR;
            if d.y != 0.0 {
                p.page_scroll.push((d.y, extent));
            }
        });
    }
    {
        let tracker = tracker.clone();
        registry.add(window, "touchend", move |_: web::TouchEvent| {
            tracker.borrow_mut().end();
        });
    }
}
