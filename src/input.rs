use glam::Vec2;
use web_sys as web;

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas(ev.client_x() as f32, ev.client_y() as f32, canvas)
}

#[inline]
pub fn touch_canvas_px(touch: &web::Touch, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas(touch.client_x() as f32, touch.client_y() as f32, canvas)
}

fn client_to_canvas(x: f32, y: f32, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(x - rect.left() as f32, y - rect.top() as f32)
}

/// First touch point of a touch event, in client pixels.
pub fn first_touch(ev: &web::TouchEvent) -> Option<web::Touch> {
    ev.touches().get(0).or_else(|| ev.changed_touches().get(0))
}

/// Last touch position; turns successive touchmoves into deltas.
#[derive(Default, Clone, Copy, Debug)]
pub struct TouchTracker {
    last: Option<Vec2>,
}

impl TouchTracker {
    pub fn begin(&mut self, p: Vec2) {
        self.last = Some(p);
    }

    /// Movement since the previous sample, as (previous - current) so that a
    /// leftward swipe scrolls the track forward.
    pub fn delta(&mut self, p: Vec2) -> Vec2 {
        let d = self.last.map(|last| last - p).unwrap_or(Vec2::ZERO);
        self.last = Some(p);
        d
    }

    pub fn end(&mut self) {
        self.last = None;
    }
}
