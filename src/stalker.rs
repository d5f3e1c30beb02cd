use crate::constants::{STALKER_ACTIVE, STALKER_CIRCLE_ID, STALKER_SELECTOR, STALKER_TEXT_ID};
use crate::core::{Stalker, StalkerShape};
use crate::dom;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

fn style_of(el: &web::Element) -> Option<web::CssStyleDeclaration> {
    if let Some(h) = el.dyn_ref::<web::HtmlElement>() {
        return Some(h.style());
    }
    el.dyn_ref::<web::SvgElement>().map(|s| s.style())
}

/// The SVG cursor follower shown while a slide is hovered. Every part is
/// optional; a page without it just gets no follower.
pub struct StalkerView {
    root: Option<web::Element>,
    circle: Option<web::Element>,
    text: Option<web::Element>,
    motion: Stalker,
}

impl StalkerView {
    pub fn find(document: &web::Document) -> Self {
        Self {
            root: document.query_selector(STALKER_SELECTOR).ok().flatten(),
            circle: document.get_element_by_id(STALKER_CIRCLE_ID),
            text: document.get_element_by_id(STALKER_TEXT_ID),
            motion: Stalker::default(),
        }
    }

    pub fn set_target(&mut self, client: Vec2) {
        self.motion.set_target(client);
    }

    pub fn show(&mut self, client: Vec2) {
        if self.motion.show(client) {
            if let Some(root) = &self.root {
                dom::toggle_class(root, STALKER_ACTIVE, true);
            }
        }
    }

    pub fn hide(&mut self) {
        if self.motion.hide() {
            if let Some(root) = &self.root {
                dom::toggle_class(root, STALKER_ACTIVE, false);
            }
        }
    }

    /// Advance the follower one frame; idle while hidden.
    pub fn step(&mut self) {
        if !self.motion.is_active() {
            return;
        }
        let shape = self.motion.step();
        self.apply(&shape);
    }

    fn apply(&self, shape: &StalkerShape) {
        let (x, y) = (shape.center.x, shape.center.y);
        let origin = format!("{x}px {y}px");
        if let Some(style) = self.root.as_ref().and_then(style_of) {
            _ = style.set_property("transform-origin", &origin);
        }
        if let Some(circle) = &self.circle {
            _ = circle.set_attribute("cx", &x.to_string());
            _ = circle.set_attribute("cy", &y.to_string());
            if let Some(style) = style_of(circle) {
                _ = style.set_property("transform-origin", &origin);
                _ = style.set_property(
                    "transform",
                    &format!(
                        "rotate({}deg) scale({}, {})",
                        shape.rotation_deg, shape.scale.x, shape.scale.y
                    ),
                );
            }
        }
        if let Some(text) = &self.text {
            _ = text.set_attribute("x", &x.to_string());
            _ = text.set_attribute("y", &y.to_string());
        }
    }
}
