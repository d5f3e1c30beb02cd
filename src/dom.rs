use crate::constants::{CONFIG_SCRIPT_ID, MAX_PIXEL_RATIO};
use crate::core::{StageConfig, StageError};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_PIXEL_RATIO)
}

/// CSS size of the window in pixels.
pub fn viewport_css() -> Vec2 {
    let Some(w) = web::window() else {
        return Vec2::ONE;
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    Vec2::new(width as f32, height as f32)
}

/// Match the canvas backing store to `css` size times the capped pixel ratio.
/// Returns the backing size in device pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, css: Vec2) -> (u32, u32) {
    let dpr = device_pixel_ratio();
    let w_px = ((css.x as f64 * dpr) as u32).max(1);
    let h_px = ((css.y as f64 * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub fn set_display(document: &web::Document, id: &str, value: &str) {
    if let Some(el) = element_by_id::<web::HtmlElement>(document, id) {
        _ = el.style().set_property("display", value);
    }
}

pub fn toggle_class(el: &web::Element, class: &str, on: bool) {
    let list = el.class_list();
    _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

/// Elements matching `selector` under `root`, in document order.
pub fn query_all(root: &web::Element, selector: &str) -> Vec<web::Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Page-supplied stage configuration, or the built-in defaults when the page
/// has none. A block that fails to parse is reported and ignored.
pub fn read_stage_config(document: &web::Document) -> StageConfig {
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) else {
        return StageConfig::default();
    };
    let text = script.text_content().unwrap_or_default();
    match StageConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("[stage] {}; using defaults", e);
            StageConfig::default()
        }
    }
}

/// Turn a JS exception into a stage error without losing its message.
pub fn js_err(context: &str, e: wasm_bindgen::JsValue) -> StageError {
    StageError::Dom(format!("{context}: {e:?}"))
}
