use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Page transition through the SPA router when the page has one, otherwise
/// a full load.
pub fn navigate(url: &str) {
    let Some(window) = web::window() else { return };
    match swup_navigate(&window, url) {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => log::warn!("[nav] router navigate failed: {:?}", e),
    }
    if let Err(e) = window.location().set_href(url) {
        log::error!("[nav] could not load {}: {:?}", url, e);
    }
}

/// `window.swup.navigate(url)`. Ok(false) when there is no router.
fn swup_navigate(window: &web::Window, url: &str) -> Result<bool, JsValue> {
    let swup = Reflect::get(window, &JsValue::from_str("swup"))?;
    if swup.is_undefined() || swup.is_null() {
        return Ok(false);
    }
    let Ok(nav) = Reflect::get(&swup, &JsValue::from_str("navigate"))?.dyn_into::<Function>() else {
        return Ok(false);
    };
    nav.call1(&swup, &JsValue::from_str(url))?;
    Ok(true)
}
