#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod captions;
mod constants;
mod core;
mod detail;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod navigation;
mod render;
mod stage;
mod stalker;

use crate::core::{MountSlot, MountTicket, StageError};
use detail::DetailViewer;
use stage::Stage;

/// Everything one page view mounted.
#[derive(Default)]
struct PageView {
    stage: Option<Stage>,
    detail: Option<DetailViewer>,
}

impl PageView {
    fn is_empty(&self) -> bool {
        self.stage.is_none() && self.detail.is_none()
    }

    fn teardown(&mut self) {
        if let Some(stage) = self.stage.take() {
            stage.teardown();
        }
        if let Some(detail) = self.detail.take() {
            detail.teardown();
        }
    }
}

fn mounted<T>(what: &str, result: Result<T, StageError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) if e.is_silent() => {
            log::debug!("[{}] {}", what, e);
            None
        }
        Err(e) => {
            log::error!("[{}] init failed: {}", what, e);
            None
        }
    }
}

async fn mount_page(document: &web::Document, ticket: &MountTicket) -> PageView {
    PageView {
        stage: mounted("stage", Stage::mount(document, ticket).await),
        detail: mounted("detail", DetailViewer::mount(document, ticket).await),
    }
}

/// Owner of one page view's stage. Tearing down is idempotent.
#[wasm_bindgen]
pub struct StageHandle {
    view: Rc<RefCell<PageView>>,
}

#[wasm_bindgen]
impl StageHandle {
    pub fn teardown(&self) {
        if let Ok(mut view) = self.view.try_borrow_mut() {
            view.teardown();
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.view.try_borrow().map(|v| !v.is_empty()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isFullscreen)]
    pub fn is_fullscreen(&self) -> bool {
        self.view
            .try_borrow()
            .ok()
            .and_then(|v| v.stage.as_ref().map(Stage::is_fullscreen))
            .unwrap_or(false)
    }
}

/// Mount whatever the current document has a surface for. Resolves to
/// `undefined` when there is nothing to mount.
#[wasm_bindgen]
pub async fn initialize() -> Option<StageHandle> {
    initialize_with(&MountTicket::new()).await
}

async fn initialize_with(ticket: &MountTicket) -> Option<StageHandle> {
    let document = dom::window_document()?;
    let view = mount_page(&document, ticket).await;
    if view.is_empty() {
        return None;
    }
    Some(StageHandle {
        view: Rc::new(RefCell::new(view)),
    })
}

#[wasm_bindgen]
pub fn teardown(handle: &StageHandle) {
    handle.teardown();
}

/// Built-in page lifecycle: mount now and again on every router page view.
/// The previous view, mounted or still loading, is fully released before the
/// next one starts loading.
#[derive(Default)]
struct Lifecycle {
    current: RefCell<Option<StageHandle>>,
    mounts: RefCell<MountSlot>,
}

impl Lifecycle {
    async fn reinit(self: Rc<Self>) {
        if let Some(old) = self.current.borrow_mut().take() {
            old.teardown();
        }
        if self.mounts.borrow().is_loading() {
            log::info!("[stage] page changed during init; cancelling it");
        }
        let ticket = self.mounts.borrow_mut().begin();
        let handle = initialize_with(&ticket).await;
        if !self.mounts.borrow_mut().finish(&ticket) {
            if let Some(stale) = handle {
                stale.teardown();
            }
            return;
        }
        *self.current.borrow_mut() = handle;
    }
}

fn wire_page_lifecycle(window: &web::Window) {
    let life = Rc::new(Lifecycle::default());
    let loading = dom::window_document().is_some_and(|d| d.ready_state() == "loading");
    if loading {
        let first = life.clone();
        let on_ready = Closure::once_into_js(move || {
            spawn_local(first.reinit());
        });
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            on_ready.unchecked_ref(),
            &opts,
        );
    } else {
        spawn_local(life.clone().reinit());
    }
    let on_pageview = Closure::wrap(Box::new(move || {
        spawn_local(life.clone().reinit());
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback(
        constants::PAGEVIEW_EVENT,
        on_pageview.as_ref().unchecked_ref(),
    );
    // Lives for the whole document
    on_pageview.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("slide-stage starting");

    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let auto_start = dom::window_document()
        .map(|d| dom::read_stage_config(&d).auto_start)
        .unwrap_or(true);
    if auto_start {
        wire_page_lifecycle(&window);
    } else {
        log::info!("[stage] auto start disabled; waiting for initialize()");
    }
    Ok(())
}
