use crate::constants::{DETAIL_CANVAS_ID, DETAIL_MEDIA_ID};
use crate::core::constants::CURL_OPEN_DELAY_MS;
use crate::core::{CurlParams, CurlState, MediaKind, MountTicket, StageError};
use crate::dom;
use crate::events::ListenerRegistry;
use crate::frame::{self, FrameDriver, LoopHandle};
use crate::loader::{self, LoadedMedia};
use crate::render::CurlRenderer;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Recorded by the detail listeners, applied at the next frame.
#[derive(Default)]
struct DetailInput {
    hover: Option<bool>,
    resized: bool,
}

struct DetailFrame {
    canvas: web::HtmlCanvasElement,
    media_el: web::HtmlElement,
    pending: Rc<RefCell<DetailInput>>,
    renderer: CurlRenderer,
    curl: CurlState,
    open_at: Option<Instant>,
    aspect: f32,
}

impl DetailFrame {
    /// Match the canvas to the media element's box. Zero-sized boxes are
    /// skipped until layout settles.
    fn fit(&mut self) {
        let w = self.media_el.client_width();
        let h = self.media_el.client_height();
        if w <= 0 || h <= 0 {
            return;
        }
        let css = Vec2::new(w as f32, h as f32);
        let style = self.canvas.style();
        _ = style.set_property("width", &format!("{w}px"));
        _ = style.set_property("height", &format!("{h}px"));
        let (pw, ph) = dom::sync_canvas_backing_size(&self.canvas, css);
        self.renderer.resize_if_needed(pw, ph);
        self.aspect = css.x / css.y;
    }
}

impl FrameDriver for DetailFrame {
    fn frame(&mut self) {
        let input = std::mem::take(&mut *self.pending.borrow_mut());
        if input.resized {
            self.fit();
        }
        match input.hover {
            Some(true) => self.curl.close(),
            Some(false) => self.curl.open(),
            None => {}
        }
        if self.open_at.is_some_and(|t| Instant::now() >= t) {
            self.open_at = None;
            self.curl.open();
        }
        let curl = self.curl.step();
        self.renderer.render(&CurlParams::new(curl, self.aspect));
    }
}

/// Page-curl presentation of the detail page's hero media.
pub struct DetailViewer {
    media: LoadedMedia,
    listeners: ListenerRegistry,
    frame_loop: LoopHandle,
    driver: Rc<RefCell<DetailFrame>>,
    released: bool,
}

async fn load_media(media_el: &web::HtmlElement) -> Result<LoadedMedia, StageError> {
    if let Some(video) = media_el.dyn_ref::<web::HtmlVideoElement>() {
        loader::configure_video(video);
        video.load();
        let src = video.current_src();
        return loader::open_video(0, &src, video.clone()).await;
    }
    let src = media_el
        .dyn_ref::<web::HtmlImageElement>()
        .map(|img| img.src())
        .or_else(|| media_el.get_attribute("src"))
        .ok_or_else(|| StageError::Dom(format!("#{DETAIL_MEDIA_ID} has no source")))?;
    loader::load_source(0, &src, MediaKind::from_path(&src)).await
}

impl DetailViewer {
    pub async fn mount(document: &web::Document, ticket: &MountTicket) -> Result<Self, StageError> {
        let canvas: web::HtmlCanvasElement = dom::element_by_id(document, DETAIL_CANVAS_ID)
            .ok_or(StageError::MissingMount(DETAIL_CANVAS_ID))?;
        let media_el: web::HtmlElement = dom::element_by_id(document, DETAIL_MEDIA_ID)
            .ok_or(StageError::MissingMount(DETAIL_MEDIA_ID))?;
        let window = web::window().ok_or_else(|| StageError::Dom("no window".into()))?;

        let media = match load_media(&media_el).await {
            Ok(m) => m,
            Err(e) => {
                log::warn!("[detail] {}; showing a placeholder", e);
                LoadedMedia::placeholder()
            }
        };
        if let Err(e) = ticket.check() {
            media.release();
            return Err(e);
        }
        if !canvas.is_connected() {
            media.release();
            return Err(StageError::MissingMount(DETAIL_CANVAS_ID));
        }
        let renderer = match CurlRenderer::new(&canvas, &media).await {
            Ok(r) => r,
            Err(e) => {
                media.release();
                return Err(StageError::Gpu(format!("{e:#}")));
            }
        };
        if let Err(e) = ticket.check() {
            renderer.destroy();
            media.release();
            return Err(e);
        }

        let pending = Rc::new(RefCell::new(DetailInput::default()));
        let mut listeners = ListenerRegistry::new();
        {
            let pending = pending.clone();
            listeners.add(&canvas, "mouseenter", move |_: web::MouseEvent| {
                pending.borrow_mut().hover = Some(true);
            });
        }
        {
            let pending = pending.clone();
            listeners.add(&canvas, "mouseleave", move |_: web::MouseEvent| {
                pending.borrow_mut().hover = Some(false);
            });
        }
        {
            let pending = pending.clone();
            listeners.add(&window, "resize", move |_: web::Event| {
                pending.borrow_mut().resized = true;
            });
        }

        let mut detail = DetailFrame {
            canvas,
            media_el,
            pending,
            renderer,
            curl: CurlState::default(),
            open_at: Some(Instant::now() + Duration::from_millis(CURL_OPEN_DELAY_MS as u64)),
            aspect: 1.0,
        };
        detail.fit();
        let driver = Rc::new(RefCell::new(detail));
        let frame_loop = frame::start_loop(driver.clone());
        log::info!("[detail] mounted ({:?})", media.kind);
        Ok(Self {
            media,
            listeners,
            frame_loop,
            driver,
            released: false,
        })
    }

    fn release(&mut self) {
        if std::mem::replace(&mut self.released, true) {
            return;
        }
        self.frame_loop.stop();
        self.listeners.clear();
        if let Ok(d) = self.driver.try_borrow() {
            d.renderer.destroy();
        }
        self.media.release();
        log::info!("[detail] torn down");
    }

    pub fn teardown(mut self) {
        self.release();
    }
}

impl Drop for DetailViewer {
    fn drop(&mut self) {
        self.release();
    }
}
