use crate::core::constants::ASSET_LOAD_TIMEOUT_MS;
use crate::core::{MediaKind, MountTicket, SlideSource, StageError};
use crate::dom;
use instant::Instant;
use js_sys::{Array, Promise};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys as web;

/// Decoded pixels a slide texture is filled from.
pub enum MediaSource {
    Bitmap(web::ImageBitmap),
    /// Playing element; its current frame is re-uploaded every frame.
    Video(web::HtmlVideoElement),
    /// Stand-in for a source that failed or timed out.
    Placeholder,
}

pub struct LoadedMedia {
    pub source: MediaSource,
    pub kind: MediaKind,
    pub width: u32,
    pub height: u32,
}

impl LoadedMedia {
    pub fn placeholder() -> Self {
        Self {
            source: MediaSource::Placeholder,
            kind: MediaKind::Image,
            width: 1,
            height: 1,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    pub fn video(&self) -> Option<&web::HtmlVideoElement> {
        match &self.source {
            MediaSource::Video(v) => Some(v),
            _ => None,
        }
    }

    /// Stop decoding and drop pixel storage. Safe to call more than once.
    pub fn release(&self) {
        match &self.source {
            MediaSource::Video(v) => release_video(v),
            MediaSource::Bitmap(b) => b.close(),
            MediaSource::Placeholder => {}
        }
    }
}

pub fn release_video(video: &web::HtmlVideoElement) {
    _ = video.pause();
    _ = video.remove_attribute("src");
    video.load();
}

pub fn configure_video(video: &web::HtmlVideoElement) {
    video.set_muted(true);
    video.set_loop(true);
    video.set_autoplay(true);
    _ = video.set_attribute("playsinline", "");
}

pub fn create_video(src: &str) -> Result<web::HtmlVideoElement, JsValue> {
    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    let video: web::HtmlVideoElement = document.create_element("video")?.dyn_into()?;
    configure_video(&video);
    video.set_cross_origin(Some("anonymous"));
    video.set_preload("auto");
    video.set_src(src);
    video.load();
    Ok(video)
}

/// Resolves on the first `ok` event, rejects on the first `fail` event.
fn event_promise(target: &web::EventTarget, ok: &'static str, fail: &'static str) -> Promise {
    let target = target.clone();
    Promise::new(&mut |resolve, reject| {
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        let on_ok = Closure::once_into_js(move |_: web::Event| {
            _ = resolve.call0(&JsValue::NULL);
        });
        let on_fail = Closure::once_into_js(move |ev: web::Event| {
            _ = reject.call1(&JsValue::NULL, &ev);
        });
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            ok,
            on_ok.unchecked_ref(),
            &opts,
        );
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            fail,
            on_fail.unchecked_ref(),
            &opts,
        );
    })
}

fn timeout_promise(ms: i32) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    })
}

fn asset_error(index: usize, path: &str, e: impl std::fmt::Debug) -> StageError {
    StageError::AssetLoad {
        index,
        path: path.to_string(),
        reason: format!("{e:?}"),
    }
}

pub async fn load_image(index: usize, src: &str) -> Result<LoadedMedia, StageError> {
    let img = web::HtmlImageElement::new().map_err(|e| asset_error(index, src, e))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(src);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| asset_error(index, src, e))?;
    let window = web::window().ok_or_else(|| asset_error(index, src, "no window"))?;
    let pending = window
        .create_image_bitmap_with_html_image_element(&img)
        .map_err(|e| asset_error(index, src, e))?;
    let bitmap: web::ImageBitmap = JsFuture::from(pending)
        .await
        .and_then(|v| v.dyn_into())
        .map_err(|e| asset_error(index, src, e))?;
    Ok(LoadedMedia {
        width: bitmap.width().max(1),
        height: bitmap.height().max(1),
        source: MediaSource::Bitmap(bitmap),
        kind: MediaKind::Image,
    })
}

/// Wait until `video` has a frame, then start muted looping playback.
pub async fn open_video(
    index: usize,
    src: &str,
    video: web::HtmlVideoElement,
) -> Result<LoadedMedia, StageError> {
    // HAVE_CURRENT_DATA
    if video.ready_state() < 2 {
        JsFuture::from(event_promise(&video, "loadeddata", "error"))
            .await
            .map_err(|e| asset_error(index, src, e))?;
    }
    if let Ok(playing) = video.play() {
        spawn_local(async move {
            if let Err(e) = JsFuture::from(playing).await {
                log::debug!("[assets] autoplay refused: {:?}", e);
            }
        });
    }
    Ok(LoadedMedia {
        width: video.video_width().max(1),
        height: video.video_height().max(1),
        source: MediaSource::Video(video),
        kind: MediaKind::Video,
    })
}

pub async fn load_source(index: usize, src: &str, kind: MediaKind) -> Result<LoadedMedia, StageError> {
    match kind {
        MediaKind::Image => load_image(index, src).await,
        MediaKind::Video => {
            let video = create_video(src).map_err(|e| asset_error(index, src, e))?;
            open_video(index, src, video).await
        }
    }
}

/// Race `load` against the asset timeout; whichever settles first wins.
pub fn with_timeout(load: Promise) -> Promise {
    Promise::race(&Array::of2(&load, &timeout_promise(ASSET_LOAD_TIMEOUT_MS)))
}

/// Resolves when `ticket` is cancelled.
fn cancel_promise(ticket: &MountTicket) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        ticket.on_cancel(move || {
            _ = resolve.call0(&JsValue::NULL);
        });
    })
}

type CreatedVideos = Rc<RefCell<Vec<(usize, web::HtmlVideoElement)>>>;

/// Load every source, in order, behind one barrier. Each slot ends up with
/// either its decoded media or a placeholder; no slot can hold the barrier
/// past the timeout. Cancelling `ticket` ends the barrier at once and
/// releases every video created so far.
pub async fn load_all(
    sources: &[SlideSource],
    ticket: &MountTicket,
) -> Result<Vec<LoadedMedia>, StageError> {
    let started = Instant::now();
    let slots: Rc<RefCell<Vec<Option<LoadedMedia>>>> =
        Rc::new(RefCell::new(sources.iter().map(|_| None).collect()));
    let open = Rc::new(Cell::new(true));
    let created: CreatedVideos = Rc::new(RefCell::new(Vec::new()));
    {
        let created = created.clone();
        ticket.on_cancel(move || {
            for (_, video) in created.borrow().iter() {
                release_video(video);
            }
        });
    }
    let pending = Array::new();

    for (index, slide) in sources.iter().enumerate() {
        let slots = slots.clone();
        let open = open.clone();
        let created = created.clone();
        let src = slide.source.clone();
        let kind = slide.media_kind();
        let load = future_to_promise(async move {
            let loaded = match kind {
                MediaKind::Image => load_image(index, &src).await,
                MediaKind::Video => match create_video(&src) {
                    Ok(video) => {
                        created.borrow_mut().push((index, video.clone()));
                        open_video(index, &src, video).await
                    }
                    Err(e) => Err(asset_error(index, &src, e)),
                },
            };
            match loaded {
                Ok(media) if open.get() => {
                    if let Some(slot) = slots.borrow_mut().get_mut(index) {
                        *slot = Some(media);
                    }
                }
                Ok(media) => {
                    log::warn!("[assets] {} arrived after the barrier; discarded", src);
                    media.release();
                }
                Err(e) => log::warn!("[assets] {}", e),
            }
            Ok(JsValue::UNDEFINED)
        });
        pending.push(&with_timeout(load));
    }

    let barrier = Promise::race(&Array::of2(&Promise::all(&pending), &cancel_promise(ticket)));
    if let Err(e) = JsFuture::from(barrier).await {
        log::error!("[assets] barrier failed: {:?}", e);
    }
    open.set(false);
    let loaded = std::mem::take(&mut *slots.borrow_mut());

    if ticket.is_cancelled() {
        for media in loaded.into_iter().flatten() {
            media.release();
        }
        log::info!("[assets] load cancelled after {} ms", started.elapsed().as_millis());
        return Err(StageError::Superseded);
    }

    // Videos that timed out keep fetching unless stopped here
    for (index, video) in created.borrow().iter() {
        if loaded.get(*index).is_some_and(Option::is_none) {
            release_video(video);
        }
    }

    let media: Vec<LoadedMedia> = loaded
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.unwrap_or_else(|| {
                log::warn!("[assets] slide {} uses a placeholder", i);
                LoadedMedia::placeholder()
            })
        })
        .collect();
    log::info!(
        "[assets] {} sources ready in {} ms",
        media.len(),
        started.elapsed().as_millis()
    );
    Ok(media)
}
