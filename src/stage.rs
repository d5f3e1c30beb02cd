use crate::captions::{self, CaptionBlocks};
use crate::constants::{CANVAS_CLASS, MOUNT_ID};
use crate::core::{MountTicket, PendingInput, SceneState, SlideMeta, SlideSet, StageError};
use crate::dom;
use crate::events::{self, ListenerRegistry};
use crate::frame::{self, FrameDriver, LoopHandle};
use crate::loader::{self, LoadedMedia};
use crate::navigation;
use crate::render::StageRenderer;
use crate::stalker::StalkerView;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame side of the stage: drains input, steps the scene, and carries
/// out what the step asked for.
struct StageFrame {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    pending: Rc<RefCell<PendingInput>>,
    scene: SceneState,
    renderer: StageRenderer,
    captions: CaptionBlocks,
    stalker: StalkerView,
    viewport: Vec2,
    pointer_client: Vec2,
}

impl FrameDriver for StageFrame {
    fn frame(&mut self) {
        let input = std::mem::take(&mut *self.pending.borrow_mut());
        if let Some(vp) = input.viewport {
            self.viewport = vp;
        }
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas, self.viewport);
        self.renderer.resize_if_needed(w, h);

        if let Some(px) = input.pointer {
            let rect = self.canvas.get_bounding_client_rect();
            self.pointer_client = px + Vec2::new(rect.left() as f32, rect.top() as f32);
            self.stalker.set_target(self.pointer_client);
        }

        let out = self.scene.step(input);

        match out.hover_changed {
            Some(true) => self.stalker.show(self.pointer_client),
            Some(false) => self.stalker.hide(),
            None => {}
        }
        for ev in &out.captions {
            self.captions.apply(ev);
        }
        if let Some(fullscreen) = out.fullscreen_changed {
            events::sync_buttons(&self.document, fullscreen);
        }
        if let Some(url) = out.navigate {
            self.stalker.hide();
            navigation::navigate(&url);
        }

        self.stalker.step();
        self.renderer.render(&self.scene);
    }
}

/// The carousel on one page view: canvas, GPU resources, listeners and the
/// frame loop. Dropping or tearing down releases all of it.
pub struct Stage {
    canvas: web::HtmlCanvasElement,
    driver: Rc<RefCell<StageFrame>>,
    media: Vec<LoadedMedia>,
    listeners: ListenerRegistry,
    frame_loop: LoopHandle,
    released: bool,
}

fn create_canvas(document: &web::Document, mount: &web::Element) -> Result<web::HtmlCanvasElement, StageError> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| dom::js_err("create canvas", e))?
        .dyn_into()
        .map_err(|_| StageError::Dom("created element is not a canvas".into()))?;
    canvas.set_class_name(CANVAS_CLASS);
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    mount
        .append_child(&canvas)
        .map_err(|e| dom::js_err("append canvas", e))?;
    Ok(canvas)
}

fn slide_set(sources: &[crate::core::SlideSource], media: &[LoadedMedia]) -> Result<SlideSet, StageError> {
    let metas = sources
        .iter()
        .zip(media)
        .enumerate()
        .map(|(index, (src, m))| SlideMeta {
            index,
            source: src.source.clone(),
            media_kind: m.kind,
            aspect: m.aspect(),
            href: src.href.clone(),
        })
        .collect();
    SlideSet::new(metas)
}

impl Stage {
    /// Build the stage inside `#webgl`. Resolves only after every slide
    /// source has loaded or been replaced by a placeholder. A cancelled
    /// `ticket` ends the mount with `Superseded` and nothing left behind.
    pub async fn mount(document: &web::Document, ticket: &MountTicket) -> Result<Self, StageError> {
        let mount = document
            .get_element_by_id(MOUNT_ID)
            .ok_or(StageError::MissingMount(MOUNT_ID))?;
        let window = web::window().ok_or_else(|| StageError::Dom("no window".into()))?;
        let config = dom::read_stage_config(document);
        let canvas = create_canvas(document, &mount)?;
        let viewport = dom::viewport_css();
        dom::sync_canvas_backing_size(&canvas, viewport);

        let media = match loader::load_all(&config.slides, ticket).await {
            Ok(m) => m,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };
        let abort = |media: &[LoadedMedia], canvas: &web::HtmlCanvasElement| {
            for m in media {
                m.release();
            }
            canvas.remove();
        };
        if !canvas.is_connected() {
            abort(&media, &canvas);
            return Err(StageError::MissingMount(MOUNT_ID));
        }

        let slides = match slide_set(&config.slides, &media) {
            Ok(s) => s,
            Err(e) => {
                abort(&media, &canvas);
                return Err(e);
            }
        };
        let renderer = match StageRenderer::new(&canvas, &media).await {
            Ok(r) => r,
            Err(e) => {
                abort(&media, &canvas);
                return Err(StageError::Gpu(format!("{e:#}")));
            }
        };
        if let Err(e) = ticket.check() {
            renderer.destroy();
            abort(&media, &canvas);
            return Err(e);
        }

        let mut scene = SceneState::new(slides, &config, viewport);
        let captions = CaptionBlocks::collect(document, scene.slides().len());
        scene.set_caption_counts(captions.counts());
        captions.hide_all();
        events::sync_buttons(document, false);

        let pending = Rc::new(RefCell::new(PendingInput::default()));
        let mut listeners = ListenerRegistry::new();
        events::wire_stage_input(&mut listeners, &window, document, &canvas, &pending);

        let driver = Rc::new(RefCell::new(StageFrame {
            document: document.clone(),
            canvas: canvas.clone(),
            pending,
            scene,
            renderer,
            captions,
            stalker: StalkerView::find(document),
            viewport,
            pointer_client: Vec2::ZERO,
        }));
        let frame_loop = frame::start_loop(driver.clone());
        log::info!(
            "[stage] mounted {} slides, caption panel {:?}",
            media.len(),
            captions::panel_extent(document)
        );
        Ok(Self {
            canvas,
            driver,
            media,
            listeners,
            frame_loop,
            released: false,
        })
    }

    pub fn is_fullscreen(&self) -> bool {
        self.driver
            .try_borrow()
            .map(|d| d.scene.is_fullscreen())
            .unwrap_or(false)
    }

    fn release(&mut self) {
        if std::mem::replace(&mut self.released, true) {
            return;
        }
        self.frame_loop.stop();
        self.listeners.clear();
        if let Ok(mut d) = self.driver.try_borrow_mut() {
            d.stalker.hide();
            d.captions.hide_all();
            d.renderer.destroy();
        }
        for m in &self.media {
            m.release();
        }
        self.canvas.remove();
        log::info!("[stage] torn down");
    }

    /// Stop the loop, detach listeners, free GPU and media resources, and
    /// remove the canvas.
    pub fn teardown(mut self) {
        self.release();
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.release();
    }
}
