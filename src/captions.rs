use crate::constants::{
    CAPTION_BLOCK_ACTIVE, CAPTION_BLOCK_SELECTOR, CAPTION_ITEM_SELECTOR, CAPTION_ITEM_SHOWN,
    CAPTION_PANEL_ID,
};
use crate::core::{CaptionEvent, PanelExtent};
use crate::dom;
use web_sys as web;

struct CaptionBlock {
    root: web::Element,
    items: Vec<web::Element>,
}

/// Per-slide caption blocks found on the page, indexed by slide. Slides
/// without a block simply have nothing to reveal.
pub struct CaptionBlocks {
    blocks: Vec<Option<CaptionBlock>>,
}

impl CaptionBlocks {
    pub fn collect(document: &web::Document, slide_count: usize) -> Self {
        let mut blocks: Vec<Option<CaptionBlock>> = (0..slide_count).map(|_| None).collect();
        if let Some(root) = document.document_element() {
            for el in dom::query_all(&root, CAPTION_BLOCK_SELECTOR) {
                let Some(index) = el
                    .get_attribute("data-slide")
                    .and_then(|v| v.trim().parse::<usize>().ok())
                else {
                    continue;
                };
                let Some(slot) = blocks.get_mut(index) else {
                    log::warn!("[captions] block for slide {} has no slide", index);
                    continue;
                };
                let items = dom::query_all(&el, CAPTION_ITEM_SELECTOR);
                *slot = Some(CaptionBlock { root: el, items });
            }
        }
        Self { blocks }
    }

    /// Number of reveal items per slide.
    pub fn counts(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .map(|b| b.as_ref().map_or(0, |b| b.items.len()))
            .collect()
    }

    pub fn apply(&self, ev: &CaptionEvent) {
        match *ev {
            CaptionEvent::Show { slide } => {
                if let Some(b) = self.block(slide) {
                    for item in &b.items {
                        dom::toggle_class(item, CAPTION_ITEM_SHOWN, false);
                    }
                    dom::toggle_class(&b.root, CAPTION_BLOCK_ACTIVE, true);
                }
            }
            CaptionEvent::Reveal { slide, item } => {
                if let Some(el) = self.block(slide).and_then(|b| b.items.get(item)) {
                    dom::toggle_class(el, CAPTION_ITEM_SHOWN, true);
                }
            }
            CaptionEvent::Hide { slide } => {
                if let Some(b) = self.block(slide) {
                    hide_block(b);
                }
            }
        }
    }

    pub fn hide_all(&self) {
        for b in self.blocks.iter().flatten() {
            hide_block(b);
        }
    }

    fn block(&self, slide: usize) -> Option<&CaptionBlock> {
        self.blocks.get(slide).and_then(Option::as_ref)
    }
}

fn hide_block(b: &CaptionBlock) {
    dom::toggle_class(&b.root, CAPTION_BLOCK_ACTIVE, false);
    for item in &b.items {
        dom::toggle_class(item, CAPTION_ITEM_SHOWN, false);
    }
}

/// Scroll extremes of the caption panel right now. A missing panel counts
/// as pinned so paging is never held back by it.
pub fn panel_extent(document: &web::Document) -> PanelExtent {
    let Some(panel) = document.get_element_by_id(CAPTION_PANEL_ID) else {
        return PanelExtent::PINNED;
    };
    let top = panel.scroll_top();
    let max = panel.scroll_height() - panel.client_height();
    PanelExtent {
        at_top: top <= 0,
        // Fractional scroll positions can stop one pixel short
        at_bottom: top >= max - 1,
    }
}
