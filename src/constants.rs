/// DOM hooks and presentation constants for the browser layer.
///
/// Animation tuning lives in `core::constants`; this file only names the page
/// elements the stage binds to and how it draws into them.
// Carousel mount: a wrapper the stage appends its canvas to
pub const MOUNT_ID: &str = "webgl";
pub const CANVAS_CLASS: &str = "slide-stage-canvas";
pub const CONFIG_SCRIPT_ID: &str = "stage-config";

// Mode buttons (all optional)
pub const FULLSCREEN_BTN_ID: &str = "camera-move-btn";
pub const RESET_BTN_ID: &str = "camera-reset-btn";
pub const ORBIT_BTN_ID: &str = "camera-orbit-btn";

// Caption blocks shown in full-screen mode, keyed by `data-slide`
pub const CAPTION_PANEL_ID: &str = "detail-captions";
pub const CAPTION_BLOCK_SELECTOR: &str = ".js-detail-caption";
pub const CAPTION_ITEM_SELECTOR: &str = ".js-detail-item";
pub const CAPTION_BLOCK_ACTIVE: &str = "is-current";
pub const CAPTION_ITEM_SHOWN: &str = "is-show";

// Texture cursor stalker
pub const STALKER_SELECTOR: &str = ".js-texture-stalker";
pub const STALKER_CIRCLE_ID: &str = "texture-outer-circle";
pub const STALKER_TEXT_ID: &str = "texture-stalker-text";
pub const STALKER_ACTIVE: &str = "is-active";

// Detail page viewer
pub const DETAIL_CANVAS_ID: &str = "detail-canvas";
pub const DETAIL_MEDIA_ID: &str = "detail-canvas-img";

// Page lifecycle event fired by the SPA router after each swap
pub const PAGEVIEW_EVENT: &str = "swup:pageview";

// Backing-store resolution cap
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Transparent clear; fog blends toward white
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;
pub const FOG_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
