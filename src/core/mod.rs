pub mod camera;
pub mod carousel;
pub mod config;
pub mod constants;
pub mod curl;
pub mod easing;
pub mod entrance;
pub mod error;
pub mod layout;
pub mod mount;
pub mod picking;
pub mod pose;
pub mod ripple;
pub mod scene;
pub mod slides;
pub mod stalker;

pub use camera::CameraRig;
pub use config::{SlideSource, StageConfig};
pub use curl::{CurlParams, CurlState};
pub use error::StageError;
pub use mount::{MountSlot, MountTicket};
pub use ripple::{CaptionEvent, PanelExtent, RippleFrame};
pub use scene::{FrameOutput, PendingInput, SceneState, StageCommand};
pub use slides::{MediaKind, SlideMeta, SlideSet};
pub use stalker::{Stalker, StalkerShape};

// Shaders bundled as string constants
pub static SLIDE_WGSL: &str = include_str!("../../shaders/slide.wgsl");
pub static RIPPLE_WGSL: &str = include_str!("../../shaders/ripple.wgsl");
pub static CURL_WGSL: &str = include_str!("../../shaders/curl.wgsl");
