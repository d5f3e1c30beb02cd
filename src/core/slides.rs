use glam::Vec2;

use super::constants::{GAMMA, SLIDE_HEIGHT, VIDEO_CROP};
use super::easing::lerp;
use super::error::StageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        let bare = lower.split(['?', '#']).next().unwrap_or("");
        if bare.ends_with(".mp4") || bare.ends_with(".webm") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Texture coordinate transform applied wherever this kind is sampled.
    /// Images are authored mirrored and get flipped horizontally; video frames
    /// are right-reading but carry encoder borders, so they are inset instead.
    pub fn uv_transform(self) -> UvTransform {
        match self {
            MediaKind::Image => UvTransform {
                scale: Vec2::new(-1.0, 1.0),
                offset: Vec2::new(1.0, 0.0),
            },
            MediaKind::Video => UvTransform {
                scale: Vec2::splat(1.0 - VIDEO_CROP * 2.0),
                offset: Vec2::splat(VIDEO_CROP),
            },
        }
    }

    /// Whether samples of this kind come back linear and are gamma-encoded
    /// for display. Holds for every pass that draws media.
    pub fn gamma_corrected(self) -> bool {
        matches!(self, MediaKind::Image)
    }
}

// Host-side reference of the colour path shared by the media shaders.

/// Channel a shader reads back from a texel stored as `stored`. Images sit in
/// an sRGB texture and decode to linear; video frames are read as stored.
pub fn sampled_channel(stored: f32, kind: MediaKind) -> f32 {
    if !kind.gamma_corrected() {
        return stored;
    }
    if stored <= 0.04045 {
        stored / 12.92
    } else {
        ((stored + 0.055) / 1.055).powf(2.4)
    }
}

/// Display encoding of a sampled channel for the given media kind.
pub fn encode_channel(value: f32, kind: MediaKind) -> f32 {
    if kind.gamma_corrected() {
        value.max(0.0).powf(1.0 / GAMMA)
    } else {
        value
    }
}

/// What any media pass writes for a stored texel, before fog or blending.
pub fn display_channel(stored: f32, kind: MediaKind) -> f32 {
    encode_channel(sampled_channel(stored, kind), kind)
}

/// Slide pass output for a stored texel at the given fog amount.
pub fn slide_channel(stored: f32, kind: MediaKind, fog: f32, fog_color: f32) -> f32 {
    lerp(display_channel(stored, kind), fog_color, fog)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvTransform {
    pub scale: Vec2,
    pub offset: Vec2,
}

impl UvTransform {
    #[inline]
    pub fn apply(&self, uv: Vec2) -> Vec2 {
        uv * self.scale + self.offset
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.scale.x, self.scale.y, self.offset.x, self.offset.y]
    }
}

/// Immutable description of one carousel entry, fixed once its texture is ready.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideMeta {
    pub index: usize,
    pub source: String,
    pub media_kind: MediaKind,
    pub aspect: f32,
    pub href: Option<String>,
}

impl SlideMeta {
    /// Quad size at the reference height.
    pub fn size(&self) -> Vec2 {
        slide_size(self.aspect)
    }
}

#[inline]
pub fn slide_size(aspect: f32) -> Vec2 {
    Vec2::new(aspect * SLIDE_HEIGHT, SLIDE_HEIGHT)
}

/// Loaded slides in display order. Only constructed once every texture slot
/// has resolved, so holding one means the asset barrier has been passed.
#[derive(Clone, Debug, Default)]
pub struct SlideSet {
    slides: Vec<SlideMeta>,
}

impl SlideSet {
    pub fn new(slides: Vec<SlideMeta>) -> Result<Self, StageError> {
        for (i, s) in slides.iter().enumerate() {
            if s.index != i {
                return Err(StageError::InvalidConfig(format!(
                    "slide at position {i} carries index {}",
                    s.index
                )));
            }
            if !(s.aspect.is_finite() && s.aspect > 0.0) {
                return Err(StageError::AssetLoad {
                    index: i,
                    path: s.source.clone(),
                    reason: format!("non-positive aspect {}", s.aspect),
                });
            }
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SlideMeta> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SlideMeta> {
        self.slides.iter()
    }

    pub fn aspect(&self, index: usize) -> f32 {
        self.slides.get(index).map(|s| s.aspect).unwrap_or(1.0)
    }
}
