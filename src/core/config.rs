use serde::Deserialize;

use super::constants::{BASE_SCROLL_PER_FRAME, RIPPLE_THRESHOLD};
use super::error::StageError;
use super::slides::MediaKind;

/// One entry of the carousel as authored on the page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SlideSource {
    pub source: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl SlideSource {
    pub fn new(source: &str, href: Option<&str>) -> Self {
        Self {
            source: source.to_string(),
            href: href.map(str::to_string),
        }
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_path(&self.source)
    }
}

/// Page-level stage configuration. Everything is optional in the JSON block;
/// missing fields fall back to the built-in slide list and tuning constants.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub slides: Vec<SlideSource>,
    pub base_scroll: f32,
    pub ripple_threshold: f32,
    /// Mount on load and on every router page view without host calls.
    pub auto_start: bool,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            slides: default_slides(),
            base_scroll: BASE_SCROLL_PER_FRAME,
            ripple_threshold: RIPPLE_THRESHOLD,
            auto_start: true,
        }
    }
}

impl StageConfig {
    pub fn from_json(text: &str) -> Result<Self, StageError> {
        let cfg: StageConfig =
            serde_json::from_str(text).map_err(|e| StageError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), StageError> {
        if self.slides.is_empty() {
            return Err(StageError::InvalidConfig("no slides".into()));
        }
        if let Some(i) = self.slides.iter().position(|s| s.source.trim().is_empty()) {
            return Err(StageError::InvalidConfig(format!("slide {i} has an empty source")));
        }
        if !(self.ripple_threshold > 0.0) {
            return Err(StageError::InvalidConfig("ripple_threshold must be positive".into()));
        }
        if !self.base_scroll.is_finite() {
            return Err(StageError::InvalidConfig("base_scroll must be finite".into()));
        }
        Ok(())
    }
}

fn default_slides() -> Vec<SlideSource> {
    [
        ("img/good_portforio.png", "/detail/good_portforio"),
        ("video/sakaba.mp4", "/detail/sakaba"),
        ("img/sankou.webp", "/detail/sankou"),
        ("img/podcast.png", "/detail/podcast"),
        ("img/app.png", "/detail/app"),
        ("video/arcraft.mp4", "/detail/arcraft"),
        ("img/attcraft_4th.png", "/detail/attcraft_4th"),
        ("img/x_post_nami.webp", "/detail/x_post_nami"),
        ("img/x_post_kuu.webp", "/detail/x_post_kuu"),
        ("img/about.jpg", "/about"),
    ]
    .iter()
    .map(|(src, href)| SlideSource::new(src, Some(href)))
    .collect()
}
