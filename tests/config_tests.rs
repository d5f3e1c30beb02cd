// Host-side tests for stage configuration, slide metadata and error handling.
#![allow(dead_code)]

mod common;

use common::core::config::{SlideSource, StageConfig};
use common::core::constants::{BASE_SCROLL_PER_FRAME, RIPPLE_THRESHOLD, VIDEO_CROP};
use common::core::error::StageError;
use common::core::slides::{slide_size, MediaKind, SlideMeta, SlideSet};
use common::{approx, EPS};
use glam::Vec2;

#[test]
fn default_config_lists_ten_linked_slides() {
    let cfg = StageConfig::default();
    assert_eq!(cfg.slides.len(), 10);
    assert!(cfg.slides.iter().all(|s| s.href.is_some()));
    assert_eq!(cfg.slides[1].media_kind(), MediaKind::Video);
    assert_eq!(cfg.slides[9].href.as_deref(), Some("/about"));
    assert!(cfg.auto_start);
    assert!(cfg.validate().is_ok());
}

#[test]
fn minimal_json_fills_defaults() {
    let cfg = StageConfig::from_json(r#"{"slides":[{"source":"img/a.png"}]}"#).expect("valid");
    assert_eq!(cfg.slides, vec![SlideSource::new("img/a.png", None)]);
    assert_eq!(cfg.base_scroll, BASE_SCROLL_PER_FRAME);
    assert_eq!(cfg.ripple_threshold, RIPPLE_THRESHOLD);
    assert!(cfg.auto_start);

    let empty = StageConfig::from_json("{}").expect("all defaults");
    assert_eq!(empty.slides.len(), 10);
}

#[test]
fn json_overrides_tuning() {
    let cfg = StageConfig::from_json(
        r#"{"slides":[{"source":"a.webm","href":"/a"}],"base_scroll":0.02,"ripple_threshold":80,"auto_start":false}"#,
    )
    .expect("valid");
    assert!(approx(cfg.base_scroll, 0.02, EPS));
    assert!(approx(cfg.ripple_threshold, 80.0, EPS));
    assert!(!cfg.auto_start);
    assert_eq!(cfg.slides[0].media_kind(), MediaKind::Video);
}

#[test]
fn invalid_configs_are_rejected() {
    for text in [
        r#"{"slides":[]}"#,
        r#"{"slides":[{"source":"  "}]}"#,
        r#"{"ripple_threshold":0}"#,
        r#"{"ripple_threshold":-5}"#,
        r#"{"slides":"nope"}"#,
        "not json",
    ] {
        match StageConfig::from_json(text) {
            Err(StageError::InvalidConfig(_)) => {}
            other => panic!("{} should be invalid, got {:?}", text, other),
        }
    }
}

#[test]
fn media_kind_ignores_query_and_case() {
    assert_eq!(MediaKind::from_path("video/clip.MP4?v=2"), MediaKind::Video);
    assert_eq!(MediaKind::from_path("a.webm#t=3"), MediaKind::Video);
    assert_eq!(MediaKind::from_path("img/mp4.png"), MediaKind::Image);
    assert_eq!(MediaKind::from_path(""), MediaKind::Image);
}

#[test]
fn images_flip_and_videos_crop() {
    let image = MediaKind::Image.uv_transform();
    assert_eq!(image.apply(Vec2::ZERO), Vec2::new(1.0, 0.0));
    assert_eq!(image.apply(Vec2::ONE), Vec2::new(0.0, 1.0));

    let video = MediaKind::Video.uv_transform();
    assert!((video.apply(Vec2::ZERO) - Vec2::splat(VIDEO_CROP)).length() < EPS);
    assert!((video.apply(Vec2::ONE) - Vec2::splat(1.0 - VIDEO_CROP)).length() < EPS);
    assert_eq!(video.to_array()[2], VIDEO_CROP);

    assert!(MediaKind::Image.gamma_corrected());
    assert!(!MediaKind::Video.gamma_corrected());
}

fn meta(index: usize, aspect: f32) -> SlideMeta {
    SlideMeta {
        index,
        source: format!("img/{index}.png"),
        media_kind: MediaKind::Image,
        aspect,
        href: None,
    }
}

#[test]
fn slide_set_validates_order_and_aspect() {
    let set = SlideSet::new(vec![meta(0, 1.5), meta(1, 0.75)]).expect("valid");
    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
    assert_eq!(set.aspect(1), 0.75);
    assert_eq!(set.aspect(9), 1.0);
    assert_eq!(set.get(0).map(SlideMeta::size), Some(slide_size(1.5)));
    assert_eq!(slide_size(2.0), Vec2::new(3.0, 1.5));

    assert!(matches!(
        SlideSet::new(vec![meta(1, 1.0)]),
        Err(StageError::InvalidConfig(_))
    ));
    match SlideSet::new(vec![meta(0, 1.0), meta(1, 0.0)]) {
        Err(StageError::AssetLoad { index, path, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(path, "img/1.png");
        }
        other => panic!("expected asset error, got {:?}", other),
    }
}

#[test]
fn missing_mount_and_superseded_are_silent() {
    assert!(StageError::MissingMount("webgl").is_silent());
    assert!(StageError::Superseded.is_silent());
    assert!(!StageError::Gpu("no adapter".into()).is_silent());
    assert!(!StageError::InvalidConfig("x".into()).is_silent());
    assert_eq!(
        StageError::MissingMount("webgl").to_string(),
        "render surface #webgl not present"
    );
}
