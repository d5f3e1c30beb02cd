// Host-side tests for full-screen paging and caption sequencing.
#![allow(dead_code)]

mod common;

use common::core::constants::{RIPPLE_EDGE_SPEED, RIPPLE_THRESHOLD};
use common::core::ripple::*;
use common::core::slides::{display_channel, encode_channel, slide_channel, MediaKind};
use common::{approx, EPS};

const MAX_FRAMES: usize = 2000;

fn steady(count: usize, captions: Vec<usize>) -> RippleEngine {
    let mut engine = RippleEngine::new(count, RIPPLE_THRESHOLD);
    engine.set_caption_counts(captions);
    engine.enter();
    settle(&mut engine);
    engine
}

/// Step until steady with no caption animation pending; returns every event seen.
fn settle(engine: &mut RippleEngine) -> Vec<CaptionEvent> {
    let mut seen = Vec::new();
    for _ in 0..MAX_FRAMES {
        seen.extend(engine.step());
        if engine.accepts_trigger() {
            return seen;
        }
    }
    panic!("ripple never settled");
}

#[test]
fn enter_shows_first_slide_and_fades_in() {
    let mut engine = RippleEngine::new(3, RIPPLE_THRESHOLD);
    let events = engine.enter();
    assert_eq!(events.as_slice(), &[CaptionEvent::Show { slide: 0 }]);
    assert_eq!(engine.phase(), RipplePhase::Entering);
    assert!(!engine.accepts_trigger());
    assert_eq!(engine.frame().opacity, 0.0);

    settle(&mut engine);
    assert_eq!(engine.phase(), RipplePhase::Steady);
    assert!(approx(engine.frame().opacity, 1.0, EPS));
    assert!(engine.enter().is_empty());
}

#[test]
fn enter_with_no_slides_does_nothing() {
    let mut engine = RippleEngine::new(0, RIPPLE_THRESHOLD);
    assert!(engine.enter().is_empty());
    assert!(!engine.is_active());
}

#[test]
fn caption_items_reveal_with_a_stagger() {
    let mut engine = RippleEngine::new(3, RIPPLE_THRESHOLD);
    engine.set_caption_counts(vec![2, 0, 0]);
    engine.enter();
    let first = engine.step();
    assert_eq!(first.as_slice(), &[CaptionEvent::Reveal { slide: 0, item: 0 }]);
    for _ in 0..5 {
        assert!(engine.step().is_empty());
    }
    let second = engine.step();
    assert_eq!(second.as_slice(), &[CaptionEvent::Reveal { slide: 0, item: 1 }]);
    assert!(!engine.captions_animating());
}

#[test]
fn threshold_accumulates_across_deltas() {
    let mut engine = steady(3, vec![]);
    assert_eq!(engine.push_scroll(100.0, PanelExtent::PINNED), None);
    assert!(approx(engine.accumulated(), 100.0, EPS));
    assert_eq!(engine.push_scroll(60.0, PanelExtent::PINNED), Some(1));
    assert!(engine.is_transitioning());
    assert_eq!(engine.next(), 1);
    assert_eq!(engine.accumulated(), 0.0);
}

#[test]
fn opposite_directions_both_count_toward_threshold() {
    let mut engine = steady(3, vec![]);
    assert_eq!(engine.push_scroll(-100.0, PanelExtent::PINNED), None);
    assert_eq!(engine.push_scroll(-60.0, PanelExtent::PINNED), Some(-1));
    assert_eq!(engine.next(), 2);
}

#[test]
fn scrollable_panel_absorbs_and_resets() {
    let mut engine = steady(3, vec![]);
    let mid = PanelExtent {
        at_top: false,
        at_bottom: false,
    };
    engine.push_scroll(120.0, PanelExtent::PINNED);
    assert_eq!(engine.push_scroll(400.0, mid), None);
    assert_eq!(engine.accumulated(), 0.0);
    assert!(!engine.is_transitioning());

    // At the bottom a downward gesture pages, an upward one scrolls the panel
    let bottom = PanelExtent {
        at_top: false,
        at_bottom: true,
    };
    assert!(!bottom.absorbs(10.0));
    assert!(bottom.absorbs(-10.0));
    assert_eq!(engine.push_scroll(200.0, bottom), Some(1));
}

#[test]
fn gestures_are_ignored_while_captions_animate() {
    let mut engine = RippleEngine::new(3, RIPPLE_THRESHOLD);
    engine.set_caption_counts(vec![1, 20, 0]);
    engine.enter();
    settle(&mut engine);
    engine.start(1);
    while engine.is_transitioning() {
        engine.step();
    }
    assert!(engine.captions_animating());
    assert_eq!(engine.push_scroll(1000.0, PanelExtent::PINNED), None);
    assert_eq!(engine.accumulated(), 0.0);
}

#[test]
fn second_start_during_transition_is_ignored() {
    let mut engine = steady(4, vec![]);
    assert!(engine.start(1));
    assert!(!engine.start(1));
    assert!(!engine.start(-1));
    assert_eq!(engine.next(), 1);
    assert_eq!(engine.push_scroll(500.0, PanelExtent::PINNED), None);
}

#[test]
fn transition_commits_with_caption_swap() {
    let mut engine = steady(3, vec![0, 1, 0]);
    engine.start(1);
    let mut frames = 0;
    let mut events = Vec::new();
    while engine.is_transitioning() {
        let f = engine.frame();
        assert_eq!((f.from, f.to), (0, 1));
        assert!(f.progress >= 0.0 && f.progress <= 1.0);
        events.extend(engine.step());
        frames += 1;
        assert!(frames < MAX_FRAMES);
    }
    assert!(frames > 100);
    assert_eq!(engine.current(), 1);
    assert_eq!(engine.next(), 1);
    assert_eq!(
        events,
        vec![
            CaptionEvent::Hide { slide: 0 },
            CaptionEvent::Show { slide: 1 },
            CaptionEvent::Reveal { slide: 1, item: 0 },
        ]
    );
    let f = engine.frame();
    assert_eq!((f.from, f.to, f.progress), (1, 1, 0.0));
}

#[test]
fn forward_then_back_returns_to_start() {
    let mut engine = steady(5, vec![]);
    engine.start(1);
    settle(&mut engine);
    engine.start(-1);
    settle(&mut engine);
    assert_eq!(engine.current(), 0);
}

#[test]
fn paging_wraps_both_ways() {
    let mut engine = steady(3, vec![]);
    engine.start(-1);
    settle(&mut engine);
    assert_eq!(engine.current(), 2);
    engine.start(1);
    settle(&mut engine);
    assert_eq!(engine.current(), 0);
}

#[test]
fn exit_hides_visible_captions() {
    let mut engine = steady(3, vec![]);
    engine.start(1);
    engine.step();
    let events = engine.exit();
    assert_eq!(
        events.as_slice(),
        &[CaptionEvent::Hide { slide: 0 }, CaptionEvent::Hide { slide: 1 }]
    );
    assert!(!engine.is_active());
    assert!(engine.step().is_empty());
    assert!(engine.exit().is_empty());
}

#[test]
fn clock_only_runs_while_active() {
    let mut engine = RippleEngine::new(2, RIPPLE_THRESHOLD);
    engine.step();
    assert_eq!(engine.frame().time, 0.0);
    engine.enter();
    engine.step();
    assert!(engine.frame().time > 0.0);
}

#[test]
fn mask_peaks_on_the_moving_edge() {
    assert_eq!(ripple_mask(0.0, 0.3), 0.0);
    let edge = 0.5 * RIPPLE_EDGE_SPEED;
    assert!(approx(ripple_mask(0.5, edge), 1.0, EPS));
    assert_eq!(ripple_mask(0.5, edge + 1.0), 0.0);
    assert_eq!(ripple_distortion(0.0, 1.0, 0.2), 0.0);
    assert_eq!(ripple_distortion(1.0, 1.0, 0.2), 0.0);
}

#[test]
fn bloom_opens_from_centre() {
    assert_eq!(bloom_mix(0.0, 0.5), 0.0);
    assert_eq!(bloom_mix(1.0, 0.0), 1.0);
    assert!(bloom_mix(0.5, 0.1) > bloom_mix(0.5, 0.55));
}

#[test]
fn images_are_gamma_encoded_videos_are_not() {
    assert_eq!(encode_channel(0.25, MediaKind::Video), 0.25);
    assert!(encode_channel(0.25, MediaKind::Image) > 0.25);
    assert_eq!(encode_channel(1.0, MediaKind::Image), 1.0);
}

#[test]
fn full_screen_plane_matches_carousel_colour() {
    for kind in [MediaKind::Image, MediaKind::Video] {
        for stored in [0.1, 0.25, 0.5, 0.75, 1.0] {
            let carousel = slide_channel(stored, kind, 0.0, 0.0);
            // Before the wipe starts, away from the centre, only the outgoing slide shows
            let plane = ripple_channel((stored, kind), (0.0, kind), 0.0, 0.3);
            assert!(
                approx(carousel, plane, EPS),
                "{kind:?} {stored}: carousel {carousel} vs plane {plane}"
            );
            let settled = ripple_channel((0.0, kind), (stored, kind), 1.0, 0.3);
            assert!(approx(carousel, settled, EPS));
        }
    }
}

#[test]
fn images_display_close_to_their_stored_value() {
    for stored in [0.25_f32, 0.5, 0.75] {
        let shown = display_channel(stored, MediaKind::Image);
        assert!((shown - stored).abs() < 0.02, "{stored} shown as {shown}");
    }
    assert_eq!(display_channel(0.5, MediaKind::Video), 0.5);
}
