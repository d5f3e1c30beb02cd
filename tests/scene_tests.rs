// Host-side tests for the per-frame scene step: input routing, picking,
// navigation latch and full-screen mode.
#![allow(dead_code)]

mod common;

use common::core::carousel::CarouselMode;
use common::core::config::StageConfig;
use common::core::entrance::EntrancePhase;
use common::core::ripple::{CaptionEvent, PanelExtent, RipplePhase};
use common::core::scene::{PendingInput, PickTarget, SceneState, StageCommand};
use common::core::slides::{MediaKind, SlideMeta, SlideSet};
use common::{approx, EPS};
use glam::{Vec2, Vec4};

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
const COUNT: usize = 10;

/// Even slides link somewhere, odd ones do not.
fn scene() -> SceneState {
    let metas = (0..COUNT)
        .map(|i| SlideMeta {
            index: i,
            source: format!("img/{i}.png"),
            media_kind: MediaKind::Image,
            aspect: 1.0,
            href: (i % 2 == 0).then(|| format!("/detail/{i}")),
        })
        .collect();
    let slides = SlideSet::new(metas).expect("valid slides");
    let config = StageConfig {
        base_scroll: 0.0,
        ..StageConfig::default()
    };
    SceneState::new(slides, &config, VIEWPORT)
}

fn idle() -> PendingInput {
    PendingInput::default()
}

fn with_command(cmd: StageCommand) -> PendingInput {
    let mut input = idle();
    input.commands.push(cmd);
    input
}

/// Run the entrance and let the camera settle.
fn ready_scene() -> SceneState {
    let mut s = scene();
    for _ in 0..3000 {
        s.step(idle());
        if s.entrance_phase() == EntrancePhase::Done && !s.camera().is_moving() {
            return s;
        }
    }
    panic!("scene never settled");
}

/// Viewport pixel of a slide's centre, if it is on screen and picks as itself.
fn pixel_of(s: &SceneState, index: usize) -> Option<Vec2> {
    let pos = s.poses()[index].position;
    let clip = s.camera().view_projection() * Vec4::new(pos.x, pos.y, pos.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let px = Vec2::new((ndc.x + 1.0) * 0.5 * VIEWPORT.x, (1.0 - ndc.y) * 0.5 * VIEWPORT.y);
    if px.x < 0.0 || px.y < 0.0 || px.x > VIEWPORT.x || px.y > VIEWPORT.y {
        return None;
    }
    match s.pick(px) {
        Some(PickTarget::Slide(hit)) if hit.index == index => Some(px),
        _ => None,
    }
}

fn pickable(s: &SceneState, linked: bool) -> (usize, Vec2) {
    (0..COUNT)
        .filter(|i| (i % 2 == 0) == linked)
        .find_map(|i| pixel_of(s, i).map(|px| (i, px)))
        .expect("a pickable slide on screen")
}

#[test]
fn pending_input_reports_emptiness() {
    let mut input = idle();
    assert!(input.is_empty());
    input.track_scroll = 0.2;
    assert!(!input.is_empty());
}

#[test]
fn entrance_runs_before_anything_else() {
    let mut s = scene();
    let mut entered = Vec::new();
    for _ in 0..3000 {
        if let Some(p) = s.step(idle()).entered_phase {
            entered.push(p);
        }
        if s.entrance_phase() == EntrancePhase::Done {
            break;
        }
    }
    assert_eq!(
        entered,
        vec![EntrancePhase::Expand, EntrancePhase::LineUp, EntrancePhase::Done]
    );
    assert!(s.frame_count() > 100);
}

#[test]
fn track_scroll_during_entrance_is_dropped() {
    let mut s = scene();
    let mut input = idle();
    input.track_scroll = 5.0;
    s.step(input);
    let s = {
        let mut s = s;
        for _ in 0..3000 {
            s.step(idle());
            if s.entrance_phase() == EntrancePhase::Done {
                break;
            }
        }
        s.step(idle());
        s
    };
    for (i, p) in s.poses().iter().enumerate() {
        assert!(approx(p.track_x, i as f32 * 1.5, EPS));
    }
}

#[test]
fn track_scroll_moves_settled_slides() {
    let mut s = ready_scene();
    let mut input = idle();
    input.track_scroll = 0.75;
    s.step(input);
    assert!(approx(s.poses()[2].track_x, 3.0 - 0.75, EPS));
    assert!(approx(s.poses()[2].position.x, 3.0 - 0.75, EPS));
}

#[test]
fn hover_toggles_once() {
    let mut s = ready_scene();
    let (index, px) = pickable(&s, false);

    let mut input = idle();
    input.pointer = Some(px);
    let out = s.step(input);
    assert_eq!(out.hover_changed, Some(true));
    assert_eq!(s.hovered(), Some(index));
    assert_eq!(s.poses().iter().filter(|p| p.hovered).count(), 1);

    let mut input = idle();
    input.pointer = Some(px);
    assert_eq!(s.step(input).hover_changed, None);

    let corner = Vec2::new(1.0, 1.0);
    assert!(s.pick(corner).is_none());
    let mut input = idle();
    input.pointer = Some(corner);
    assert_eq!(s.step(input).hover_changed, Some(false));
    assert_eq!(s.hovered(), None);
}

#[test]
fn click_without_link_does_not_navigate() {
    let mut s = ready_scene();
    let (_, px) = pickable(&s, false);
    let mut input = idle();
    input.clicks.push(px);
    let out = s.step(input);
    assert!(out.navigate.is_none());
    assert!(!s.is_navigating());
    assert!(s.poses().iter().all(|p| !p.clicked && !p.hovered));
    assert_eq!(s.carousel_mode(), CarouselMode::Idle);
}

#[test]
fn click_on_linked_slide_navigates_once() {
    let mut s = ready_scene();
    let (index, px) = pickable(&s, true);
    let mut input = idle();
    input.clicks.push(px);
    input.clicks.push(px);
    let out = s.step(input);
    assert_eq!(out.navigate, Some(format!("/detail/{index}")));
    assert!(s.is_navigating());
    assert!(s.poses()[index].clicked);
    assert_eq!(s.carousel_mode(), CarouselMode::Clicked(index));

    let mut input = idle();
    input.clicks.push(px);
    assert!(s.step(input).navigate.is_none());
    assert_eq!(s.poses().iter().filter(|p| p.clicked).count(), 1);
}

#[test]
fn fullscreen_needs_finished_entrance() {
    let mut s = scene();
    let out = s.step(with_command(StageCommand::EnterFullscreen));
    assert_eq!(out.fullscreen_changed, None);
    assert!(!s.is_fullscreen());
}

#[test]
fn fullscreen_round_trip() {
    let mut s = ready_scene();
    let out = s.step(with_command(StageCommand::EnterFullscreen));
    assert_eq!(out.fullscreen_changed, Some(true));
    assert!(out.captions.contains(&CaptionEvent::Show { slide: 0 }));
    assert!(s.is_fullscreen());
    assert!(s.poses().iter().all(|p| !p.visible));

    for _ in 0..300 {
        s.step(idle());
    }
    assert_eq!(s.ripple().phase(), RipplePhase::Steady);
    match s.pick(VIEWPORT * 0.5) {
        Some(PickTarget::Plane { uv }) => assert!((uv - Vec2::splat(0.5)).length() < 1e-2),
        other => panic!("expected the plane, got {:?}", other),
    }

    // Entering again is a no-op
    assert_eq!(s.step(with_command(StageCommand::EnterFullscreen)).fullscreen_changed, None);

    let out = s.step(with_command(StageCommand::Reset));
    assert_eq!(out.fullscreen_changed, Some(false));
    assert!(out.captions.contains(&CaptionEvent::Hide { slide: 0 }));
    assert!(s.poses().iter().all(|p| p.visible));
    assert_eq!(s.carousel_mode(), CarouselMode::Returning);

    for _ in 0..500 {
        s.step(idle());
    }
    assert_eq!(s.carousel_mode(), CarouselMode::Idle);
}

#[test]
fn page_scroll_drives_ripple_only_in_fullscreen() {
    let mut s = ready_scene();
    let mut input = idle();
    input.page_scroll.push((500.0, PanelExtent::PINNED));
    s.step(input);
    assert!(!s.ripple().is_active());

    s.step(with_command(StageCommand::EnterFullscreen));
    for _ in 0..300 {
        s.step(idle());
    }
    let before = s.fullscreen_size();
    let mut input = idle();
    input.page_scroll.push((200.0, PanelExtent::PINNED));
    s.step(input);
    assert!(s.ripple().is_transitioning());
    assert_eq!(s.ripple().next(), 1);
    for _ in 0..300 {
        s.step(idle());
    }
    assert_eq!(s.ripple().current(), 1);
    assert_eq!(s.fullscreen_size(), before);
}

#[test]
fn orbit_and_reset() {
    let mut s = ready_scene();
    s.step(with_command(StageCommand::EnterOrbit));
    assert_eq!(s.carousel_mode(), CarouselMode::CameraMoved);
    for _ in 0..200 {
        s.step(idle());
    }
    s.step(with_command(StageCommand::Reset));
    assert_eq!(s.carousel_mode(), CarouselMode::Returning);
}

#[test]
fn viewport_change_updates_camera_aspect() {
    let mut s = scene();
    let mut input = idle();
    input.viewport = Some(Vec2::new(1000.0, 500.0));
    s.step(input);
    assert!(approx(s.camera().aspect, 2.0, EPS));
}
