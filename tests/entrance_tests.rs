// Host-side tests for the entrance choreography.
#![allow(dead_code)]

mod common;

use common::core::camera::CameraRig;
use common::core::constants::{
    rest_yaw, ASSEMBLE_START_Y, CAMERA_EXPAND, CAMERA_REST, CAMERA_START,
};
use common::core::entrance::{Entrance, EntrancePhase};
use common::core::layout::track_position;
use common::core::pose::SlidePose;
use common::{approx, approx_v3, EPS};
use glam::Vec2;

const MAX_FRAMES: usize = 5000;

fn fresh(count: usize) -> (Entrance, Vec<SlidePose>, CameraRig) {
    let entrance = Entrance::new(count);
    let mut poses: Vec<SlidePose> = (0..count)
        .map(|_| SlidePose::new(Vec2::new(1.5, 1.5), 0.0))
        .collect();
    entrance.prepare(&mut poses);
    (entrance, poses, CameraRig::new(16.0 / 9.0))
}

/// Step until done; returns the phases entered in order and the frame count.
fn run_to_done(
    entrance: &mut Entrance,
    poses: &mut [SlidePose],
    camera: &mut CameraRig,
) -> (Vec<EntrancePhase>, usize) {
    let mut entered = Vec::new();
    for frame in 0..MAX_FRAMES {
        camera.step();
        if let Some(phase) = entrance.step(poses, camera) {
            entered.push(phase);
        }
        if entrance.is_done() {
            return (entered, frame + 1);
        }
    }
    panic!("entrance did not finish in {} frames", MAX_FRAMES);
}

#[test]
fn prepare_places_slides_below_frame() {
    let (entrance, poses, _) = fresh(4);
    assert_eq!(entrance.phase(), EntrancePhase::Assemble);
    for p in &poses {
        assert!(approx(p.position.y, ASSEMBLE_START_Y, EPS));
        assert!(p.visible);
    }
}

#[test]
fn phases_run_in_order_and_finish() {
    let (mut entrance, mut poses, mut camera) = fresh(10);
    let (entered, frames) = run_to_done(&mut entrance, &mut poses, &mut camera);
    assert_eq!(
        entered,
        vec![EntrancePhase::Expand, EntrancePhase::LineUp, EntrancePhase::Done]
    );
    assert!(frames > 100, "finished suspiciously fast: {}", frames);
    assert!(entrance.step(&mut poses, &mut camera).is_none());
    assert_eq!(entrance.phase(), EntrancePhase::Done);
}

#[test]
fn slides_end_on_track_at_rest_yaw() {
    let (mut entrance, mut poses, mut camera) = fresh(10);
    run_to_done(&mut entrance, &mut poses, &mut camera);
    for (i, p) in poses.iter().enumerate() {
        assert!(approx_v3(p.position, track_position(i), EPS));
        assert!(approx(p.track_x, i as f32 * 1.5, EPS));
        assert!(approx(p.euler().y, rest_yaw(), EPS));
        assert!(approx(p.euler().x, 0.0, EPS) && approx(p.euler().z, 0.0, EPS));
        assert!(p.rest_rotation.angle_between(p.rotation()) < 1e-4);
    }
}

#[test]
fn last_slide_rises_first() {
    let (mut entrance, mut poses, mut camera) = fresh(5);
    entrance.step(&mut poses, &mut camera);
    assert!(poses[4].position.y > ASSEMBLE_START_Y);
    assert!(approx(poses[0].position.y, ASSEMBLE_START_Y, EPS));
}

#[test]
fn camera_is_sent_between_phases() {
    let (mut entrance, mut poses, mut camera) = fresh(6);
    assert_eq!(camera.position, CAMERA_START);
    let mut saw_expand_goal = false;
    let mut saw_rest_goal = false;
    for _ in 0..MAX_FRAMES {
        match entrance.step(&mut poses, &mut camera) {
            Some(EntrancePhase::Expand) => saw_expand_goal = camera.goal() == Some(CAMERA_EXPAND),
            Some(EntrancePhase::LineUp) => saw_rest_goal = camera.goal() == Some(CAMERA_REST),
            _ => {}
        }
        camera.step();
        if entrance.is_done() {
            break;
        }
    }
    assert!(saw_expand_goal);
    assert!(saw_rest_goal);
}

#[test]
fn ring_spin_waits_for_ring() {
    let (mut entrance, mut poses, mut camera) = fresh(6);
    while entrance.phase() != EntrancePhase::Expand {
        entrance.step(&mut poses, &mut camera);
    }
    assert_eq!(entrance.spin_progress(), 0.0);
    // Hold period plus the staggered ring formation
    for _ in 0..20 {
        entrance.step(&mut poses, &mut camera);
    }
    assert_eq!(entrance.spin_progress(), 0.0);
    while entrance.phase() == EntrancePhase::Expand {
        entrance.step(&mut poses, &mut camera);
    }
    assert!(approx(entrance.spin_progress(), 1.0, EPS));
}

#[test]
fn single_slide_entrance_completes() {
    let (mut entrance, mut poses, mut camera) = fresh(1);
    run_to_done(&mut entrance, &mut poses, &mut camera);
    assert!(approx_v3(poses[0].position, track_position(0), EPS));
}
