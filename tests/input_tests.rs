// Host-side tests for touch gesture tracking.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::TouchTracker;

#[test]
fn first_move_after_begin_yields_delta() {
    let mut t = TouchTracker::default();
    t.begin(Vec2::new(100.0, 100.0));
    assert_eq!(t.delta(Vec2::new(80.0, 110.0)), Vec2::new(20.0, -10.0));
    assert_eq!(t.delta(Vec2::new(70.0, 110.0)), Vec2::new(10.0, 0.0));
}

#[test]
fn move_without_begin_is_zero() {
    let mut t = TouchTracker::default();
    assert_eq!(t.delta(Vec2::new(5.0, 5.0)), Vec2::ZERO);
    // The sample becomes the new reference
    assert_eq!(t.delta(Vec2::new(3.0, 5.0)), Vec2::new(2.0, 0.0));
}

#[test]
fn end_forgets_last_point() {
    let mut t = TouchTracker::default();
    t.begin(Vec2::ZERO);
    t.end();
    assert_eq!(t.delta(Vec2::new(40.0, 0.0)), Vec2::ZERO);
}
