// Host-side tests for the detail page curl and the cursor stalker.
#![allow(dead_code)]

mod common;

use common::core::constants::{CURL_CLOSED, CURL_OPEN, CURL_RADIUS};
use common::core::curl::{curl_vertex, CurlParams, CurlState};
use common::core::stalker::Stalker;
use common::{approx, EPS};
use glam::Vec2;

fn grid(n: usize) -> impl Iterator<Item = Vec2> {
    (0..=n).flat_map(move |i| {
        (0..=n).map(move |j| Vec2::new(i as f32 / n as f32 - 0.5, j as f32 / n as f32 - 0.5))
    })
}

#[test]
fn curl_eases_toward_target() {
    let mut curl = CurlState::default();
    assert_eq!(curl.current(), CURL_CLOSED);
    curl.open();
    assert_eq!(curl.target(), CURL_OPEN);
    let first = curl.step();
    assert!(approx(first, CURL_CLOSED * 0.97, EPS));
    for _ in 0..500 {
        curl.step();
    }
    assert!(curl.current() < 1e-3);
    curl.close();
    curl.step();
    assert!(curl.current() > 0.0);
}

#[test]
fn flat_sheet_at_zero_curl() {
    let params = CurlParams::new(0.0, 1.6);
    for p in grid(8) {
        let v = curl_vertex(p, &params);
        assert_eq!(v.z, 0.0);
        assert!(approx(v.x, p.x * 1.6, EPS));
        assert!(approx(v.y, p.y, EPS));
    }
}

#[test]
fn closed_curl_lifts_the_bottom_right_corner() {
    let params = CurlParams::new(CURL_CLOSED, 1.0);
    let corner = curl_vertex(Vec2::new(0.5, -0.5), &params);
    assert!(corner.z > 0.0);
    let far = curl_vertex(Vec2::new(-0.5, 0.5), &params);
    assert_eq!(far.z, 0.0);
    for p in grid(16) {
        let v = curl_vertex(p, &params);
        assert!(v.z >= 0.0 && v.z <= 2.0 * CURL_RADIUS + EPS);
    }
}

#[test]
fn stalker_show_and_hide_report_transitions() {
    let mut s = Stalker::default();
    assert!(!s.is_active());
    assert!(s.show(Vec2::new(10.0, 10.0)));
    assert!(!s.show(Vec2::new(50.0, 50.0)));
    assert!(s.hide());
    assert!(!s.hide());
}

#[test]
fn stalker_follows_and_stretches_along_motion() {
    let mut s = Stalker::default();
    s.show(Vec2::ZERO);
    s.set_target(Vec2::new(100.0, 0.0));
    let shape = s.step();
    assert!(approx(shape.center.x, 15.0, EPS));
    assert!(approx(shape.scale.x, 1.0 + 100.0 / 300.0, EPS));
    assert!(approx(shape.scale.y, 1.0 - 100.0 / 300.0, EPS));
    assert!(approx(shape.rotation_deg, 0.0, EPS));

    s.set_target(Vec2::new(15.0, 1000.0));
    let shape = s.step();
    assert!(approx(shape.scale.x, 1.4, EPS));
    assert!(approx(shape.rotation_deg, 90.0, EPS));

    let mut rest = Stalker::default();
    rest.show(Vec2::new(5.0, 5.0));
    assert_eq!(rest.step().scale, Vec2::ONE);
}
