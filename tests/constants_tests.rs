// Host-side tests for tuning constants and the DOM hooks they pair with.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core_constants {
    include!("../src/core/constants.rs");
}

use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // Per-frame factors are fractions
    for f in [SMOOTHING, CAMERA_APPROACH, CLICK_SLERP, STALKER_FOLLOW, CURL_FOLLOW] {
        assert!(f > 0.0 && f <= 1.0);
    }
    // Progress steps finish in a sane number of frames
    for step in [ENTRANCE_STEP, SPIN_STEP, RIPPLE_STEP, RIPPLE_ENTER_STEP] {
        let frames = 1.0 / step;
        assert!(frames > 10.0 && frames < 1000.0);
    }
    assert!(CAMERA_NEAR < CAMERA_FAR);
    assert!(FOG_NEAR < FOG_FAR);
    assert!(VIDEO_CROP > 0.0 && VIDEO_CROP < 0.5);
    assert!(FULLSCREEN_FILL > 0.0 && FULLSCREEN_FILL <= 1.0);
    assert!(STALKER_DISTORT_MAX < 1.0);
    assert!(CURL_OPEN < CURL_CLOSED);
    assert!(CAPTION_STAGGER_FRAMES > 0);
    assert!(ASSET_LOAD_TIMEOUT_MS > 0 && CURL_OPEN_DELAY_MS > 0);
    assert!(RIPPLE_THRESHOLD > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layout_fits_inside_the_frustum() {
    // Every camera waypoint stays within the far plane of the origin
    for p in [CAMERA_START, CAMERA_EXPAND, CAMERA_REST, CAMERA_FRONT] {
        assert!(p.length() < CAMERA_FAR);
    }
    assert!(CIRCLE_X_STEP > 0.0 && CIRCLE_X_STEP < SLIDE_SPACING);
    assert!(ORBIT_RADIUS > CIRCLE_RADIUS);
    assert!(WRAP_LEFT_MARGIN > 0.0);
    assert!(CLICK_CAMERA_GAP > CAMERA_NEAR);
}

#[test]
fn rest_yaw_is_side_on_plus_tilt() {
    let y = rest_yaw();
    assert!((y - (std::f32::consts::FRAC_PI_2 + SLIDE_TILT)).abs() < 1e-6);
    assert!(y > std::f32::consts::FRAC_PI_2 && y < std::f32::consts::PI);
}
