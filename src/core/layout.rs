use glam::{Vec2, Vec3};

use super::constants::{
    CIRCLE_RADIUS, CIRCLE_X_STEP, FULLSCREEN_DISTANCE, FULLSCREEN_FILL, SLIDE_SPACING,
    WRAP_LEFT_MARGIN,
};

/// Resting position of slide `index` on the horizontal track.
#[inline]
pub fn track_position(index: usize) -> Vec3 {
    Vec3::new(index as f32 * SLIDE_SPACING, 0.0, 0.0)
}

#[inline]
pub fn track_width(count: usize) -> f32 {
    SLIDE_SPACING * count as f32
}

/// Inclusive range a tracked X position is kept inside.
#[inline]
pub fn wrap_bounds(count: usize) -> (f32, f32) {
    (-SLIDE_SPACING - WRAP_LEFT_MARGIN, track_width(count) - SLIDE_SPACING)
}

/// Fold `x` back into the track so scrolling appears endless in both directions.
pub fn wrap_track_x(x: f32, count: usize) -> f32 {
    let total = track_width(count);
    if total <= 0.0 || !x.is_finite() {
        return x;
    }
    let (lo, hi) = wrap_bounds(count);
    // Same result as adding/subtracting whole track widths until inside,
    // without looping on large jumps.
    if x < lo {
        lo + (x - lo).rem_euclid(total)
    } else if x > hi {
        hi - (hi - x).rem_euclid(total)
    } else {
        x
    }
}

/// Angle of slide `index` on the expand ring.
#[inline]
pub fn ring_angle(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    index as f32 / count as f32 * std::f32::consts::TAU
}

/// Point on the ring in the YZ plane (orthogonal to the track axis).
#[inline]
pub fn ring_position(index: usize, angle: f32) -> Vec3 {
    Vec3::new(
        index as f32 * CIRCLE_X_STEP,
        angle.sin() * CIRCLE_RADIUS,
        angle.cos() * CIRCLE_RADIUS,
    )
}

/// Roll that makes a ring slide's bottom edge face the ring's axis.
#[inline]
pub fn ring_roll(position: Vec3) -> f32 {
    position.z.atan2(position.y)
}

/// Size of the single full-screen plane: fills a fixed fraction of the
/// frustum at the viewing distance, fitted by width or height depending on
/// whether the texture is wider than the viewport.
pub fn fullscreen_plane_size(texture_aspect: f32, viewport_aspect: f32, fovy_radians: f32) -> Vec2 {
    let aspect = if texture_aspect > 0.0 { texture_aspect } else { 1.0 };
    let max_h = 2.0 * FULLSCREEN_DISTANCE * (fovy_radians / 2.0).tan();
    let max_w = max_h * viewport_aspect.max(1e-3);
    if aspect > max_w / max_h {
        let w = max_w * FULLSCREEN_FILL;
        Vec2::new(w, w / aspect)
    } else {
        let h = max_h * FULLSCREEN_FILL;
        Vec2::new(h * aspect, h)
    }
}
