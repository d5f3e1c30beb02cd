// Easing curves and small interpolation helpers used by every animation step.
// Inputs outside [0, 1] are clamped so callers can feed raw progress values.

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

#[inline]
pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    -((std::f32::consts::PI * t).cos() - 1.0) / 2.0
}

/// Progress of one item in a staggered sequence: shifted by `delay`, never negative.
#[inline]
pub fn delayed(progress: f32, delay: f32) -> f32 {
    (progress - delay).max(0.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One step of exponential smoothing: moves `current` a fixed fraction toward `target`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
