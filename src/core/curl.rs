use glam::{Vec2, Vec3};

use super::constants::{CURL_ANGLE, CURL_CLOSED, CURL_FOLLOW, CURL_OPEN, CURL_RADIUS};
use super::easing::approach;

/// Eased curl amount for the detail viewer. 0 is flat, larger values roll
/// more of the sheet up from the bottom-right corner.
#[derive(Clone, Debug)]
pub struct CurlState {
    current: f32,
    target: f32,
}

impl Default for CurlState {
    fn default() -> Self {
        Self {
            current: CURL_CLOSED,
            target: CURL_CLOSED,
        }
    }
}

impl CurlState {
    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn open(&mut self) {
        self.target = CURL_OPEN;
    }

    pub fn close(&mut self) {
        self.target = CURL_CLOSED;
    }

    pub fn step(&mut self) -> f32 {
        self.current = approach(self.current, self.target, CURL_FOLLOW);
        self.current
    }
}

/// Uniform inputs of the curl deformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurlParams {
    pub curl: f32,
    pub radius: f32,
    pub aspect: f32,
    pub angle: f32,
}

impl CurlParams {
    pub fn new(curl: f32, aspect: f32) -> Self {
        Self {
            curl,
            radius: CURL_RADIUS,
            aspect,
            angle: CURL_ANGLE,
        }
    }
}

/// Host copy of the curl vertex stage. `p` is a vertex of the unit plane
/// centred on the origin; the result is in aspect-scaled plane space.
pub fn curl_vertex(p: Vec2, params: &CurlParams) -> Vec3 {
    let mut pos = Vec3::new(p.x * params.aspect, p.y, 0.0);
    let dir = Vec2::new(params.angle.cos(), params.angle.sin());
    let normal = Vec2::new(-params.angle.sin(), params.angle.cos());
    let corner = Vec2::new(0.5 * params.aspect, -0.5);
    let diagonal = Vec2::new(params.aspect, 1.0).length();
    let line = corner - dir * params.curl * diagonal;

    let to_vertex = pos.truncate() - line;
    let dist = to_vertex.dot(dir);
    if dist > 0.0 {
        // Wrap the part past the fold line around a cylinder.
        let theta = dist / params.radius;
        let along = theta.sin() * params.radius;
        let across = to_vertex.dot(normal);
        pos.z = (1.0 - theta.cos()) * params.radius;
        let folded = line + dir * along + normal * across;
        pos.x = folded.x;
        pos.y = folded.y;
    }
    pos
}
