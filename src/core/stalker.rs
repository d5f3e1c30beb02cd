use glam::Vec2;

use super::constants::{STALKER_DISTORT_DIVISOR, STALKER_DISTORT_MAX, STALKER_FOLLOW};

/// Squash-and-stretch transform for the follower ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StalkerShape {
    pub center: Vec2,
    pub scale: Vec2,
    pub rotation_deg: f32,
}

/// Cursor follower shown while a slide is hovered.
#[derive(Clone, Debug, Default)]
pub struct Stalker {
    current: Vec2,
    target: Vec2,
    active: bool,
}

impl Stalker {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_target(&mut self, p: Vec2) {
        self.target = p;
    }

    /// Show at `p`. Returns true if it was hidden before.
    pub fn show(&mut self, p: Vec2) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.current = p;
        self.target = p;
        true
    }

    /// Hide. Returns true if it was visible before.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn step(&mut self) -> StalkerShape {
        let delta = self.target - self.current;
        self.current += delta * STALKER_FOLLOW;
        let distort = (delta.length() / STALKER_DISTORT_DIVISOR).min(STALKER_DISTORT_MAX);
        StalkerShape {
            center: self.current,
            scale: Vec2::new(1.0 + distort, 1.0 - distort),
            rotation_deg: delta.y.atan2(delta.x).to_degrees(),
        }
    }
}
