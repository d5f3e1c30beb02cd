use glam::{EulerRot, Quat, Vec2, Vec3};

use super::picking::Quad;

/// Axis order Euler angles are composed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EulerOrder {
    Xyz,
    Zyx,
}

impl EulerOrder {
    fn compose(self, e: Vec3) -> Quat {
        match self {
            EulerOrder::Xyz => Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z),
            EulerOrder::Zyx => Quat::from_euler(EulerRot::ZYX, e.z, e.y, e.x),
        }
    }
}

/// Per-slide transform and animation bookkeeping, indexed by slide index.
///
/// Orientation is kept both as Euler angles (what the choreography animates
/// axis by axis) and as the composed quaternion (what rendering, picking and
/// slerps use). Writing either keeps the other in sync.
#[derive(Clone, Debug)]
pub struct SlidePose {
    pub position: Vec3,
    euler: Vec3,
    order: EulerOrder,
    rotation: Quat,
    pub scale: f32,
    pub size: Vec2,
    pub visible: bool,
    /// Track X the carousel scrolls; position.x follows it in steady state.
    pub track_x: f32,
    /// Orientation recorded when the entrance settles.
    pub rest_rotation: Quat,
    pub hovered: bool,
    pub clicked: bool,
}

impl SlidePose {
    pub fn new(size: Vec2, track_x: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            euler: Vec3::ZERO,
            order: EulerOrder::Xyz,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            size,
            visible: true,
            track_x,
            rest_rotation: Quat::IDENTITY,
            hovered: false,
            clicked: false,
        }
    }

    #[inline]
    pub fn euler(&self) -> Vec3 {
        self.euler
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_euler(&mut self, e: Vec3, order: EulerOrder) {
        self.euler = e;
        self.order = order;
        self.rotation = order.compose(e);
    }

    /// Move yaw a fraction toward `target`; pitch and roll are cleared.
    pub fn approach_yaw(&mut self, target: f32, factor: f32) {
        let y = self.euler.y + (target - self.euler.y) * factor;
        self.set_euler(Vec3::new(0.0, y, 0.0), EulerOrder::Xyz);
    }

    /// Move every Euler component a fraction toward `target` (X-Y-Z order).
    pub fn approach_euler(&mut self, target: Vec3, factor: f32) {
        let e = self.euler + (target - self.euler) * factor;
        self.set_euler(e, EulerOrder::Xyz);
    }

    /// Spherical step toward `target`; Euler angles are re-derived afterwards.
    pub fn slerp_toward(&mut self, target: Quat, factor: f32) {
        self.rotation = self.rotation.slerp(target, factor).normalize();
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        self.euler = Vec3::new(x, y, z);
        self.order = EulerOrder::Xyz;
    }

    pub fn quad(&self) -> Quad {
        Quad {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            size: self.size,
        }
    }
}
