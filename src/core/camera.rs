use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use super::constants::{
    CAMERA_APPROACH, CAMERA_ARRIVE_EPS, CAMERA_FAR, CAMERA_FOVY_DEG, CAMERA_NEAR, CAMERA_START,
};

/// Where the camera points while it moves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookMode {
    /// Keep the orientation it already has.
    Hold,
    /// Re-aim at a world point every frame.
    Target(Vec3),
}

/// Perspective camera with a scripted exponential approach toward a goal.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub rotation: Quat,
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
    goal: Option<Vec3>,
    look: LookMode,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        let mut rig = Self {
            position: CAMERA_START,
            rotation: Quat::IDENTITY,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            aspect: aspect.max(1e-3),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            goal: None,
            look: LookMode::Hold,
        };
        rig.look_at(Vec3::ZERO);
        rig
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect.max(1e-3);
    }

    /// Orient toward a world point, keeping +Y up.
    pub fn look_at(&mut self, target: Vec3) {
        if (target - self.position).length_squared() < 1e-12 {
            return;
        }
        let world = Mat4::look_at_rh(self.position, target, Vec3::Y).inverse();
        let (_, rot, _) = world.to_scale_rotation_translation();
        self.rotation = rot;
    }

    /// Start moving toward `goal`; `look` decides orientation along the way.
    pub fn move_to(&mut self, goal: Vec3, look: LookMode) {
        self.goal = Some(goal);
        self.look = look;
    }

    pub fn set_look(&mut self, look: LookMode) {
        self.look = look;
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.goal
    }

    pub fn is_moving(&self) -> bool {
        self.goal.is_some()
    }

    /// One frame of approach. Returns true on the frame the camera arrives.
    pub fn step(&mut self) -> bool {
        let arrived = match self.goal {
            Some(goal) => {
                self.position = self.position.lerp(goal, CAMERA_APPROACH);
                if self.position.distance(goal) < CAMERA_ARRIVE_EPS {
                    self.goal = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        };
        if let LookMode::Target(t) = self.look {
            self.look_at(t);
        }
        arrived
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.position;
        let rd = (p1 - ro).normalize_or_zero();
        (ro, rd)
    }
}

/// Viewport pixels to NDC: [-1, 1] on both axes with Y pointing up.
#[inline]
pub fn pixel_to_ndc(px: Vec2, viewport: Vec2) -> Vec2 {
    let w = viewport.x.max(1.0);
    let h = viewport.y.max(1.0);
    Vec2::new(px.x / w * 2.0 - 1.0, -(px.y / h * 2.0 - 1.0))
}
