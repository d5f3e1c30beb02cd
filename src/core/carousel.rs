use glam::{Vec3, Vec3Swizzles};

use super::camera::{CameraRig, LookMode};
use super::constants::{
    rest_yaw, CAMERA_FORWARD_TARGET, CAMERA_FRONT, CAMERA_REST, CLICK_CAMERA_GAP, CLICK_SCALE,
    CLICK_SLERP, HOVER_LIFT, ORBIT_RADIUS, ORBIT_SPEED, SMOOTHING,
};
use super::easing::approach;
use super::layout::{ring_angle, wrap_track_x};
use super::pose::SlidePose;

/// Camera-level arrangement of the steady-state carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Idle,
    /// Slides orbit the origin on a ring, camera in front.
    CameraMoved,
    /// Camera and slides heading back to the track.
    Returning,
}

/// Effective mode reported to callers. A clicked slide takes precedence over
/// the camera-level mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarouselMode {
    Idle,
    CameraMoved,
    Returning,
    Clicked(usize),
}

#[derive(Clone, Debug)]
pub struct CarouselState {
    scroll_offset: f32,
    base_scroll: f32,
    camera_mode: CameraMode,
    orbit_rotation: f32,
}

impl CarouselState {
    pub fn new(base_scroll: f32) -> Self {
        Self {
            scroll_offset: 0.0,
            base_scroll,
            camera_mode: CameraMode::Idle,
            orbit_rotation: 0.0,
        }
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    pub fn mode(&self, poses: &[SlidePose]) -> CarouselMode {
        if let Some(i) = poses.iter().position(|p| p.clicked) {
            return CarouselMode::Clicked(i);
        }
        match self.camera_mode {
            CameraMode::Idle => CarouselMode::Idle,
            CameraMode::CameraMoved => CarouselMode::CameraMoved,
            CameraMode::Returning => CarouselMode::Returning,
        }
    }

    /// Accumulate wheel or drag input, already converted to track units.
    pub fn add_scroll(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_offset += delta;
        }
    }

    pub fn pending_scroll(&self) -> f32 {
        self.scroll_offset
    }

    /// Switch to the orbit ring with the camera in front of it.
    pub fn enter_orbit(&mut self, camera: &mut CameraRig) {
        self.camera_mode = CameraMode::CameraMoved;
        camera.move_to(CAMERA_FRONT, LookMode::Target(CAMERA_FORWARD_TARGET));
    }

    /// Send camera and slides back to the track.
    pub fn begin_return(&mut self, camera: &mut CameraRig) {
        self.camera_mode = CameraMode::Returning;
        camera.move_to(CAMERA_REST, LookMode::Target(Vec3::ZERO));
    }

    /// Called when the camera reached its goal this frame.
    pub fn camera_arrived(&mut self, camera: &mut CameraRig) {
        if self.camera_mode == CameraMode::Returning {
            self.camera_mode = CameraMode::Idle;
            camera.look_at(Vec3::ZERO);
            camera.set_look(LookMode::Hold);
        }
    }

    /// Apply this frame's scroll to every tracked X and wrap it.
    pub fn advance_track(&mut self, poses: &mut [SlidePose]) {
        self.scroll_offset += self.base_scroll;
        let delta = self.scroll_offset;
        let count = poses.len();
        for pose in poses.iter_mut() {
            pose.track_x = wrap_track_x(pose.track_x - delta, count);
        }
        self.scroll_offset = 0.0;
    }

    /// One steady-state frame: scroll, then ease every slide toward the
    /// target its mode dictates.
    pub fn step(&mut self, poses: &mut [SlidePose], camera: &CameraRig) {
        self.advance_track(poses);
        if self.camera_mode == CameraMode::CameraMoved {
            self.orbit_rotation += ORBIT_SPEED;
        }
        let count = poses.len();
        for (i, pose) in poses.iter_mut().enumerate() {
            if pose.clicked {
                let target = Vec3::new(0.0, 0.0, camera.position.z - CLICK_CAMERA_GAP);
                pose.position = pose.position.lerp(target, SMOOTHING);
                pose.slerp_toward(camera.rotation, CLICK_SLERP);
            } else {
                let lift = if pose.hovered { HOVER_LIFT } else { 0.0 };
                match self.camera_mode {
                    CameraMode::CameraMoved => {
                        let angle = ring_angle(i, count) + self.orbit_rotation;
                        let target = Vec3::new(angle.sin() * ORBIT_RADIUS, 0.0, angle.cos() * ORBIT_RADIUS);
                        pose.position = pose.position.lerp(target, SMOOTHING);
                        let to_cam = camera.position.xz() - pose.position.xz();
                        let yaw = to_cam.x.atan2(to_cam.y) + std::f32::consts::PI;
                        pose.approach_yaw(yaw, SMOOTHING);
                    }
                    CameraMode::Returning => {
                        let target = Vec3::new(pose.track_x, 0.0, 0.0);
                        pose.position = pose.position.lerp(target, SMOOTHING);
                        pose.approach_euler(Vec3::new(0.0, rest_yaw(), 0.0), SMOOTHING);
                    }
                    CameraMode::Idle => {
                        pose.position.x = pose.track_x;
                        pose.position.y = approach(pose.position.y, lift, SMOOTHING);
                        pose.position.z = approach(pose.position.z, 0.0, SMOOTHING);
                        pose.approach_euler(Vec3::new(0.0, rest_yaw(), 0.0), SMOOTHING);
                    }
                }
            }
            let target_scale = if pose.clicked { CLICK_SCALE } else { 1.0 };
            pose.scale = approach(pose.scale, target_scale, SMOOTHING);
        }
    }
}
