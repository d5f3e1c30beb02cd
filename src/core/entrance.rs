use glam::Vec3;

use super::camera::{CameraRig, LookMode};
use super::constants::{
    rest_yaw, ASSEMBLE_STAGGER, ASSEMBLE_START_Y, ASSEMBLE_TURNS, ASSEMBLE_X_STEP,
    CAMERA_EXPAND, CAMERA_REST, ENTRANCE_STEP, EXPAND_HOLD, EXPAND_STAGGER, SPIN_ARC, SPIN_STEP,
};
use super::easing::{delayed, ease_in_out_sine, ease_out_cubic, ease_out_quart, lerp};
use super::layout::{ring_angle, ring_position, ring_roll, track_position};
use super::pose::{EulerOrder, SlidePose};

/// Entrance phases. Ordered and never re-entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntrancePhase {
    /// Slides rise from below into a stacked fan, spinning down to rest.
    Assemble,
    /// Stack opens into a ring, then the ring spins through a fixed arc.
    Expand,
    /// Ring unrolls onto the horizontal track.
    LineUp,
    Done,
}

/// Where each slide starts an interpolating phase from.
#[derive(Clone, Copy, Debug, Default)]
struct PhaseStart {
    position: Vec3,
    euler: Vec3,
}

/// Multi-phase entrance animation. One [`step`](Self::step) per frame.
#[derive(Clone, Debug)]
pub struct Entrance {
    phase: EntrancePhase,
    progress: f32,
    spin_progress: f32,
    ring_formed: bool,
    starts: Vec<PhaseStart>,
}

impl Entrance {
    pub fn new(count: usize) -> Self {
        Self {
            phase: EntrancePhase::Assemble,
            progress: 0.0,
            spin_progress: 0.0,
            ring_formed: false,
            starts: vec![PhaseStart::default(); count],
        }
    }

    pub fn phase(&self) -> EntrancePhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == EntrancePhase::Done
    }

    /// Progress of the rigid ring spin in [0, 1]; 0 until the ring has formed.
    pub fn spin_progress(&self) -> f32 {
        self.spin_progress
    }

    /// Place slides at their pre-entrance pose: off-screen below, side-on.
    pub fn prepare(&self, poses: &mut [SlidePose]) {
        for (i, pose) in poses.iter_mut().enumerate() {
            pose.position = Vec3::new(i as f32 * ASSEMBLE_X_STEP, ASSEMBLE_START_Y, 0.0);
            pose.set_euler(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0), EulerOrder::Zyx);
            pose.scale = 1.0;
            pose.visible = true;
        }
    }

    /// Advance one frame. Returns the phase that was just entered, if any.
    pub fn step(&mut self, poses: &mut [SlidePose], camera: &mut CameraRig) -> Option<EntrancePhase> {
        if self.phase == EntrancePhase::Done {
            return None;
        }
        self.progress += ENTRANCE_STEP;
        let next = match self.phase {
            EntrancePhase::Assemble => self.step_assemble(poses, camera),
            EntrancePhase::Expand => self.step_expand(poses, camera),
            EntrancePhase::LineUp => self.step_line_up(poses),
            EntrancePhase::Done => None,
        };
        if let Some(phase) = next {
            log::info!("[entrance] -> {:?}", phase);
            self.phase = phase;
        }
        next
    }

    fn step_assemble(
        &mut self,
        poses: &mut [SlidePose],
        camera: &mut CameraRig,
    ) -> Option<EntrancePhase> {
        let count = poses.len();
        let mut all_done = true;
        for (i, pose) in poses.iter_mut().enumerate() {
            // Last-displayed slide moves first.
            let delay = (count - 1 - i) as f32 * ASSEMBLE_STAGGER;
            let p = delayed(self.progress, delay);
            if p <= 0.0 {
                all_done = false;
                continue;
            }
            let e = ease_out_cubic(p);
            pose.position = Vec3::new(
                i as f32 * ASSEMBLE_X_STEP,
                lerp(ASSEMBLE_START_Y, 0.0, e),
                0.0,
            );
            let roll = std::f32::consts::TAU * ASSEMBLE_TURNS * (1.0 - e);
            pose.set_euler(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, roll), EulerOrder::Zyx);
            if e < 1.0 {
                all_done = false;
            }
        }
        if !all_done {
            return None;
        }

        self.progress = -EXPAND_HOLD;
        for (i, pose) in poses.iter_mut().enumerate() {
            pose.set_euler(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0), EulerOrder::Xyz);
            self.starts[i] = PhaseStart {
                position: pose.position,
                euler: pose.euler(),
            };
        }
        camera.move_to(CAMERA_EXPAND, LookMode::Hold);
        Some(EntrancePhase::Expand)
    }

    fn step_expand(
        &mut self,
        poses: &mut [SlidePose],
        camera: &mut CameraRig,
    ) -> Option<EntrancePhase> {
        let count = poses.len();
        if !self.ring_formed {
            let mut all_done = true;
            for (i, pose) in poses.iter_mut().enumerate() {
                let p = delayed(self.progress, i as f32 * EXPAND_STAGGER);
                if p <= 0.0 {
                    all_done = false;
                    continue;
                }
                let e = ease_out_quart(p);
                let target = ring_position(i, ring_angle(i, count));
                pose.position = self.starts[i].position.lerp(target, e);
                let roll = ring_roll(pose.position);
                pose.set_euler(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, roll), EulerOrder::Xyz);
                if e < 1.0 {
                    all_done = false;
                }
            }
            if !all_done {
                return None;
            }
            self.ring_formed = true;
        }

        self.spin_progress = (self.spin_progress + SPIN_STEP).min(1.0);
        let spin = ease_in_out_sine(self.spin_progress) * SPIN_ARC;
        for (i, pose) in poses.iter_mut().enumerate() {
            pose.position = ring_position(i, ring_angle(i, count) + spin);
            let roll = ring_roll(pose.position);
            pose.set_euler(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, roll), EulerOrder::Xyz);
        }
        if self.spin_progress < 1.0 {
            return None;
        }

        self.progress = 0.0;
        for (i, pose) in poses.iter().enumerate() {
            self.starts[i] = PhaseStart {
                position: pose.position,
                euler: pose.euler(),
            };
        }
        camera.move_to(CAMERA_REST, LookMode::Hold);
        Some(EntrancePhase::LineUp)
    }

    fn step_line_up(&mut self, poses: &mut [SlidePose]) -> Option<EntrancePhase> {
        let p = delayed(self.progress, 0.0);
        let e = ease_out_cubic(p);
        for (i, pose) in poses.iter_mut().enumerate() {
            let start = self.starts[i];
            pose.position = start.position.lerp(track_position(i), e);
            let yaw = lerp(start.euler.y, rest_yaw(), e);
            let roll = lerp(start.euler.z, 0.0, e);
            pose.set_euler(Vec3::new(0.0, yaw, roll), EulerOrder::Xyz);
        }
        if e < 1.0 {
            return None;
        }

        // Snap away residual interpolation error and record the rest reference.
        for (i, pose) in poses.iter_mut().enumerate() {
            let target = track_position(i);
            pose.position = target;
            pose.track_x = target.x;
            pose.set_euler(Vec3::new(0.0, rest_yaw(), 0.0), EulerOrder::Xyz);
            pose.rest_rotation = pose.rotation();
        }
        Some(EntrancePhase::Done)
    }
}
