use glam::{Quat, Vec2, Vec3};
use smallvec::SmallVec;

use super::camera::{pixel_to_ndc, CameraRig, LookMode};
use super::carousel::{CameraMode, CarouselMode, CarouselState};
use super::config::StageConfig;
use super::constants::CAMERA_FRONT;
use super::entrance::{Entrance, EntrancePhase};
use super::layout::fullscreen_plane_size;
use super::picking::{pick_nearest, ray_quad, Hit, Quad};
use super::pose::SlidePose;
use super::ripple::{CaptionEvents, PanelExtent, RippleEngine, RippleFrame};
use super::slides::SlideSet;

/// Button-level requests, applied at the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageCommand {
    EnterFullscreen,
    ExitFullscreen,
    EnterOrbit,
    /// Leave full-screen or orbit, whichever is active.
    Reset,
}

/// Everything input handlers recorded since the last frame. Handlers only
/// write here; the frame step drains it exactly once.
#[derive(Clone, Debug, Default)]
pub struct PendingInput {
    /// Latest pointer position in viewport pixels.
    pub pointer: Option<Vec2>,
    pub clicks: SmallVec<[Vec2; 2]>,
    /// Horizontal track scroll, already in track units.
    pub track_scroll: f32,
    /// Vertical paging deltas in pixels with the caption panel state at the time.
    pub page_scroll: SmallVec<[(f32, PanelExtent); 4]>,
    pub viewport: Option<Vec2>,
    pub commands: SmallVec<[StageCommand; 2]>,
}

impl PendingInput {
    pub fn is_empty(&self) -> bool {
        self.pointer.is_none()
            && self.clicks.is_empty()
            && self.track_scroll == 0.0
            && self.page_scroll.is_empty()
            && self.viewport.is_none()
            && self.commands.is_empty()
    }
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PickTarget {
    Slide(Hit),
    Plane { uv: Vec2 },
}

/// Side effects the web layer carries out after a frame step.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    /// URL of a navigation started this frame.
    pub navigate: Option<String>,
    pub captions: CaptionEvents,
    /// Some(true) when a slide became hovered, Some(false) when hover ended.
    pub hover_changed: Option<bool>,
    /// Some(true) on entering full-screen, Some(false) on leaving it.
    pub fullscreen_changed: Option<bool>,
    pub entered_phase: Option<EntrancePhase>,
}

/// Whole animation state of one page view.
#[derive(Clone, Debug)]
pub struct SceneState {
    slides: SlideSet,
    poses: Vec<SlidePose>,
    camera: CameraRig,
    entrance: Entrance,
    carousel: CarouselState,
    ripple: RippleEngine,
    viewport: Vec2,
    fullscreen_size: Vec2,
    hovered: Option<usize>,
    navigating: bool,
    frame: u64,
}

impl SceneState {
    pub fn new(slides: SlideSet, config: &StageConfig, viewport: Vec2) -> Self {
        let poses: Vec<SlidePose> = slides
            .iter()
            .map(|s| SlidePose::new(s.size(), 0.0))
            .collect();
        let count = poses.len();
        let entrance = Entrance::new(count);
        let mut poses = poses;
        entrance.prepare(&mut poses);
        let camera = CameraRig::new(aspect_of(viewport));
        let fullscreen_size = fullscreen_plane_size(slides.aspect(0), aspect_of(viewport), camera.fovy_radians);
        Self {
            slides,
            poses,
            camera,
            entrance,
            carousel: CarouselState::new(config.base_scroll),
            ripple: RippleEngine::new(count, config.ripple_threshold),
            viewport,
            fullscreen_size,
            hovered: None,
            navigating: false,
            frame: 0,
        }
    }

    pub fn slides(&self) -> &SlideSet {
        &self.slides
    }

    pub fn poses(&self) -> &[SlidePose] {
        &self.poses
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn entrance_phase(&self) -> EntrancePhase {
        self.entrance.phase()
    }

    pub fn carousel_mode(&self) -> CarouselMode {
        self.carousel.mode(&self.poses)
    }

    pub fn ripple(&self) -> &RippleEngine {
        &self.ripple
    }

    pub fn ripple_frame(&self) -> RippleFrame {
        self.ripple.frame()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.ripple.is_active()
    }

    pub fn fullscreen_size(&self) -> Vec2 {
        self.fullscreen_size
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn set_caption_counts(&mut self, counts: Vec<usize>) {
        self.ripple.set_caption_counts(counts);
    }

    fn fullscreen_quad(&self) -> Quad {
        Quad {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            size: self.fullscreen_size,
        }
    }

    /// Nearest visible slide, or the full-screen plane while it is shown.
    pub fn pick(&self, px: Vec2) -> Option<PickTarget> {
        let ndc = pixel_to_ndc(px, self.viewport);
        let (ro, rd) = self.camera.ray_from_ndc(ndc);
        if self.is_fullscreen() {
            return ray_quad(ro, rd, &self.fullscreen_quad()).map(|(_, uv)| PickTarget::Plane { uv });
        }
        let quads: Vec<Option<Quad>> = self
            .poses
            .iter()
            .map(|p| p.visible.then(|| p.quad()))
            .collect();
        pick_nearest(ro, rd, quads.iter().map(Option::as_ref)).map(PickTarget::Slide)
    }

    fn hit_slide(&self, px: Vec2) -> Option<usize> {
        match self.pick(px) {
            Some(PickTarget::Slide(hit)) => Some(hit.index),
            _ => None,
        }
    }

    /// Re-test hover from scratch; at most one slide ends up hovered.
    fn apply_pointer(&mut self, px: Vec2, out: &mut FrameOutput) {
        if self.navigating {
            return;
        }
        let hit = self.hit_slide(px);
        for pose in self.poses.iter_mut() {
            pose.hovered = false;
        }
        if let Some(i) = hit {
            self.poses[i].hovered = true;
        }
        if hit.is_some() != self.hovered.is_some() {
            out.hover_changed = Some(hit.is_some());
        }
        self.hovered = hit;
    }

    fn apply_click(&mut self, px: Vec2, out: &mut FrameOutput) {
        if self.navigating {
            return;
        }
        let hit = self.hit_slide(px);
        for pose in self.poses.iter_mut() {
            pose.hovered = false;
            pose.clicked = false;
        }
        if self.hovered.take().is_some() {
            out.hover_changed = Some(false);
        }
        let Some(index) = hit else { return };
        let Some(href) = self.slides.get(index).and_then(|s| s.href.clone()) else {
            return;
        };
        self.poses[index].clicked = true;
        self.navigating = true;
        log::info!("[nav] slide {} -> {}", index, href);
        out.navigate = Some(href);
    }

    fn apply_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.camera.set_aspect(aspect_of(viewport));
        self.refresh_fullscreen_size();
    }

    fn refresh_fullscreen_size(&mut self) {
        let aspect = self.slides.aspect(self.ripple.current());
        self.fullscreen_size =
            fullscreen_plane_size(aspect, aspect_of(self.viewport), self.camera.fovy_radians);
    }

    fn apply_command(&mut self, cmd: StageCommand, out: &mut FrameOutput) {
        let ready = self.entrance.is_done();
        match cmd {
            StageCommand::EnterFullscreen if ready && !self.ripple.is_active() => {
                out.captions.extend(self.ripple.enter());
                for pose in self.poses.iter_mut() {
                    pose.visible = false;
                    pose.hovered = false;
                }
                if self.hovered.take().is_some() {
                    out.hover_changed = Some(false);
                }
                self.refresh_fullscreen_size();
                self.camera.move_to(CAMERA_FRONT, LookMode::Target(Vec3::ZERO));
                out.fullscreen_changed = Some(true);
                log::info!("[stage] full-screen on");
            }
            StageCommand::ExitFullscreen if self.ripple.is_active() => {
                out.captions.extend(self.ripple.exit());
                for pose in self.poses.iter_mut() {
                    pose.visible = true;
                }
                self.carousel.begin_return(&mut self.camera);
                out.fullscreen_changed = Some(false);
                log::info!("[stage] full-screen off");
            }
            StageCommand::EnterOrbit if ready && !self.ripple.is_active() => {
                self.carousel.enter_orbit(&mut self.camera);
            }
            StageCommand::Reset => {
                if self.ripple.is_active() {
                    self.apply_command(StageCommand::ExitFullscreen, out);
                } else if self.carousel.camera_mode() == CameraMode::CameraMoved {
                    self.carousel.begin_return(&mut self.camera);
                }
            }
            _ => log::debug!("[stage] ignored {:?}", cmd),
        }
    }

    /// The single per-frame update: drain input, then advance whichever
    /// machine owns the slides this frame.
    pub fn step(&mut self, input: PendingInput) -> FrameOutput {
        let mut out = FrameOutput::default();
        self.frame += 1;

        if let Some(vp) = input.viewport {
            self.apply_viewport(vp);
        }
        for cmd in input.commands {
            self.apply_command(cmd, &mut out);
        }
        if let Some(px) = input.pointer {
            self.apply_pointer(px, &mut out);
        }
        for px in input.clicks {
            self.apply_click(px, &mut out);
        }
        if self.ripple.is_active() {
            for (delta, panel) in input.page_scroll {
                self.ripple.push_scroll(delta, panel);
            }
        } else if self.entrance.is_done() {
            self.carousel.add_scroll(input.track_scroll);
        }

        if self.camera.step() {
            self.carousel.camera_arrived(&mut self.camera);
        }

        if !self.entrance.is_done() {
            out.entered_phase = self.entrance.step(&mut self.poses, &mut self.camera);
        } else if self.ripple.is_active() {
            let before = self.ripple.current();
            out.captions.extend(self.ripple.step());
            if self.ripple.current() != before {
                self.refresh_fullscreen_size();
            }
        } else {
            self.carousel.step(&mut self.poses, &self.camera);
        }
        out
    }
}

fn aspect_of(viewport: Vec2) -> f32 {
    if viewport.y > 0.0 {
        viewport.x / viewport.y
    } else {
        1.0
    }
}
