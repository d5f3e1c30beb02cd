use smallvec::SmallVec;

use super::constants::{
    CAPTION_STAGGER_FRAMES, RIPPLE_BLOOM_SOFTNESS, RIPPLE_BLOOM_SPEED, RIPPLE_DISTORTION,
    RIPPLE_EDGE_SPEED, RIPPLE_ENTER_STEP, RIPPLE_STEP, RIPPLE_TIME_STEP, RIPPLE_WAVE_AMP,
    RIPPLE_WAVE_FREQ_D, RIPPLE_WAVE_FREQ_T, RIPPLE_WIDTH,
};
use super::easing::{ease_out_cubic, ease_out_quad, lerp, smoothstep};
use super::slides::{display_channel, MediaKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RipplePhase {
    Inactive,
    /// Plane fading in, first caption revealing.
    Entering,
    Steady,
    Transitioning,
}

/// Scroll position of the caption panel when a paging gesture arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelExtent {
    pub at_top: bool,
    pub at_bottom: bool,
}

impl PanelExtent {
    /// Panel that cannot scroll at all (absent or fully visible).
    pub const PINNED: Self = Self {
        at_top: true,
        at_bottom: true,
    };

    /// True when the panel still has room to scroll in the direction of `delta`.
    pub fn absorbs(&self, delta: f32) -> bool {
        (delta > 0.0 && !self.at_bottom) || (delta < 0.0 && !self.at_top)
    }
}

/// Instructions for the caption renderer produced by a frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptionEvent {
    /// Make the caption block of `slide` current and reset its items.
    Show { slide: usize },
    Reveal { slide: usize, item: usize },
    Hide { slide: usize },
}

pub type CaptionEvents = SmallVec<[CaptionEvent; 2]>;

/// Staggered reveal of one slide's caption items. While items remain the
/// reveal counts as animating and paging is held back.
#[derive(Clone, Copy, Debug, Default)]
struct CaptionReveal {
    slide: usize,
    total: usize,
    shown: usize,
    frames: u32,
}

impl CaptionReveal {
    fn start(slide: usize, total: usize) -> Self {
        Self {
            slide,
            total,
            shown: 0,
            frames: 0,
        }
    }

    fn is_animating(&self) -> bool {
        self.shown < self.total
    }

    fn tick(&mut self, events: &mut CaptionEvents) {
        if !self.is_animating() {
            return;
        }
        if self.frames % CAPTION_STAGGER_FRAMES == 0 {
            events.push(CaptionEvent::Reveal {
                slide: self.slide,
                item: self.shown,
            });
            self.shown += 1;
        }
        self.frames += 1;
    }
}

/// Values the ripple pass needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleFrame {
    pub from: usize,
    pub to: usize,
    /// Eased transition progress, 0 outside a transition.
    pub progress: f32,
    pub time: f32,
    pub opacity: f32,
}

/// Full-screen paging state machine.
#[derive(Clone, Debug)]
pub struct RippleEngine {
    phase: RipplePhase,
    count: usize,
    current: usize,
    next: usize,
    progress: f32,
    eased: f32,
    time: f32,
    accumulated: f32,
    threshold: f32,
    enter_progress: f32,
    caption_counts: Vec<usize>,
    captions: CaptionReveal,
}

impl RippleEngine {
    pub fn new(count: usize, threshold: f32) -> Self {
        Self {
            phase: RipplePhase::Inactive,
            count,
            current: 0,
            next: 0,
            progress: 0.0,
            eased: 0.0,
            time: 0.0,
            accumulated: 0.0,
            threshold,
            enter_progress: 0.0,
            caption_counts: vec![0; count],
            captions: CaptionReveal::default(),
        }
    }

    pub fn phase(&self) -> RipplePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != RipplePhase::Inactive
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == RipplePhase::Transitioning
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Target slide; equals `current` outside a transition.
    pub fn next(&self) -> usize {
        self.next
    }

    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn captions_animating(&self) -> bool {
        self.captions.is_animating()
    }

    /// Number of caption items per slide; missing entries count as none.
    pub fn set_caption_counts(&mut self, counts: Vec<usize>) {
        self.caption_counts = counts;
    }

    fn caption_count(&self, slide: usize) -> usize {
        self.caption_counts.get(slide).copied().unwrap_or(0)
    }

    /// Enter full-screen mode on the first slide.
    pub fn enter(&mut self) -> CaptionEvents {
        let mut events = CaptionEvents::new();
        if self.is_active() || self.count == 0 {
            return events;
        }
        self.phase = RipplePhase::Entering;
        self.current = 0;
        self.next = 0;
        self.progress = 0.0;
        self.eased = 0.0;
        self.accumulated = 0.0;
        self.enter_progress = 0.0;
        self.captions = CaptionReveal::start(0, self.caption_count(0));
        events.push(CaptionEvent::Show { slide: 0 });
        events
    }

    pub fn exit(&mut self) -> CaptionEvents {
        let mut events = CaptionEvents::new();
        if !self.is_active() {
            return events;
        }
        events.push(CaptionEvent::Hide {
            slide: self.current,
        });
        if self.phase == RipplePhase::Transitioning && self.next != self.current {
            events.push(CaptionEvent::Hide { slide: self.next });
        }
        self.phase = RipplePhase::Inactive;
        self.next = self.current;
        self.progress = 0.0;
        self.eased = 0.0;
        self.accumulated = 0.0;
        self.captions = CaptionReveal::default();
        events
    }

    /// Whether a paging gesture may start a transition right now.
    pub fn accepts_trigger(&self) -> bool {
        self.phase == RipplePhase::Steady && !self.captions.is_animating()
    }

    /// Feed one vertical gesture delta (pixels). Deltas the caption panel can
    /// still scroll are left to the panel. Returns the started direction.
    pub fn push_scroll(&mut self, delta: f32, panel: PanelExtent) -> Option<i32> {
        if !self.accepts_trigger() || delta == 0.0 || !delta.is_finite() {
            return None;
        }
        if panel.absorbs(delta) {
            self.accumulated = 0.0;
            return None;
        }
        self.accumulated += delta.abs();
        if self.accumulated < self.threshold {
            return None;
        }
        self.accumulated = 0.0;
        let direction = if delta > 0.0 { 1 } else { -1 };
        self.start(direction).then_some(direction)
    }

    /// Begin a transition toward the neighbouring slide. No-op unless steady.
    pub fn start(&mut self, direction: i32) -> bool {
        if self.phase != RipplePhase::Steady || self.count == 0 || direction == 0 {
            return false;
        }
        let count = self.count as i64;
        self.next = (self.current as i64 + direction.signum() as i64).rem_euclid(count) as usize;
        self.progress = 0.0;
        self.eased = 0.0;
        self.phase = RipplePhase::Transitioning;
        log::info!("[ripple] {} -> {}", self.current, self.next);
        true
    }

    /// Advance one frame. A completed transition is committed here, before
    /// the frame's uniforms are read.
    pub fn step(&mut self) -> CaptionEvents {
        let mut events = CaptionEvents::new();
        if !self.is_active() {
            return events;
        }
        self.time += RIPPLE_TIME_STEP;
        match self.phase {
            RipplePhase::Entering => {
                self.enter_progress = (self.enter_progress + RIPPLE_ENTER_STEP).min(1.0);
                self.captions.tick(&mut events);
                if self.enter_progress >= 1.0 && !self.captions.is_animating() {
                    self.phase = RipplePhase::Steady;
                }
            }
            RipplePhase::Steady => self.captions.tick(&mut events),
            RipplePhase::Transitioning => {
                self.progress += RIPPLE_STEP;
                self.eased = ease_out_quad(self.progress.min(1.0));
                if self.progress >= 1.0 {
                    events.push(CaptionEvent::Hide {
                        slide: self.current,
                    });
                    self.current = self.next;
                    self.progress = 0.0;
                    self.eased = 0.0;
                    self.accumulated = 0.0;
                    self.phase = RipplePhase::Steady;
                    log::info!("[ripple] committed {}", self.current);
                    events.push(CaptionEvent::Show {
                        slide: self.current,
                    });
                    self.captions = CaptionReveal::start(self.current, self.caption_count(self.current));
                    self.captions.tick(&mut events);
                }
            }
            RipplePhase::Inactive => {}
        }
        events
    }

    pub fn frame(&self) -> RippleFrame {
        RippleFrame {
            from: self.current,
            to: if self.is_transitioning() {
                self.next
            } else {
                self.current
            },
            progress: self.eased,
            time: self.time,
            opacity: ease_out_cubic(self.enter_progress),
        }
    }
}

// Host-side reference of the ripple fragment math. `dist` is the distance of
// the fragment's uv from the plane centre.

/// Ring-shaped mask around the expanding wipe edge.
pub fn ripple_mask(progress: f32, dist: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    let edge = progress * RIPPLE_EDGE_SPEED;
    smoothstep(edge - RIPPLE_WIDTH, edge, dist)
        * (1.0 - smoothstep(edge, edge + RIPPLE_WIDTH * 0.3, dist))
}

/// Radial uv displacement magnitude near the edge; fades out late in the wipe.
pub fn ripple_distortion(progress: f32, time: f32, dist: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    let wave = (time * RIPPLE_WAVE_FREQ_T + dist * RIPPLE_WAVE_FREQ_D).sin() * RIPPLE_WAVE_AMP;
    let fade = 1.0 - smoothstep(0.6, 1.0, progress);
    ripple_mask(progress, dist) * RIPPLE_DISTORTION * wave * fade
}

/// Weight of the incoming texture: 1 at the centre, 0 beyond the bloom radius.
pub fn bloom_mix(progress: f32, dist: f32) -> f32 {
    let radius = progress * RIPPLE_BLOOM_SPEED;
    1.0 - smoothstep(radius - RIPPLE_BLOOM_SOFTNESS, radius, dist)
}

/// Output channel of the plane for one stored texel of each texture,
/// before opacity.
pub fn ripple_channel(
    from: (f32, MediaKind),
    to: (f32, MediaKind),
    progress: f32,
    dist: f32,
) -> f32 {
    let m = bloom_mix(progress, dist);
    lerp(display_channel(from.0, from.1), display_channel(to.0, to.1), m)
}
