use glam::Vec3;

// Shared layout and animation tuning for the slide stage.
// Per-frame increments assume the display's ~60 Hz refresh.

// Track layout
pub const SLIDE_SPACING: f32 = 1.5; // distance between neighbouring slides on the track
pub const SLIDE_TILT: f32 = 0.4; // extra yaw applied on top of the side-on resting angle
pub const SLIDE_HEIGHT: f32 = 1.5; // reference quad height; width = aspect * height
pub const WRAP_LEFT_MARGIN: f32 = 3.0; // slides wrap once they pass -(spacing + margin)

// Steady-state carousel
pub const BASE_SCROLL_PER_FRAME: f32 = 0.01; // auto-advance added to the accumulator every frame
pub const WHEEL_SCROLL_FACTOR: f32 = 0.001; // wheel deltaY -> track units
pub const TOUCH_SCROLL_FACTOR: f32 = 0.005; // horizontal swipe px -> track units
pub const HOVER_LIFT: f32 = 0.3; // raised Y offset of a hovered slide
pub const SMOOTHING: f32 = 0.1; // 10% closure per frame for position/yaw/scale
pub const CLICK_SCALE: f32 = 3.0; // selected slide grows to 3x
pub const CLICK_CAMERA_GAP: f32 = 2.0; // selected slide parks this far in front of the camera
pub const CLICK_SLERP: f32 = 0.5; // orientation closure toward the camera per frame

// Orbit (camera-moved) arrangement
pub const ORBIT_RADIUS: f32 = 2.0;
pub const ORBIT_SPEED: f32 = 0.005; // radians per frame

// Entrance choreography
pub const ENTRANCE_STEP: f32 = 0.019; // progress per frame for every phase
pub const ASSEMBLE_STAGGER: f32 = 0.2; // per-slide delay, reverse display order
pub const ASSEMBLE_START_Y: f32 = -10.0; // slides rise from below the frame
pub const ASSEMBLE_X_STEP: f32 = 0.2; // small fan-out while stacked
pub const ASSEMBLE_TURNS: f32 = 1.0; // full roll turns that decay to rest
pub const EXPAND_HOLD: f32 = 0.3; // pause between assemble and expand (progress units)
pub const EXPAND_STAGGER: f32 = 0.02;
pub const CIRCLE_RADIUS: f32 = 1.5;
pub const CIRCLE_X_STEP: f32 = 0.02; // keeps coplanar slides from z-fighting
pub const SPIN_STEP: f32 = 0.008; // rigid ring spin progress per frame
pub const SPIN_ARC: f32 = std::f32::consts::FRAC_PI_2;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10.0;
pub const CAMERA_APPROACH: f32 = 0.09; // exponential approach factor per frame
pub const CAMERA_ARRIVE_EPS: f32 = 0.01;
pub const CAMERA_START: Vec3 = Vec3::new(-6.0, 2.0, 0.0);
pub const CAMERA_EXPAND: Vec3 = Vec3::new(-6.0, 0.0, 0.0);
pub const CAMERA_REST: Vec3 = Vec3::new(-2.0, 0.8, 3.0);
pub const CAMERA_FRONT: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const CAMERA_FORWARD_TARGET: Vec3 = Vec3::new(0.0, 0.0, -1.0);

// Fog (distance from camera)
pub const FOG_NEAR: f32 = 10.0;
pub const FOG_FAR: f32 = 20.0;

// Full-screen ripple mode
pub const FULLSCREEN_DISTANCE: f32 = 3.0; // camera-to-plane distance used for sizing
pub const FULLSCREEN_FILL: f32 = 0.8; // fraction of the visible frustum the plane fills
pub const RIPPLE_THRESHOLD: f32 = 150.0; // accumulated |delta| px before paging
pub const RIPPLE_STEP: f32 = 0.009; // transition progress per frame
pub const RIPPLE_TIME_STEP: f32 = 0.016; // shader clock per frame
pub const RIPPLE_ENTER_STEP: f32 = 0.025; // opacity ramp progress per frame
pub const CAPTION_STAGGER_FRAMES: u32 = 6; // frames between caption item reveals

// Ripple shader shape
pub const RIPPLE_WIDTH: f32 = 0.82;
pub const RIPPLE_EDGE_SPEED: f32 = 0.75 * 1.8; // leading edge = progress * speed
pub const RIPPLE_WAVE_FREQ_T: f32 = 10.0;
pub const RIPPLE_WAVE_FREQ_D: f32 = 20.0;
pub const RIPPLE_WAVE_AMP: f32 = 2.0;
pub const RIPPLE_DISTORTION: f32 = 0.16;
pub const RIPPLE_BLOOM_SPEED: f32 = 1.2; // mask radius = progress * speed
pub const RIPPLE_BLOOM_SOFTNESS: f32 = 0.3;
pub const GAMMA: f32 = 2.2;

// Media
pub const VIDEO_CROP: f32 = 0.02; // inset trimmed from every edge of video frames
pub const ASSET_LOAD_TIMEOUT_MS: i32 = 8000;

// Texture cursor stalker
pub const STALKER_FOLLOW: f32 = 0.15;
pub const STALKER_DISTORT_DIVISOR: f32 = 300.0;
pub const STALKER_DISTORT_MAX: f32 = 0.4;

// Detail page curl
pub const CURL_RADIUS: f32 = 0.15;
pub const CURL_ANGLE: f32 = -std::f32::consts::FRAC_PI_3;
pub const CURL_CLOSED: f32 = 0.7;
pub const CURL_OPEN: f32 = 0.0;
pub const CURL_FOLLOW: f32 = 0.03;
pub const CURL_OPEN_DELAY_MS: i32 = 500;
pub const CURL_GRID: u32 = 64;

/// Resting yaw of a slide on the track: side-on plus the configured tilt.
#[inline]
pub fn rest_yaw() -> f32 {
    std::f32::consts::FRAC_PI_2 + SLIDE_TILT
}
