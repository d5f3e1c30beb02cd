// Pure core modules pulled in for host-side tests. The main crate is
// wasm-only, so the module tree is rebuilt here with the same names.
#![allow(dead_code)]

pub mod core {
    pub mod camera {
        include!("../../src/core/camera.rs");
    }
    pub mod carousel {
        include!("../../src/core/carousel.rs");
    }
    pub mod config {
        include!("../../src/core/config.rs");
    }
    pub mod constants {
        include!("../../src/core/constants.rs");
    }
    pub mod curl {
        include!("../../src/core/curl.rs");
    }
    pub mod easing {
        include!("../../src/core/easing.rs");
    }
    pub mod entrance {
        include!("../../src/core/entrance.rs");
    }
    pub mod error {
        include!("../../src/core/error.rs");
    }
    pub mod layout {
        include!("../../src/core/layout.rs");
    }
    pub mod mount {
        include!("../../src/core/mount.rs");
    }
    pub mod picking {
        include!("../../src/core/picking.rs");
    }
    pub mod pose {
        include!("../../src/core/pose.rs");
    }
    pub mod ripple {
        include!("../../src/core/ripple.rs");
    }
    pub mod scene {
        include!("../../src/core/scene.rs");
    }
    pub mod slides {
        include!("../../src/core/slides.rs");
    }
    pub mod stalker {
        include!("../../src/core/stalker.rs");
    }
}

use glam::{Vec2, Vec3};

pub const EPS: f32 = 1e-4;

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

pub fn approx_v3(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).length() <= eps
}

/// Slides already standing on the track at their resting yaw, as the
/// entrance leaves them.
pub fn settled_poses(count: usize) -> Vec<core::pose::SlidePose> {
    use core::constants::rest_yaw;
    use core::layout::track_position;
    use core::pose::{EulerOrder, SlidePose};
    (0..count)
        .map(|i| {
            let mut p = SlidePose::new(Vec2::new(1.5, 1.5), track_position(i).x);
            p.position = track_position(i);
            p.set_euler(Vec3::new(0.0, rest_yaw(), 0.0), EulerOrder::Xyz);
            p.rest_rotation = p.rotation();
            p
        })
        .collect()
}
