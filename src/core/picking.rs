use glam::{Mat4, Quat, Vec2, Vec3};
use smallvec::SmallVec;

/// Oriented rectangle in world space, centred on `position`, spanning
/// `size * scale` in its local XY plane.
#[derive(Clone, Copy, Debug)]
pub struct Quad {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub size: Vec2,
}

impl Quad {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub t: f32,
    /// Local texture coordinate of the hit, (0,0) bottom-left.
    pub uv: Vec2,
}

/// Ray against a double-sided quad. Returns the ray distance and local uv.
pub fn ray_quad(ray_origin: Vec3, ray_dir: Vec3, quad: &Quad) -> Option<(f32, Vec2)> {
    if quad.scale <= 0.0 {
        return None;
    }
    let inv = quad.model_matrix().inverse();
    let o = inv.transform_point3(ray_origin);
    let d = inv.transform_vector3(ray_dir);
    // Rays lying in the quad's plane never hit; f32 rotations leave d.z a few ulps off zero
    if d.z.abs() <= 1e-5 * d.length() {
        return None;
    }
    let s = -o.z / d.z;
    if s < 0.0 {
        return None;
    }
    let p = o + d * s;
    let half = quad.size * 0.5;
    if p.x.abs() > half.x || p.y.abs() > half.y {
        return None;
    }
    // Distance measured in world units so hits on differently scaled quads compare.
    let world_hit = quad.model_matrix().transform_point3(p);
    let t = (world_hit - ray_origin).length();
    let uv = Vec2::new(p.x / quad.size.x + 0.5, p.y / quad.size.y + 0.5);
    Some((t, uv))
}

/// All hits sorted nearest first. `quads` yields `None` for slides that are
/// not pickable this frame (hidden).
pub fn pick_all<'a, I>(ray_origin: Vec3, ray_dir: Vec3, quads: I) -> SmallVec<[Hit; 4]>
where
    I: IntoIterator<Item = Option<&'a Quad>>,
{
    let mut hits: SmallVec<[Hit; 4]> = SmallVec::new();
    for (index, quad) in quads.into_iter().enumerate() {
        let Some(quad) = quad else { continue };
        if let Some((t, uv)) = ray_quad(ray_origin, ray_dir, quad) {
            hits.push(Hit { index, t, uv });
        }
    }
    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
    hits
}

#[inline]
pub fn pick_nearest<'a, I>(ray_origin: Vec3, ray_dir: Vec3, quads: I) -> Option<Hit>
where
    I: IntoIterator<Item = Option<&'a Quad>>,
{
    pick_all(ray_origin, ray_dir, quads).first().copied()
}
