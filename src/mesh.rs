//! Procedural geometry for the particle classes.
//!
//! All meshes are flat-shaded triangle soups with baked vertex colors, built
//! once at startup and uploaded as plain vertex buffers. Multi-part shapes
//! (bell + clapper, box + ribbons) are merged into a single mesh so each
//! class stays one instanced draw.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Vertex layout shared by every mesh pipeline draw.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl MeshVertex {
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();
}

/// A non-indexed triangle mesh.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Append one triangle with a flat normal computed from the winding.
    fn push_tri(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 3]) {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        for p in [a, b, c] {
            self.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
    }

    /// Append all triangles of another mesh.
    fn merge(&mut self, other: Mesh) {
        self.vertices.extend(other.vertices);
    }

    fn translate(mut self, offset: Vec3) -> Self {
        for v in &mut self.vertices {
            v.position[0] += offset.x;
            v.position[1] += offset.y;
            v.position[2] += offset.z;
        }
        self
    }
}

/// Regular tetrahedron with unit circumradius; the needle shape.
pub fn tetrahedron(color: [f32; 3]) -> Mesh {
    let s = 1.0 / 3.0_f32.sqrt();
    let v0 = Vec3::new(s, s, s);
    let v1 = Vec3::new(s, -s, -s);
    let v2 = Vec3::new(-s, s, -s);
    let v3 = Vec3::new(-s, -s, s);

    let mut mesh = Mesh::new();
    mesh.push_tri(v0, v2, v1, color);
    mesh.push_tri(v0, v1, v3, color);
    mesh.push_tri(v0, v3, v2, color);
    mesh.push_tri(v1, v2, v3, color);
    mesh
}

/// Revolve a 2D profile (x = radius, y = height) around the Y axis.
///
/// Consecutive profile points become rings of quads; points on the axis
/// (x = 0) produce degenerate triangles that are skipped.
pub fn revolve(profile: &[Vec2], segments: u32, color: [f32; 3]) -> Mesh {
    let mut mesh = Mesh::new();

    let ring = |p: Vec2, angle: f32| Vec3::new(p.x * angle.cos(), p.y, p.x * angle.sin());

    for seg in 0..segments {
        let a0 = seg as f32 / segments as f32 * TAU;
        let a1 = (seg + 1) as f32 / segments as f32 * TAU;

        for pair in profile.windows(2) {
            let (top, bottom) = (pair[0], pair[1]);
            let a = ring(top, a0);
            let b = ring(top, a1);
            let c = ring(bottom, a1);
            let d = ring(bottom, a0);

            if top.x.abs() > 1e-6 {
                mesh.push_tri(a, b, c, color);
            }
            if bottom.x.abs() > 1e-6 {
                mesh.push_tri(a, c, d, color);
            }
        }
    }

    mesh
}

/// Axis-aligned box from center and half extents.
pub fn cuboid(center: Vec3, half: Vec3, color: [f32; 3]) -> Mesh {
    let mut mesh = Mesh::new();
    let c = center;
    let h = half;

    // Eight corners, faces wound outward.
    let p = |x: f32, y: f32, z: f32| c + Vec3::new(x * h.x, y * h.y, z * h.z);
    let faces = [
        // +X
        [p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.), p(1., -1., 1.)],
        // -X
        [p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.), p(-1., -1., -1.)],
        // +Y
        [p(-1., 1., -1.), p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.)],
        // -Y
        [p(-1., -1., 1.), p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.)],
        // +Z
        [p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.)],
        // -Z
        [p(1., -1., -1.), p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.)],
    ];

    for [a, b, cc, d] in faces {
        mesh.push_tri(a, b, cc, color);
        mesh.push_tri(a, cc, d, color);
    }
    mesh
}

const GOLD: [f32; 3] = [1.0, 0.843, 0.0];
const RICH_GOLD: [f32; 3] = [0.992, 0.725, 0.192];
const DARK_GOLD: [f32; 3] = [0.722, 0.525, 0.043];
const RIBBON_RED: [f32; 3] = [0.839, 0.157, 0.157];
const FRAME_WHITE: [f32; 3] = [0.941, 0.941, 0.941];

/// Bell ornament: a lathe-revolved body with a hollow rim, plus a clapper
/// sphere hanging below. One merged mesh.
pub fn bell() -> Mesh {
    // Outer wall top to rim, then back up the inner wall.
    let profile = [
        Vec2::new(0.0, 0.4),
        Vec2::new(0.15, 0.35),
        Vec2::new(0.25, 0.1),
        Vec2::new(0.35, -0.2),
        Vec2::new(0.5, -0.4),
        Vec2::new(0.45, -0.4),
        Vec2::new(0.30, -0.2),
        Vec2::new(0.20, 0.1),
        Vec2::new(0.10, 0.35),
        Vec2::new(0.0, 0.35),
    ];
    let mut mesh = revolve(&profile, 24, RICH_GOLD);

    let clapper = sphere(0.12, 8, DARK_GOLD).translate(Vec3::new(0.0, -0.45, 0.0));
    mesh.merge(clapper);
    mesh
}

/// Sphere as a revolved semicircle.
pub fn sphere(radius: f32, rings: u32, color: [f32; 3]) -> Mesh {
    let profile: Vec<Vec2> = (0..=rings)
        .map(|i| {
            let t = i as f32 / rings as f32 * PI;
            Vec2::new(t.sin() * radius, t.cos() * radius)
        })
        .collect();
    revolve(&profile, rings * 2, color)
}

/// Gift box: red cube wrapped by two gold ribbon bands.
pub fn gift_box() -> Mesh {
    let half = 0.4;
    let ribbon_half = 0.1;
    let wrap = half * 1.05;

    let mut mesh = cuboid(Vec3::ZERO, Vec3::splat(half), RIBBON_RED);
    mesh.merge(cuboid(Vec3::ZERO, Vec3::new(wrap, wrap, ribbon_half), GOLD));
    mesh.merge(cuboid(Vec3::ZERO, Vec3::new(ribbon_half, wrap, wrap), GOLD));
    mesh
}

/// Polaroid frame the photo plane sits on: a thin off-white slab, nudged
/// behind the image surface.
pub fn polaroid_frame() -> Mesh {
    cuboid(
        Vec3::new(0.0, 0.0, -0.01),
        Vec3::new(0.6, 0.75, 0.025),
        FRAME_WHITE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_unit_normals(mesh: &Mesh) {
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4, "non-unit normal {n:?}");
        }
    }

    #[test]
    fn tetrahedron_has_four_faces() {
        let mesh = tetrahedron([1.0; 3]);
        assert_eq!(mesh.vertex_count(), 12);
        assert_unit_normals(&mesh);
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.position).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn cuboid_has_twelve_triangles() {
        let mesh = cuboid(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), [0.5; 3]);
        assert_eq!(mesh.vertex_count(), 36);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn cuboid_normals_point_outward() {
        let mesh = cuboid(Vec3::ZERO, Vec3::ONE, [1.0; 3]);
        for tri in mesh.vertices.chunks(3) {
            let centroid = tri
                .iter()
                .map(|v| Vec3::from_array(v.position))
                .sum::<Vec3>()
                / 3.0;
            let n = Vec3::from_array(tri[0].normal);
            assert!(centroid.dot(n) > 0.0, "inward-facing face at {centroid:?}");
        }
    }

    #[test]
    fn revolve_skips_axis_degenerates() {
        // A cone profile: tip on the axis produces one triangle per segment,
        // not two.
        let profile = [Vec2::new(0.0, 1.0), Vec2::new(1.0, 0.0)];
        let mesh = revolve(&profile, 8, [1.0; 3]);
        assert_eq!(mesh.vertex_count(), 8 * 3);
        assert_unit_normals(&mesh);
    }

    #[test]
    fn sphere_stays_on_radius() {
        let mesh = sphere(0.5, 8, [1.0; 3]);
        assert!(!mesh.vertices.is_empty());
        for v in &mesh.vertices {
            assert!((Vec3::from_array(v.position).length() - 0.5).abs() < 1e-3);
        }
    }

    #[test]
    fn bell_merges_body_and_clapper() {
        let mesh = bell();
        assert_unit_normals(&mesh);
        let has_body = mesh.vertices.iter().any(|v| v.color == RICH_GOLD);
        let has_clapper = mesh.vertices.iter().any(|v| v.color == DARK_GOLD);
        assert!(has_body && has_clapper);
        // Clapper hangs below the rim.
        let lowest = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::INFINITY, f32::min);
        assert!(lowest < -0.5);
    }

    #[test]
    fn gift_box_is_wrapped() {
        let mesh = gift_box();
        assert_eq!(mesh.vertex_count(), 36 * 3);
        let has_red = mesh.vertices.iter().any(|v| v.color == RIBBON_RED);
        let has_gold = mesh.vertices.iter().any(|v| v.color == GOLD);
        assert!(has_red && has_gold);
    }
}
