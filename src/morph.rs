//! The per-frame interpolator.
//!
//! A [`Progress`] scalar per particle group eases toward 0 (scattered) or 1
//! (formed) with exponential smoothing. Every frame each particle's two
//! precomputed positions are blended by the current progress, a floating
//! oscillation is layered on top (strong while scattered, nearly still once
//! formed), the static rotation keeps spinning slowly, and the result is
//! composed into an instance transform for the renderer.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::particle::ParticleSet;

/// The one toggle the whole scene reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneMode {
    /// Particles drift inside the scatter sphere.
    Scattered,
    /// Particles form the tree.
    Formed,
}

impl SceneMode {
    /// Blend target this mode eases progress toward.
    #[inline]
    pub fn blend_target(self) -> f32 {
        match self {
            SceneMode::Scattered => 0.0,
            SceneMode::Formed => 1.0,
        }
    }
}

/// Easing rate for the particle groups.
pub const GROUP_EASE_RATE: f32 = 2.5;
/// Easing rate for the photo gallery (cards are heavier, so slower).
pub const GALLERY_EASE_RATE: f32 = 2.0;

/// Floating amplitude at progress 0 and 1; the drift all but dies down once
/// the tree has formed.
const FLOAT_SCATTERED: f32 = 1.5;
const FLOAT_FORMED: f32 = 0.2;

/// Self-rotation speed in radians per second, per Euler axis.
const SPIN_RATE: Vec3 = Vec3::new(0.1, 0.15, 0.0);

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A blend factor eased toward the current mode's endpoint.
///
/// The smoothing factor `rate * dt` is clamped to 1 so a hitch frame can
/// overshoot neither endpoint; the value stays in [0, 1] for its lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    value: f32,
    rate: f32,
}

impl Progress {
    pub fn new(rate: f32, initial_mode: SceneMode) -> Self {
        Self {
            value: initial_mode.blend_target(),
            rate,
        }
    }

    /// Ease toward the mode's endpoint by one frame. Returns the new value.
    pub fn advance(&mut self, mode: SceneMode, dt: f32) -> f32 {
        let k = (self.rate * dt).min(1.0).max(0.0);
        self.value += (mode.blend_target() - self.value) * k;
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }
}

/// One GPU instance: transform plus material tint.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub emissive: f32,
}

impl Instance {
    pub const STRIDE: usize = std::mem::size_of::<Instance>();
}

/// Blended position for particle `index`: scatter→target by `progress`, plus
/// the floating oscillation.
#[inline]
pub fn blend_position(scatter: Vec3, target: Vec3, progress: f32, time: f32, index: usize) -> Vec3 {
    let base = scatter.lerp(target, progress);
    let amplitude = lerp(FLOAT_SCATTERED, FLOAT_FORMED, progress) * 0.1;
    let i = index as f32;
    let float_x = (time * 0.5 + i).sin() * amplitude;
    let float_y = (time * 0.3 + i * 0.5).cos() * amplitude;
    base + Vec3::new(float_x, float_y, 0.0)
}

/// Static rotation advanced by the continuous self-spin.
#[inline]
pub fn spun_rotation(rotation: Vec3, time: f32) -> Vec3 {
    rotation + SPIN_RATE * time
}

/// Compose instance transforms for a whole particle set into `out`.
///
/// `group` is the shared tree-group transform (its slow yaw once formed);
/// `color`/`emissive` tint the class's mesh.
pub fn write_instances(
    set: &ParticleSet,
    progress: f32,
    time: f32,
    group: Mat4,
    color: [f32; 3],
    emissive: f32,
    out: &mut Vec<Instance>,
) {
    out.clear();
    out.reserve(set.len());

    let scatter = set.scatter();
    let target = set.target();
    let scale = set.scale();
    let rotation = set.rotation();

    for i in 0..set.len() {
        let position = blend_position(scatter[i], target[i], progress, time, i);
        let euler = spun_rotation(rotation[i], time);
        let rot = Quat::from_euler(glam::EulerRot::XYZ, euler.x, euler.y, euler.z);
        let model = group * Mat4::from_scale_rotation_translation(Vec3::splat(scale[i]), rot, position);

        out.push(Instance {
            model: model.to_cols_array_2d(),
            color,
            emissive,
        });
    }
}
