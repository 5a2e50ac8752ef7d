//! Drifting snow motes.
//!
//! Unlike the morphing classes, motes carry a mutable current position:
//! scattered, they wander on slowly breathing spirals with vertical wrap;
//! formed, the current position eases toward a jittered point on the tree.
//! Scale pulses slightly for a twinkle.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::SceneConfig;
use crate::morph::{SceneMode, GROUP_EASE_RATE};
use crate::placement;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const ICE_BLUE: [f32; 3] = [0.647, 0.847, 1.0];
const WARM_GOLD: [f32; 3] = [1.0, 0.843, 0.0];
const EMBER_RED: [f32; 3] = [1.0, 0.271, 0.0];

/// One GPU billboard instance.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MoteInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    _pad: f32,
}

impl MoteInstance {
    pub const STRIDE: usize = std::mem::size_of::<MoteInstance>();
}

struct Mote {
    tree: Vec3,
    current: Vec3,
    angle: f32,
    radius: f32,
    height: f32,
    speed: f32,
    vertical_speed: f32,
    scale: f32,
    color: [f32; 3],
}

pub struct SnowField {
    motes: Vec<Mote>,
    /// Vertical wrap boundary for the scattered drift.
    bound: f32,
}

impl SnowField {
    pub fn generate(config: &SceneConfig, rng: &mut SmallRng) -> Self {
        let count = config.snow_count;
        let mut motes = Vec::with_capacity(count as usize);

        for i in 0..count {
            let spiral = placement::point_on_cone(i, count, config.tree_height, config.tree_radius);
            let tree = placement::jitter(rng, spiral, 1.0);

            let radius = config.scatter_radius * (0.3 + rng.gen::<f32>() * 0.7);
            let angle = rng.gen::<f32>() * TAU;
            let height = (rng.gen::<f32>() - 0.5) * config.scatter_radius * 1.5;
            let speed = 0.2 + rng.gen::<f32>() * 0.5;
            let vertical_speed = (rng.gen::<f32>() - 0.5) * 0.5;

            let current = Vec3::new(angle.cos() * radius, height, angle.sin() * radius);

            // Bokeh mix: a few large faint orbs among small sharp dots.
            let scale = if rng.gen::<f32>() > 0.8 {
                0.03 + rng.gen::<f32>() * 0.03
            } else {
                0.005 + rng.gen::<f32>() * 0.01
            } * 10.0;

            let color = match rng.gen::<f32>() {
                r if r > 0.75 => WHITE,
                r if r > 0.5 => ICE_BLUE,
                r if r > 0.25 => WARM_GOLD,
                _ => EMBER_RED,
            };

            motes.push(Mote {
                tree,
                current,
                angle,
                radius,
                height,
                speed,
                vertical_speed,
                scale,
                color,
            });
        }

        Self {
            motes,
            bound: config.scatter_radius * 0.8,
        }
    }

    pub fn len(&self) -> usize {
        self.motes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motes.is_empty()
    }

    /// Advance every mote by one frame.
    pub fn update(&mut self, mode: SceneMode, dt: f32, time: f32) {
        let k = (GROUP_EASE_RATE * dt).min(1.0);

        for mote in &mut self.motes {
            match mode {
                SceneMode::Formed => {
                    mote.current = mote.current.lerp(mote.tree, k);
                }
                SceneMode::Scattered => {
                    mote.angle += mote.speed * dt * 0.5;
                    mote.height += mote.vertical_speed * dt;

                    // Spiral breathing.
                    let r = mote.radius + (time + mote.angle).sin();
                    mote.current.x = mote.angle.cos() * r;
                    mote.current.z = mote.angle.sin() * r;
                    mote.current.y = mote.height;

                    if mote.height > self.bound {
                        mote.height -= self.bound * 2.0;
                    }
                    if mote.height < -self.bound {
                        mote.height += self.bound * 2.0;
                    }
                }
            }
        }
    }

    /// Write billboard instances under the shared group transform, applying
    /// the twinkle pulse.
    pub fn write_instances(&self, time: f32, group: Mat4, out: &mut Vec<MoteInstance>) {
        out.clear();
        out.reserve(self.motes.len());
        for (i, mote) in self.motes.iter().enumerate() {
            let pulse = 1.0 + (time * 5.0 + i as f32).sin() * 0.2;
            out.push(MoteInstance {
                position: group.transform_point3(mote.current).to_array(),
                scale: mote.scale * pulse,
                color: mote.color,
                _pad: 0.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn field() -> SnowField {
        let config = SceneConfig::new().with_snow_count(64);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        SnowField::generate(&config, &mut rng)
    }

    #[test]
    fn generates_configured_count() {
        assert_eq!(field().len(), 64);
    }

    #[test]
    fn formed_mode_converges_to_tree_points() {
        let mut field = field();
        let targets: Vec<Vec3> = field.motes.iter().map(|m| m.tree).collect();

        let mut t = 0.0;
        for _ in 0..600 {
            field.update(SceneMode::Formed, DT, t);
            t += DT;
        }

        for (mote, target) in field.motes.iter().zip(&targets) {
            assert!(
                (mote.current - *target).length() < 0.01,
                "mote stuck at {:?}, target {:?}",
                mote.current,
                target
            );
        }
    }

    #[test]
    fn scattered_mode_wraps_vertically() {
        let mut field = field();
        let bound = field.bound;

        let mut t = 0.0;
        for _ in 0..20_000 {
            field.update(SceneMode::Scattered, DT, t);
            t += DT;
        }

        for mote in &field.motes {
            assert!(
                mote.height.abs() <= bound + 0.1,
                "mote drifted out: {}",
                mote.height
            );
        }
    }

    #[test]
    fn twinkle_keeps_scale_positive() {
        let field = field();
        let mut out = Vec::new();
        for step in 0..120 {
            field.write_instances(step as f32 * DT, Mat4::IDENTITY, &mut out);
            for inst in &out {
                assert!(inst.scale > 0.0);
            }
        }
    }
}
