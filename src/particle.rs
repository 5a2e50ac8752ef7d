//! Immutable per-class particle data.
//!
//! Each class generates its dual positions exactly once at startup; after
//! that the set is read-only and the interpolator blends between the two
//! arrays every frame.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f32::consts::PI;

use crate::config::SceneConfig;
use crate::placement;

/// The particle classes that morph between scattered and formed positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleClass {
    /// Foliage tetrahedra.
    Needle,
    /// Bell ornaments.
    Ornament,
    /// Ribboned gift boxes.
    Gift,
}

impl ParticleClass {
    /// Positional jitter around the exact spiral point. Needles sit tight;
    /// decorations hang looser.
    fn jitter(self) -> f32 {
        match self {
            ParticleClass::Needle => 0.3,
            ParticleClass::Ornament => 0.6,
            ParticleClass::Gift => 0.8,
        }
    }

    /// Base scale; actual per-particle scale is `base + rand * base`.
    fn base_scale(self) -> f32 {
        match self {
            ParticleClass::Needle => 0.2,
            ParticleClass::Ornament => 0.5,
            ParticleClass::Gift => 1.0,
        }
    }
}

/// One class worth of particles: dual positions plus static scale/rotation.
#[derive(Debug)]
pub struct ParticleSet {
    class: ParticleClass,
    scatter: Vec<Vec3>,
    target: Vec<Vec3>,
    scale: Vec<f32>,
    rotation: Vec<Vec3>,
}

impl ParticleSet {
    /// Generate `count` particles for `class`. Runs once at startup.
    pub fn generate(class: ParticleClass, count: u32, config: &SceneConfig, rng: &mut SmallRng) -> Self {
        let mut scatter = Vec::with_capacity(count as usize);
        let mut target = Vec::with_capacity(count as usize);
        let mut scale = Vec::with_capacity(count as usize);
        let mut rotation = Vec::with_capacity(count as usize);

        for i in 0..count {
            scatter.push(placement::scatter_in_sphere(rng, config.scatter_radius));

            let spiral = placement::point_on_cone(i, count, config.tree_height, config.tree_radius);
            target.push(placement::jitter(rng, spiral, class.jitter()));

            let base = class.base_scale();
            scale.push(base + rng.gen::<f32>() * base);

            rotation.push(Vec3::new(
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
                rng.gen::<f32>() * PI,
            ));
        }

        Self {
            class,
            scatter,
            target,
            scale,
            rotation,
        }
    }

    #[inline]
    pub fn class(&self) -> ParticleClass {
        self.class
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }

    #[inline]
    pub fn scatter(&self) -> &[Vec3] {
        &self.scatter
    }

    #[inline]
    pub fn target(&self) -> &[Vec3] {
        &self.target
    }

    #[inline]
    pub fn scale(&self) -> &[f32] {
        &self.scale
    }

    #[inline]
    pub fn rotation(&self) -> &[Vec3] {
        &self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn set(class: ParticleClass, count: u32) -> ParticleSet {
        let config = SceneConfig::new();
        let mut rng = SmallRng::seed_from_u64(config.seed);
        ParticleSet::generate(class, count, &config, &mut rng)
    }

    #[test]
    fn arrays_match_configured_count() {
        let needles = set(ParticleClass::Needle, 256);
        assert_eq!(needles.len(), 256);
        assert_eq!(needles.scatter().len(), 256);
        assert_eq!(needles.target().len(), 256);
        assert_eq!(needles.scale().len(), 256);
        assert_eq!(needles.rotation().len(), 256);
    }

    #[test]
    fn scatter_positions_respect_radius() {
        let config = SceneConfig::new();
        let needles = set(ParticleClass::Needle, 512);
        for p in needles.scatter() {
            assert!(p.length() <= config.scatter_radius + 1e-3);
        }
    }

    #[test]
    fn targets_stay_near_the_cone() {
        let config = SceneConfig::new();
        let ornaments = set(ParticleClass::Ornament, 150);
        let half = config.tree_height / 2.0;
        for (i, p) in ornaments.target().iter().enumerate() {
            let exact =
                placement::point_on_cone(i as u32, 150, config.tree_height, config.tree_radius);
            assert!((*p - exact).length() <= 0.6 * 0.5 * 3f32.sqrt() + 1e-4);
            assert!(p.y.abs() <= half + 0.5);
        }
    }

    #[test]
    fn scale_ranges_per_class() {
        for (class, base) in [
            (ParticleClass::Needle, 0.2),
            (ParticleClass::Ornament, 0.5),
            (ParticleClass::Gift, 1.0),
        ] {
            let particles = set(class, 100);
            for s in particles.scale() {
                assert!(*s >= base && *s <= 2.0 * base, "{class:?} scale {s}");
            }
        }
    }

    #[test]
    fn generation_is_seed_deterministic() {
        let a = set(ParticleClass::Needle, 64);
        let b = set(ParticleClass::Needle, 64);
        assert_eq!(a.scatter(), b.scatter());
        assert_eq!(a.target(), b.target());
        assert_eq!(a.scale(), b.scale());
    }
}
