//! Scene assembly: every particle group, the snow field and the photo
//! gallery, advanced together by one frame step and flattened into the
//! per-class instance vectors the renderer uploads.

use glam::Mat4;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::SceneConfig;
use crate::gallery::Gallery;
use crate::morph::{self, Instance, Progress, SceneMode, GROUP_EASE_RATE};
use crate::particle::{ParticleClass, ParticleSet};
use crate::snow::{MoteInstance, SnowField};

/// Emerald tint for the needle tetrahedra.
const NEEDLE_COLOR: [f32; 3] = [0.094, 0.659, 0.290];
/// Bells and gifts carry their colors in the mesh; the instance tint is
/// neutral.
const MESH_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const ORNAMENT_EMISSIVE: f32 = 0.35;

/// Yaw rate of the whole tree group once it has mostly formed, rad/s.
const GROUP_SPIN_RATE: f32 = 0.1;
/// Formation progress past which the group starts turning.
const GROUP_SPIN_THRESHOLD: f32 = 0.8;

pub struct Scene {
    mode: SceneMode,
    progress: Progress,
    group_yaw: f32,

    needles: ParticleSet,
    ornaments: ParticleSet,
    gifts: ParticleSet,
    snow: SnowField,
    gallery: Gallery,

    needle_instances: Vec<Instance>,
    ornament_instances: Vec<Instance>,
    gift_instances: Vec<Instance>,
    mote_instances: Vec<MoteInstance>,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);

        let needles = ParticleSet::generate(ParticleClass::Needle, config.needle_count, config, &mut rng);
        let ornaments =
            ParticleSet::generate(ParticleClass::Ornament, config.ornament_count, config, &mut rng);
        let gifts = ParticleSet::generate(ParticleClass::Gift, config.gift_count, config, &mut rng);
        let snow = SnowField::generate(config, &mut rng);
        let gallery = Gallery::new(config);

        Self {
            mode: config.initial_mode,
            progress: Progress::new(GROUP_EASE_RATE, config.initial_mode),
            group_yaw: 0.0,
            needles,
            ornaments,
            gifts,
            snow,
            gallery,
            needle_instances: Vec::new(),
            ornament_instances: Vec::new(),
            gift_instances: Vec::new(),
            mote_instances: Vec::new(),
        }
    }

    #[inline]
    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SceneMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            SceneMode::Scattered => SceneMode::Formed,
            SceneMode::Formed => SceneMode::Scattered,
        };
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Advance the whole scene by one frame.
    pub fn update(&mut self, dt: f32, time: f32) {
        let p = self.progress.advance(self.mode, dt);

        if p > GROUP_SPIN_THRESHOLD {
            self.group_yaw += dt * GROUP_SPIN_RATE * p;
        }
        let group = Mat4::from_rotation_y(self.group_yaw);

        morph::write_instances(
            &self.needles,
            p,
            time,
            group,
            NEEDLE_COLOR,
            0.0,
            &mut self.needle_instances,
        );
        morph::write_instances(
            &self.ornaments,
            p,
            time,
            group,
            MESH_COLOR,
            ORNAMENT_EMISSIVE,
            &mut self.ornament_instances,
        );
        morph::write_instances(
            &self.gifts,
            p,
            time,
            group,
            MESH_COLOR,
            0.0,
            &mut self.gift_instances,
        );

        self.snow.update(self.mode, dt, time);
        self.snow.write_instances(time, group, &mut self.mote_instances);

        self.gallery.update(self.mode, dt, time, group);
    }

    #[inline]
    pub fn needle_instances(&self) -> &[Instance] {
        &self.needle_instances
    }

    #[inline]
    pub fn ornament_instances(&self) -> &[Instance] {
        &self.ornament_instances
    }

    #[inline]
    pub fn gift_instances(&self) -> &[Instance] {
        &self.gift_instances
    }

    #[inline]
    pub fn card_instances(&self) -> &[Instance] {
        self.gallery.instances()
    }

    #[inline]
    pub fn mote_instances(&self) -> &[MoteInstance] {
        &self.mote_instances
    }

    #[inline]
    pub fn photo_count(&self) -> usize {
        self.gallery.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn small_config() -> SceneConfig {
        SceneConfig::new()
            .with_needle_count(50)
            .with_ornament_count(10)
            .with_gift_count(3)
            .with_snow_count(20)
    }

    #[test]
    fn instance_counts_match_config() {
        let mut scene = Scene::new(&small_config());
        scene.update(DT, 0.0);
        assert_eq!(scene.needle_instances().len(), 50);
        assert_eq!(scene.ornament_instances().len(), 10);
        assert_eq!(scene.gift_instances().len(), 3);
        assert_eq!(scene.mote_instances().len(), 20);
    }

    #[test]
    fn group_stays_still_until_mostly_formed() {
        let mut scene = Scene::new(&small_config());
        scene.update(DT, 0.0);
        assert_eq!(scene.group_yaw, 0.0);

        scene.set_mode(SceneMode::Formed);
        let mut t = 0.0;
        for _ in 0..600 {
            scene.update(DT, t);
            t += DT;
        }
        assert!(scene.group_yaw > 0.0);
    }

    #[test]
    fn toggle_flips_the_mode() {
        let mut scene = Scene::new(&small_config());
        assert_eq!(scene.mode(), SceneMode::Scattered);
        scene.toggle_mode();
        assert_eq!(scene.mode(), SceneMode::Formed);
        scene.toggle_mode();
        assert_eq!(scene.mode(), SceneMode::Scattered);
    }

    #[test]
    fn progress_settles_at_both_ends() {
        let mut scene = Scene::new(&small_config());
        scene.set_mode(SceneMode::Formed);
        let mut t = 0.0;
        for _ in 0..600 {
            scene.update(DT, t);
            t += DT;
        }
        assert!(scene.progress() > 0.99);

        scene.set_mode(SceneMode::Scattered);
        for _ in 0..600 {
            scene.update(DT, t);
            t += DT;
        }
        assert!(scene.progress() < 0.01);
    }

    #[test]
    fn source_positions_never_mutate() {
        let mut scene = Scene::new(&small_config());
        let scatter: Vec<Vec3> = scene.needles.scatter().to_vec();
        let target: Vec<Vec3> = scene.needles.target().to_vec();

        scene.set_mode(SceneMode::Formed);
        let mut t = 0.0;
        for _ in 0..120 {
            scene.update(DT, t);
            t += DT;
        }

        assert_eq!(scene.needles.scatter(), scatter.as_slice());
        assert_eq!(scene.needles.target(), target.as_slice());
    }
}
