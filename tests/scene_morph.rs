//! End-to-end morph behavior, driven headless with a fixed frame step.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use treemorph::morph::Instance;
use treemorph::particle::{ParticleClass, ParticleSet};
use treemorph::scene::Scene;
use treemorph::{SceneConfig, SceneMode};

const DT: f32 = 1.0 / 60.0;

fn config() -> SceneConfig {
    let photos = (0..6)
        .map(|i| std::path::PathBuf::from(format!("p{i}.jpg")))
        .collect();
    SceneConfig::new()
        .with_needle_count(200)
        .with_ornament_count(20)
        .with_gift_count(5)
        .with_snow_count(50)
        .with_photos(photos)
}

fn translation(inst: &Instance) -> Vec3 {
    Vec3::new(inst.model[3][0], inst.model[3][1], inst.model[3][2])
}

/// Needle targets are reproducible from the config seed; generation order
/// inside the scene starts with the needles.
fn needle_targets(cfg: &SceneConfig) -> Vec<Vec3> {
    let mut rng = SmallRng::seed_from_u64(cfg.seed);
    let set = ParticleSet::generate(ParticleClass::Needle, cfg.needle_count, cfg, &mut rng);
    set.target().to_vec()
}

#[test]
fn forming_lands_needles_on_the_cone() {
    let cfg = config();
    let targets = needle_targets(&cfg);

    let mut scene = Scene::new(&cfg);
    scene.set_mode(SceneMode::Formed);

    let mut t = 0.0;
    for _ in 0..900 {
        scene.update(DT, t);
        t += DT;
    }

    // The formed group slowly yaws, which preserves height and distance
    // from the axis, so compare those instead of raw positions.
    for (inst, target) in scene.needle_instances().iter().zip(&targets) {
        let pos = translation(inst);
        assert!((pos.y - target.y).abs() < 0.1, "height off the cone slot");
        let radial = Vec3::new(pos.x, 0.0, pos.z).length();
        let target_radial = Vec3::new(target.x, 0.0, target.z).length();
        assert!((radial - target_radial).abs() < 0.1, "radius off the cone slot");
    }
}

#[test]
fn mid_flight_toggle_never_jumps() {
    let mut scene = Scene::new(&config());
    scene.set_mode(SceneMode::Formed);

    let mut t = 0.0;
    let mut prev: Option<Vec<Vec3>> = None;

    for frame in 0..300 {
        // Flip the switch repeatedly while the morph is in progress.
        if frame == 60 {
            scene.set_mode(SceneMode::Scattered);
        }
        if frame == 90 {
            scene.set_mode(SceneMode::Formed);
        }

        scene.update(DT, t);
        t += DT;

        let current: Vec<Vec3> = scene.needle_instances().iter().map(translation).collect();
        if let Some(prev) = &prev {
            for (a, b) in prev.iter().zip(&current) {
                // Worst case per frame: full scatter-to-tree span times the
                // ease step, well under two units at 60 fps.
                assert!(a.distance(*b) < 2.0, "particle teleported on toggle");
            }
        }
        prev = Some(current);
    }
}

#[test]
fn progress_stays_in_unit_range_under_huge_steps() {
    let mut scene = Scene::new(&config());
    scene.set_mode(SceneMode::Formed);

    let mut t = 0.0;
    for _ in 0..20 {
        // A five second hitch must clamp to the target, not overshoot.
        scene.update(5.0, t);
        t += 5.0;
    }
    assert!(scene.progress() >= 0.0 && scene.progress() <= 1.0);
    assert!(scene.progress() > 0.99);

    scene.set_mode(SceneMode::Scattered);
    for _ in 0..20 {
        scene.update(5.0, t);
        t += 5.0;
    }
    assert!(scene.progress() >= 0.0 && scene.progress() <= 1.0);
    assert!(scene.progress() < 0.01);
}

#[test]
fn every_photo_gets_a_card() {
    let mut scene = Scene::new(&config());
    scene.update(DT, 0.0);
    assert_eq!(scene.card_instances().len(), 6);
}

#[test]
fn scattered_scene_keeps_drifting() {
    let mut scene = Scene::new(&config());

    let mut t = 0.0;
    scene.update(DT, t);
    let before: Vec<Vec3> = scene.mote_instances()
        .iter()
        .map(|m| Vec3::from(m.position))
        .collect();

    for _ in 0..120 {
        t += DT;
        scene.update(DT, t);
    }
    let after: Vec<Vec3> = scene.mote_instances()
        .iter()
        .map(|m| Vec3::from(m.position))
        .collect();

    let moved = before
        .iter()
        .zip(&after)
        .filter(|(a, b)| a.distance(**b) > 0.01)
        .count();
    assert!(moved > before.len() / 2, "snow froze while scattered");
}
