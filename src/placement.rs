//! Placement math: where particles and photo cards live in each state.
//!
//! Everything here runs once at startup. Scatter points sample a sphere
//! uniformly by volume; formed points wind a golden-angle spiral down a cone
//! that tapers linearly from the base radius to the tip. Photo cards get two
//! hand-tuned placements of their own: a loose wall facing the camera when
//! scattered, and an outward-facing slot on the cone surface when formed.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::Rng;

/// Golden angle in radians; consecutive indices land on a tight spiral that
/// never stacks two points on the same ray.
pub const GOLDEN_ANGLE: f32 = 2.399_96;

/// Linear remap of `v` from `[a0, a1]` onto `[b0, b1]`, unclamped.
#[inline]
pub fn map_linear(v: f32, a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}

/// Sample a point uniformly inside a sphere of the given radius.
///
/// Cube-root weighting on the radial coordinate keeps the distribution
/// uniform by volume rather than clustering at the center.
pub fn scatter_in_sphere(rng: &mut SmallRng, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = rng.gen::<f32>().cbrt() * radius;
    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Formed-state point for particle `index` of `total`: a golden-angle spiral
/// on a cone of the given height and base radius, apex up.
pub fn point_on_cone(index: u32, total: u32, height: f32, radius: f32) -> Vec3 {
    let half = height / 2.0;
    let y = map_linear(index as f32, 0.0, total as f32, -half, half);
    let r = map_linear(y, -half, half, radius, 0.0);
    let angle = index as f32 * GOLDEN_ANGLE;
    Vec3::new(angle.cos() * r, y, angle.sin() * r)
}

/// Add uniform jitter of total width `amount` on each axis.
pub fn jitter(rng: &mut SmallRng, point: Vec3, amount: f32) -> Vec3 {
    point
        + Vec3::new(
            (rng.gen::<f32>() - 0.5) * amount,
            (rng.gen::<f32>() - 0.5) * amount,
            (rng.gen::<f32>() - 0.5) * amount,
        )
}

/// A photo card pose: position plus XYZ Euler rotation.
///
/// Rotation stays in Euler form so the interpolator can blend the two poses
/// component-wise, the way the scene was tuned.
#[derive(Debug, Clone, Copy)]
pub struct CardPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

const WALL_WIDTH: f32 = 20.0;
const WALL_HEIGHT: f32 = 15.0;
const WALL_DEPTH: f32 = 10.0;
/// Fraction of cards that float back-side toward the camera when scattered.
const FLIP_PROBABILITY: f64 = 0.1;

/// Scattered-state pose: a loose grid wall floating in front of the camera.
///
/// Cards sit on a `ceil(sqrt(n))`-column grid with random offsets breaking
/// the regularity, pushed toward the camera (z in roughly 2.5..7.5), mostly
/// facing forward with a slight random tilt. A small fraction is flipped to
/// show its back.
pub fn card_on_wall(rng: &mut SmallRng, index: u32, total: u32) -> CardPose {
    let cols = (total as f32).sqrt().ceil() as u32;
    let rows = total.div_ceil(cols);
    let row = index / cols;
    let col = index % cols;

    let grid_x = if cols > 1 {
        (col as f32 / (cols - 1) as f32) * WALL_WIDTH - WALL_WIDTH / 2.0
    } else {
        0.0
    };
    let grid_y = if rows > 1 {
        (row as f32 / (rows - 1) as f32) * WALL_HEIGHT - WALL_HEIGHT / 2.0
    } else {
        0.0
    };

    let offset_x = (rng.gen::<f32>() - 0.5) * 4.0;
    let offset_y = (rng.gen::<f32>() - 0.5) * 4.0;
    let offset_z = (rng.gen::<f32>() - 0.5) * WALL_DEPTH;

    let position = Vec3::new(grid_x + offset_x, grid_y + offset_y, 5.0 + offset_z * 0.5);

    let tilt_x = (rng.gen::<f32>() - 0.5) * 0.3;
    let mut tilt_y = (rng.gen::<f32>() - 0.5) * 0.5;
    let tilt_z = (rng.gen::<f32>() - 0.5) * 0.4;
    if rng.gen_bool(FLIP_PROBABILITY) {
        tilt_y += PI;
    }

    CardPose {
        position,
        rotation: Vec3::new(tilt_x, tilt_y, tilt_z),
    }
}

/// Formed-state pose: a spiral slot on the cone surface, facing outward.
///
/// Unlike the particle spiral this one uses a coarser angular step (cards are
/// big) and keeps a margin from both the tip and the base so no card pokes
/// past the silhouette.
pub fn card_on_cone(rng: &mut SmallRng, index: u32, total: u32, height: f32, radius: f32) -> CardPose {
    let half = height / 2.0;
    let ratio = index as f32 / total as f32;
    let y = map_linear(ratio, 0.0, 1.0, -half + 1.0, half - 1.0);
    let r = map_linear(y, -half, half, radius + 0.5, 0.5);

    let angle = index as f32 * 1.5;
    let x = angle.sin() * r;
    let z = angle.cos() * r;

    // Face away from the cone axis: +Z of the card points along (x, 0, z).
    let yaw = x.atan2(z);
    let roll = (rng.gen::<f32>() - 0.5) * 0.2;

    CardPose {
        position: Vec3::new(x, y, z),
        rotation: Vec3::new(0.0, yaw, roll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn scatter_points_stay_inside_radius() {
        let mut rng = rng();
        for _ in 0..1_000 {
            let p = scatter_in_sphere(&mut rng, 25.0);
            assert!(p.length() <= 25.0 + 1e-4, "point escaped sphere: {p:?}");
        }
    }

    #[test]
    fn scatter_fills_the_volume() {
        // With cube-root weighting roughly half the samples land beyond
        // ~0.79R; surface-biased or center-biased sampling would not.
        let mut rng = rng();
        let n = 4_000;
        let outer = (0..n)
            .filter(|_| scatter_in_sphere(&mut rng, 1.0).length() > 0.7937)
            .count();
        let frac = outer as f32 / n as f32;
        assert!((0.42..0.58).contains(&frac), "outer-half fraction {frac}");
    }

    #[test]
    fn cone_radius_strictly_decreases_with_height() {
        let total = 500;
        let mut last_y = f32::NEG_INFINITY;
        let mut last_r = f32::INFINITY;
        for i in 0..total {
            let p = point_on_cone(i, total, 14.0, 5.5);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(p.y > last_y);
            assert!(r < last_r, "radius did not shrink at index {i}");
            last_y = p.y;
            last_r = r;
        }
    }

    #[test]
    fn cone_points_are_deterministic() {
        let a = point_on_cone(123, 4_000, 14.0, 5.5);
        let b = point_on_cone(123, 4_000, 14.0, 5.5);
        assert_eq!(a, b);
    }

    #[test]
    fn cone_spans_configured_height() {
        let total = 100;
        let bottom = point_on_cone(0, total, 14.0, 5.5);
        let top = point_on_cone(total - 1, total, 14.0, 5.5);
        assert!((bottom.y - (-7.0)).abs() < 1e-4);
        assert!(top.y < 7.0 && top.y > 6.0);
    }

    #[test]
    fn wall_cards_float_in_front() {
        let mut rng = rng();
        for i in 0..12 {
            let pose = card_on_wall(&mut rng, i, 12);
            assert!((2.4..=7.6).contains(&pose.position.z), "z = {}", pose.position.z);
            assert!(pose.position.x.abs() <= WALL_WIDTH / 2.0 + 2.0);
            assert!(pose.position.y.abs() <= WALL_HEIGHT / 2.0 + 2.0);
        }
    }

    #[test]
    fn cone_cards_face_outward() {
        let mut rng = rng();
        for i in 0..12 {
            let pose = card_on_cone(&mut rng, i, 12, 14.0, 5.5);
            let outward = Vec3::new(pose.position.x, 0.0, pose.position.z).normalize();
            // Card forward is +Z rotated by yaw around Y.
            let forward = Vec3::new(pose.rotation.y.sin(), 0.0, pose.rotation.y.cos());
            assert!(outward.dot(forward) > 0.99, "card {i} not facing outward");
        }
    }

    #[test]
    fn cone_cards_keep_tip_margin() {
        let mut rng = rng();
        let total = 12;
        for i in 0..total {
            let pose = card_on_cone(&mut rng, i, total, 14.0, 5.5);
            assert!(pose.position.y.abs() <= 6.0 + 1e-4);
        }
    }
}
