//! The floating photo gallery.
//!
//! Each photo becomes a polaroid card with two precomputed poses: a slot on
//! the scattered photo wall and an outward-facing slot on the cone surface.
//! One progress scalar drives the whole group; cards float more while
//! scattered and settle once formed. Image decoding happens on a background
//! thread; a card shows the placeholder texture until its pixels arrive.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use glam::{Mat4, Quat, Vec3};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::SceneConfig;
use crate::error::PhotoError;
use crate::morph::{self, Instance, Progress, SceneMode, GALLERY_EASE_RATE};
use crate::placement::{self, CardPose};

/// Scale the cards show while scattered (wall) and formed (on the tree).
const SCALE_SCATTERED: f32 = 1.7;
const SCALE_FORMED: f32 = 1.0;
/// Easing rate for the display scale.
const SCALE_EASE_RATE: f32 = 5.0;

/// A decoded photo ready for texture upload.
pub struct DecodedPhoto {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Spawn the background decode thread for all configured photos.
///
/// Results arrive in file order on the returned channel, one per path,
/// failures included. The thread exits once every photo is sent or the
/// receiver is gone.
pub fn spawn_loader(paths: Vec<PathBuf>) -> mpsc::Receiver<(usize, Result<DecodedPhoto, PhotoError>)> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (index, path) in paths.into_iter().enumerate() {
            let result = decode(&path);
            if tx.send((index, result)).is_err() {
                break;
            }
        }
    });
    rx
}

fn decode(path: &PathBuf) -> Result<DecodedPhoto, PhotoError> {
    let bytes = std::fs::read(path).map_err(|e| PhotoError::Io(path.clone(), e))?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| PhotoError::Decode(path.clone(), e))?
        .into_rgba8();
    let (width, height) = img.dimensions();
    Ok(DecodedPhoto {
        width,
        height,
        rgba: img.into_raw(),
    })
}

struct Card {
    wall: CardPose,
    cone: CardPose,
}

pub struct Gallery {
    cards: Vec<Card>,
    progress: Progress,
    display_scale: f32,
    instances: Vec<Instance>,
}

impl Gallery {
    pub fn new(config: &SceneConfig) -> Self {
        let total = config.photos.len() as u32;
        // Card placement gets its own stream so photo count changes never
        // reshuffle the particle classes.
        let mut rng = SmallRng::seed_from_u64(config.seed ^ 0x9e37_79b9);

        let cards = (0..total)
            .map(|i| Card {
                wall: placement::card_on_wall(&mut rng, i, total),
                cone: placement::card_on_cone(
                    &mut rng,
                    i,
                    total,
                    config.tree_height,
                    config.tree_radius,
                ),
            })
            .collect();

        let initial = match config.initial_mode {
            SceneMode::Scattered => SCALE_SCATTERED,
            SceneMode::Formed => SCALE_FORMED,
        };

        Self {
            cards,
            progress: Progress::new(GALLERY_EASE_RATE, config.initial_mode),
            display_scale: initial,
            instances: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Card transforms for this frame; shared by the frame mesh draw and the
    /// textured photo draw.
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Advance the gallery by one frame and recompose every card transform.
    pub fn update(&mut self, mode: SceneMode, dt: f32, time: f32, group: Mat4) {
        let p = self.progress.advance(mode, dt);

        let scale_target = morph::lerp(SCALE_SCATTERED, SCALE_FORMED, p);
        let k = (SCALE_EASE_RATE * dt).min(1.0);
        self.display_scale += (scale_target - self.display_scale) * k;

        self.instances.clear();
        self.instances.reserve(self.cards.len());

        let float_amplitude = (1.0 - p) * 1.2 + 0.1;

        for (index, card) in self.cards.iter().enumerate() {
            let i = index as f32;
            let float_offset = Vec3::new(
                (time * 0.3 + i * 0.5).sin() * float_amplitude * 0.15,
                (time * 0.4 + i * 0.7).cos() * float_amplitude * 0.15,
                (time * 0.2 + i * 0.3).sin() * float_amplitude * 0.1,
            );

            let position = (card.wall.position + float_offset).lerp(card.cone.position, p);

            let float_roll = (time * 0.2 + i).sin() * 0.1 * (1.0 - p);
            let wall_rot = card.wall.rotation + Vec3::new(0.0, 0.0, float_roll);
            let euler = wall_rot.lerp(card.cone.rotation, p);
            let rot = Quat::from_euler(glam::EulerRot::XYZ, euler.x, euler.y, euler.z);

            let model = group
                * Mat4::from_scale_rotation_translation(
                    Vec3::splat(self.display_scale),
                    rot,
                    position,
                );

            self.instances.push(Instance {
                model: model.to_cols_array_2d(),
                color: [1.0, 1.0, 1.0],
                emissive: 0.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config(photos: usize) -> SceneConfig {
        let paths = (0..photos)
            .map(|i| PathBuf::from(format!("photo_{i}.jpg")))
            .collect();
        SceneConfig::new().with_photos(paths)
    }

    fn translation(inst: &Instance) -> Vec3 {
        Vec3::new(inst.model[3][0], inst.model[3][1], inst.model[3][2])
    }

    #[test]
    fn one_card_per_photo() {
        let gallery = Gallery::new(&config(9));
        assert_eq!(gallery.len(), 9);
    }

    #[test]
    fn empty_photo_list_renders_nothing() {
        let mut gallery = Gallery::new(&config(0));
        gallery.update(SceneMode::Formed, DT, 0.0, Mat4::IDENTITY);
        assert!(gallery.instances().is_empty());
    }

    #[test]
    fn formed_cards_converge_to_cone_slots() {
        let cfg = config(8);
        let mut gallery = Gallery::new(&cfg);
        let targets: Vec<Vec3> = gallery.cards.iter().map(|c| c.cone.position).collect();

        let mut t = 0.0;
        for _ in 0..600 {
            gallery.update(SceneMode::Formed, DT, t, Mat4::IDENTITY);
            t += DT;
        }

        for (inst, target) in gallery.instances().iter().zip(&targets) {
            assert!(
                (translation(inst) - *target).length() < 0.05,
                "card off its slot"
            );
        }
    }

    #[test]
    fn display_scale_settles_at_formed_size() {
        let mut gallery = Gallery::new(&config(6));
        assert!((gallery.display_scale - SCALE_SCATTERED).abs() < 1e-5);

        let mut t = 0.0;
        for _ in 0..600 {
            gallery.update(SceneMode::Formed, DT, t, Mat4::IDENTITY);
            t += DT;
        }
        assert!((gallery.display_scale - SCALE_FORMED).abs() < 0.01);
    }

    #[test]
    fn scattered_cards_stay_near_their_wall_slots() {
        let cfg = config(8);
        let mut gallery = Gallery::new(&cfg);
        let slots: Vec<Vec3> = gallery.cards.iter().map(|c| c.wall.position).collect();

        let mut t = 0.0;
        for _ in 0..240 {
            gallery.update(SceneMode::Scattered, DT, t, Mat4::IDENTITY);
            t += DT;
        }

        for (inst, slot) in gallery.instances().iter().zip(&slots) {
            // Float amplitude tops out around 1.3 * 0.15 per axis.
            assert!((translation(inst) - *slot).length() < 0.5);
        }
    }

    #[test]
    fn loader_reports_missing_files() {
        let rx = spawn_loader(vec![PathBuf::from("does-not-exist.png")]);
        let (index, result) = rx.recv().expect("loader thread died");
        assert_eq!(index, 0);
        assert!(result.is_err());
    }
}
