//! Scene configuration.
//!
//! All tunables live here with compiled-in defaults tuned for the stock
//! scene. Use method chaining to adjust, then hand the config to
//! [`crate::run`] or [`crate::scene::Scene::new`].

use std::path::PathBuf;

use crate::morph::SceneMode;

/// Configuration for the particle scene.
///
/// ```ignore
/// let config = SceneConfig::new()
///     .with_needle_count(2_000)
///     .with_photos(vec!["photos/cocoa.jpg".into()]);
/// treemorph::run(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Number of needle particles (tetrahedra forming the foliage).
    pub needle_count: u32,
    /// Number of ornament bells.
    pub ornament_count: u32,
    /// Number of gift boxes.
    pub gift_count: u32,
    /// Number of drifting snow motes.
    pub snow_count: u32,
    /// Height of the formed cone.
    pub tree_height: f32,
    /// Base radius of the formed cone.
    pub tree_radius: f32,
    /// Radius of the scattered-state sphere.
    pub scatter_radius: f32,
    /// Gallery photos, one card per file.
    pub photos: Vec<PathBuf>,
    /// Mode the scene starts in.
    pub initial_mode: SceneMode,
    /// Seed for the one-time placement sampling.
    pub seed: u64,
}

impl SceneConfig {
    pub fn new() -> Self {
        Self {
            needle_count: 4_000,
            ornament_count: 150,
            gift_count: 15,
            snow_count: 600,
            tree_height: 14.0,
            tree_radius: 5.5,
            scatter_radius: 25.0,
            photos: Vec::new(),
            initial_mode: SceneMode::Scattered,
            seed: 0x5eed_7ee5,
        }
    }

    pub fn with_needle_count(mut self, count: u32) -> Self {
        self.needle_count = count;
        self
    }

    pub fn with_ornament_count(mut self, count: u32) -> Self {
        self.ornament_count = count;
        self
    }

    pub fn with_gift_count(mut self, count: u32) -> Self {
        self.gift_count = count;
        self
    }

    pub fn with_snow_count(mut self, count: u32) -> Self {
        self.snow_count = count;
        self
    }

    pub fn with_tree_size(mut self, height: f32, radius: f32) -> Self {
        self.tree_height = height;
        self.tree_radius = radius;
        self
    }

    pub fn with_scatter_radius(mut self, radius: f32) -> Self {
        self.scatter_radius = radius;
        self
    }

    pub fn with_photos(mut self, photos: Vec<PathBuf>) -> Self {
        self.photos = photos;
        self
    }

    pub fn with_initial_mode(mut self, mode: SceneMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}
