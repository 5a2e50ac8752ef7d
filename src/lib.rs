//! treemorph — a particle Christmas tree that assembles itself.
//!
//! Thousands of instanced particles morph between a scattered cloud and a
//! cone-shaped tree laid out on a golden-angle spiral, with a floating photo
//! gallery that tucks itself onto the branches. One toggle drives the whole
//! scene; every motion is an exponential ease toward the current target, so
//! the switch can be flipped mid-flight without a hitch.
//!
//! ```no_run
//! use treemorph::{run, SceneConfig};
//!
//! let config = SceneConfig::new()
//!     .with_photos(vec!["photos/one.jpg".into(), "photos/two.jpg".into()]);
//! run(config).unwrap();
//! ```

pub mod app;
pub mod camera;
pub mod config;
pub mod error;
pub mod gallery;
pub mod gpu;
pub mod mesh;
pub mod morph;
pub mod particle;
pub mod placement;
pub mod scene;
pub mod snow;
pub mod time;
pub mod ui;

pub use app::run;
pub use camera::OrbitCamera;
pub use config::SceneConfig;
pub use error::{AppError, GpuError, PhotoError};
pub use morph::SceneMode;
pub use scene::Scene;
