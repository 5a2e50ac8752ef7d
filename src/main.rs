use std::path::PathBuf;

use treemorph::{run, SceneConfig};

/// Collect the photos for the gallery from `./photos`, in name order.
fn scan_photos(dir: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut photos: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("png" | "jpg" | "jpeg")
            )
        })
        .collect();
    photos.sort();
    photos
}

fn main() {
    let photos = scan_photos("photos");
    if photos.is_empty() {
        eprintln!("No photos found in ./photos; the gallery will be empty.");
    }

    let config = SceneConfig::new().with_photos(photos);

    if let Err(err) = run(config) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
