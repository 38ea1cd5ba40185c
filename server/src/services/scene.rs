//! Scene service — season-keyed mascot image cycling.
//!
//! DESIGN
//! ======
//! Selection is a pure function of the directory listing and the clock:
//! `index = (unix_time / cycle_secs) % count` over the sorted file names.
//! Every front end rendering the station at the same moment shows the same
//! image, with no per-connection state and nothing to invalidate; the
//! bucket advances on its own every `cycle_secs`.
//!
//! Lookup order mirrors how the asset tree degrades: the season folder
//! first, then the images root, then `None` (front ends draw the built-in
//! placeholder).

use std::path::{Path, PathBuf};

use updates::Season;

pub const DEFAULT_CYCLE_SECS: u64 = 30;

// svg included so the scaffolded placeholders cycle like any other art.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "svg"];

/// Picks the scene image for a season at a point in time.
#[derive(Clone)]
pub struct SceneCycler {
    images_dir: PathBuf,
    cycle_secs: u64,
}

impl SceneCycler {
    #[must_use]
    pub fn new(images_dir: PathBuf, cycle_secs: u64) -> Self {
        Self { images_dir, cycle_secs: cycle_secs.max(1) }
    }

    /// Web path (`/assets/images/...`) of the scene image for `season` at
    /// `now_unix`, or `None` when no image exists anywhere.
    #[must_use]
    pub fn current(&self, season: Season, now_unix: i64) -> Option<String> {
        let listing = list_images(&self.images_dir.join(season.as_str()));
        if !listing.is_empty() {
            let name = &listing[bucket_index(now_unix, self.cycle_secs, listing.len())];
            return Some(format!("/assets/images/{}/{name}", season.as_str()));
        }

        let listing = list_images(&self.images_dir);
        if listing.is_empty() {
            return None;
        }
        let name = &listing[bucket_index(now_unix, self.cycle_secs, listing.len())];
        Some(format!("/assets/images/{name}"))
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Time-bucketed index into a listing of `count` images.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub(crate) fn bucket_index(now_unix: i64, cycle_secs: u64, count: usize) -> usize {
    debug_assert!(count > 0 && cycle_secs > 0);
    let bucket = now_unix.div_euclid(cycle_secs as i64);
    bucket.rem_euclid(count as i64) as usize
}

/// Image file names in `dir`, sorted for a stable cycling order. Unreadable
/// directories read as empty.
fn list_images(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| has_image_extension(name))
        .collect();
    names.sort();
    names
}

fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;
