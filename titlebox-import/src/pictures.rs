//! Build the title → image index from a pictures folder.
//!
//! Layout: `<root>/<title_id>/<image><suffix>`. Files nested deeper under a
//! title folder are grouped under that folder; files directly in `<root>` are
//! ignored.

use std::collections::HashMap;
use std::path::{Component, Path};

use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to walk pictures folder: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Lower-cased title folder name → image names (suffix stripped), in file-name order.
pub type PictureIndex = HashMap<String, Vec<String>>;

/// Walk `root` and collect every file whose name ends with `suffix`
/// (ASCII case-insensitive).
///
/// Fails if the walk cannot start or on the first unreadable entry.
pub fn index_pictures(root: &Path, suffix: &str) -> Result<PictureIndex, ScanError> {
    let mut index = PictureIndex::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(stem) = strip_suffix_ignore_case(name, suffix) else {
            continue;
        };
        let Some(folder) = title_folder(root, entry.path()) else {
            continue;
        };
        index
            .entry(folder.to_lowercase())
            .or_default()
            .push(stem.to_string());
    }

    Ok(index)
}

/// `name` without `suffix`, if it ends with it (ASCII case-insensitive).
pub fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, tail) = name.split_at(split);
    tail.eq_ignore_ascii_case(suffix).then_some(stem)
}

/// First path segment below `root`, when `path` is at least two levels deep.
fn title_folder<'a>(root: &Path, path: &'a Path) -> Option<&'a str> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = match components.next()? {
        Component::Normal(segment) => segment.to_str()?,
        _ => return None,
    };
    // A file directly under root has nothing after its own name.
    components.next()?;
    Some(first)
}
