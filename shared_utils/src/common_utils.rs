//! Filename and filesystem helpers shared across the workspace.

use anyhow::{Context, Result};
use std::path::Path;

/// True when the file name ends, case-insensitively, with one of the given
/// suffixes (`".tif"`, `".webp"`, ...). Matching is on the name suffix
/// rather than `Path::extension` so multi-dot names behave the way the
/// shell sees them.
pub fn name_has_suffix(path: &Path, suffixes: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let lower = name.to_lowercase();
    suffixes.iter().any(|suffix| lower.ends_with(suffix))
}

/// Lower-cased file stem (final extension stripped). Empty when the path
/// has no file name.
pub fn stem_lowercase(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Creates a directory and any missing parents. Existing directories are
/// not an error.
pub fn ensure_dir_exists(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}
