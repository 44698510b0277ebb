//! Manifest files: newline-delimited directory lists for batch mode.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a manifest, one directory path per line. Blank and
/// whitespace-only lines are ignored.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
