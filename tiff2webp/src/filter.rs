//! Incremental-conversion filtering: which source files still need
//! encoding, judged by what the destination directory already holds.

use crate::classify::WEBP_SUFFIXES;
use shared_utils::{name_has_suffix, stem_lowercase};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the source files that have no same-stem WebP in `destination`.
///
/// Stems are compared lower-cased with the final extension stripped, so the
/// filter tolerates filesystem case differences. With `force` set the
/// destination is not consulted at all.
///
/// Two source files sharing a stem (`x.tif` and `x.tiff`) are both returned
/// on a first pass; once either of them converts, the other is treated as
/// done on later passes.
pub fn select_pending(source_files: Vec<PathBuf>, destination: &Path, force: bool) -> Vec<PathBuf> {
    if force {
        return source_files;
    }

    let converted = converted_stems(destination);
    source_files
        .into_iter()
        .filter(|file| !converted.contains(&stem_lowercase(file)))
        .collect()
}

/// Lower-cased stems of the WebP files already present in `destination`.
/// A missing or unreadable destination counts as nothing converted.
fn converted_stems(destination: &Path) -> HashSet<String> {
    let Ok(entries) = fs::read_dir(destination) else {
        return HashSet::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| name_has_suffix(path, WEBP_SUFFIXES))
        .map(|path| stem_lowercase(&path))
        .collect()
}
