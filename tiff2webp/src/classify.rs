//! Target classification and one-level directory discovery.

use shared_utils::name_has_suffix;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source suffixes recognized for conversion.
pub const TIFF_SUFFIXES: &[&str] = &[".tif", ".tiff"];

/// Suffix of the files the encoder produces.
pub const WEBP_SUFFIXES: &[&str] = &[".webp"];

const MANIFEST_SUFFIXES: &[&str] = &[".txt"];

/// What kind of target the positional argument names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Directory,
    Manifest,
    Invalid,
}

pub fn classify(path: &Path) -> TargetKind {
    if path.is_dir() {
        TargetKind::Directory
    } else if path.is_file() && name_has_suffix(path, MANIFEST_SUFFIXES) {
        TargetKind::Manifest
    } else {
        TargetKind::Invalid
    }
}

/// Immediate subdirectories of `root` that contain at least one file whose
/// name matches one of `suffixes`. Scanning a subdirectory's children stops
/// at the first match. Results are sorted for a stable processing order.
pub fn dirs_with_matching_files(root: &Path, suffixes: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if dir_has_matching_file(&entry.path(), suffixes)? {
            found.push(entry.path());
        }
    }

    found.sort();
    Ok(found)
}

fn dir_has_matching_file(dir: &Path, suffixes: &[&str]) -> io::Result<bool> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() && name_has_suffix(&entry.path(), suffixes) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Immediate child files of `dir` matching the suffix set, sorted.
pub fn collect_source_files(dir: &Path, suffixes: &[&str]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| name_has_suffix(entry.path(), suffixes))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}
