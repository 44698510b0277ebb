//! Per-directory conversion orchestration and the multi-directory drivers.
//!
//! Conversions run strictly one at a time; the source archives sit on
//! rotational storage, and one encoder per spindle is the fast path.

use crate::classify::{collect_source_files, dirs_with_matching_files, TIFF_SUFFIXES};
use crate::encoder::Encoder;
use crate::filter::select_pending;
use anyhow::Result;
use shared_utils::{create_progress_bar, ensure_dir_exists, DirectoryResult, Reporter, RunTotals};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to a source directory's name to form its destination.
const OUTPUT_DIR_SUFFIX: &str = "_webp";

/// Destination directory for `source_dir`: `<basename>_webp`, placed under
/// `output_root` when given, as a sibling of the source otherwise.
pub fn destination_for(source_dir: &Path, output_root: Option<&Path>) -> PathBuf {
    let name = source_dir.file_name().unwrap_or(source_dir.as_os_str());
    let mut dir_name = name.to_os_string();
    dir_name.push(OUTPUT_DIR_SUFFIX);

    match output_root {
        Some(root) => root.join(dir_name),
        None => source_dir
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(dir_name),
    }
}

/// Converts every pending TIFF in `source_dir`, accumulating statistics.
///
/// The destination directory is created up front (idempotently). Encoder
/// failures are reported and the file skipped; a single bad file never
/// aborts the directory. An empty pending set returns a zero-valued result
/// without touching the destination further.
pub fn process_directory(
    source_dir: &Path,
    output_root: Option<&Path>,
    force: bool,
    encoder: &dyn Encoder,
    reporter: &dyn Reporter,
) -> Result<DirectoryResult> {
    let destination = destination_for(source_dir, output_root);
    ensure_dir_exists(&destination)?;

    let source_files = collect_source_files(source_dir, TIFF_SUFFIXES);
    let pending = select_pending(source_files, &destination, force);

    if pending.is_empty() {
        return Ok(DirectoryResult::default());
    }

    let dir_label = source_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_dir.display().to_string());
    let bar = create_progress_bar(pending.len() as u64, &format!("Converting {}", dir_label));

    let mut result = DirectoryResult::default();
    let mut ratio_sum = 0.0;

    for input in &pending {
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = destination.join(format!("{}.webp", stem));

        let original_size = match fs::metadata(input) {
            Ok(meta) => meta.len(),
            Err(e) => {
                reporter.error(&format!("Failed to stat {}: {}", input.display(), e));
                bar.inc(1);
                continue;
            }
        };

        match encoder.convert(input, &output) {
            Ok(elapsed) => {
                let converted_size = match fs::metadata(&output) {
                    Ok(meta) => meta.len(),
                    Err(e) => {
                        reporter.error(&format!("Failed to stat {}: {}", output.display(), e));
                        bar.inc(1);
                        continue;
                    }
                };

                // Stored unrounded; rounding happens only at display time.
                let ratio = converted_size as f64 / original_size as f64;
                ratio_sum += ratio;
                result.converted += 1;
                result.encode_time += elapsed;
                result.original_bytes += original_size;
                result.converted_bytes += converted_size;

                let file_label = input
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                reporter.progress(&file_label, ratio, elapsed);
                bar.set_message(format!(
                    "ratio {:.1}%, {:.1}s",
                    ratio * 100.0,
                    elapsed.as_secs_f64()
                ));
            }
            Err(e) => {
                reporter.error(&format!("Conversion failed for {}: {}", input.display(), e));
            }
        }
        bar.inc(1);
    }

    if result.converted > 0 {
        result.mean_ratio = ratio_sum / result.converted as f64;
    }

    bar.finish_and_clear();
    Ok(result)
}

/// Batch mode: converts each directory listed in a manifest. An entry that
/// is not an existing directory is reported and skipped; the run continues.
pub fn process_manifest_entries(
    directories: &[PathBuf],
    output_root: Option<&Path>,
    encoder: &dyn Encoder,
    reporter: &dyn Reporter,
) -> Result<RunTotals> {
    let mut totals = RunTotals::new();

    for directory in directories {
        if !directory.is_dir() {
            reporter.error(&format!("Directory not found: {}", directory.display()));
            continue;
        }
        let result = process_directory(directory, output_root, false, encoder, reporter)?;
        totals.absorb(&result);
    }

    Ok(totals)
}

/// Auto-discovery mode: converts every TIFF-bearing subdirectory of `root`,
/// one level deep.
pub fn process_discovered(
    root: &Path,
    output_root: Option<&Path>,
    encoder: &dyn Encoder,
    reporter: &dyn Reporter,
) -> Result<RunTotals> {
    let mut totals = RunTotals::new();

    for directory in dirs_with_matching_files(root, TIFF_SUFFIXES)? {
        let result = process_directory(&directory, output_root, false, encoder, reporter)?;
        totals.absorb(&result);
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::EncodeError;
    use shared_utils::MemoryReporter;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Writes an output file half the size of the input and reports a fixed
    /// 0.5 s encode time.
    struct HalvingEncoder;

    impl Encoder for HalvingEncoder {
        fn convert(&self, input: &Path, output: &Path) -> Result<Duration, EncodeError> {
            let data = fs::read(input).map_err(|source| EncodeError::Spawn {
                program: "mock".to_string(),
                source,
            })?;
            fs::write(output, vec![0u8; data.len() / 2]).map_err(|source| {
                EncodeError::Spawn {
                    program: "mock".to_string(),
                    source,
                }
            })?;
            Ok(Duration::from_millis(500))
        }
    }

    /// Fails on inputs whose name contains "bad", halves the rest.
    struct FlakyEncoder;

    impl Encoder for FlakyEncoder {
        fn convert(&self, input: &Path, output: &Path) -> Result<Duration, EncodeError> {
            let name = input.file_name().unwrap_or_default().to_string_lossy();
            if name.contains("bad") {
                return Err(EncodeError::Failed {
                    code: Some(1),
                    stderr: "cannot decode".to_string(),
                });
            }
            HalvingEncoder.convert(input, output)
        }
    }

    fn write_file(path: &Path, len: usize) {
        let mut file = File::create(path).unwrap();
        file.write_all(&vec![0u8; len]).unwrap();
    }

    fn setup_scans(root: &Path) -> PathBuf {
        let scans = root.join("scans");
        fs::create_dir(&scans).unwrap();
        write_file(&scans.join("a.tif"), 1000);
        write_file(&scans.join("b.tiff"), 2000);
        scans
    }

    #[test]
    fn test_two_file_directory_statistics() {
        let temp = TempDir::new().unwrap();
        let scans = setup_scans(temp.path());
        let reporter = MemoryReporter::new();

        let result = process_directory(&scans, None, false, &HalvingEncoder, &reporter).unwrap();

        assert_eq!(result.converted, 2);
        assert_eq!(result.encode_time, Duration::from_secs(1));
        assert!((result.mean_ratio - 0.5).abs() < 1e-12);
        assert_eq!(result.original_bytes, 3000);
        assert_eq!(result.converted_bytes, 1500);

        // Destination is a sibling named after the source.
        let dest = temp.path().join("scans_webp");
        assert!(dest.join("a.webp").is_file());
        assert!(dest.join("b.webp").is_file());

        // Per-file progress went through the reporter.
        assert!(reporter.contains("a.tif → ratio 50.0%, 0.5s"));
        assert!(reporter.contains("b.tiff → ratio 50.0%, 0.5s"));
    }

    #[test]
    fn test_destination_under_output_root() {
        let temp = TempDir::new().unwrap();
        let scans = setup_scans(temp.path());
        let out_root = temp.path().join("converted");
        fs::create_dir(&out_root).unwrap();
        let reporter = MemoryReporter::new();

        process_directory(&scans, Some(&out_root), false, &HalvingEncoder, &reporter).unwrap();

        assert!(out_root.join("scans_webp").join("a.webp").is_file());
        assert!(!temp.path().join("scans_webp").exists());
    }

    #[test]
    fn test_second_run_converts_nothing() {
        let temp = TempDir::new().unwrap();
        let scans = setup_scans(temp.path());
        let reporter = MemoryReporter::new();

        let first = process_directory(&scans, None, false, &HalvingEncoder, &reporter).unwrap();
        assert_eq!(first.converted, 2);

        let second = process_directory(&scans, None, false, &HalvingEncoder, &reporter).unwrap();
        assert!(second.is_empty());
        assert_eq!(second, DirectoryResult::default());
    }

    #[test]
    fn test_empty_work_list_leaves_destination_untouched() {
        let temp = TempDir::new().unwrap();
        let scans = setup_scans(temp.path());
        let dest = temp.path().join("scans_webp");
        fs::create_dir(&dest).unwrap();
        write_file(&dest.join("a.webp"), 10);
        write_file(&dest.join("b.webp"), 20);

        let reporter = MemoryReporter::new();
        let result = process_directory(&scans, None, false, &HalvingEncoder, &reporter).unwrap();

        assert!(result.is_empty());
        // Prior outputs keep their sizes: nothing was re-encoded.
        assert_eq!(fs::metadata(dest.join("a.webp")).unwrap().len(), 10);
        assert_eq!(fs::metadata(dest.join("b.webp")).unwrap().len(), 20);
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 2);
    }

    #[test]
    fn test_force_reconverts_everything() {
        let temp = TempDir::new().unwrap();
        let scans = setup_scans(temp.path());
        let dest = temp.path().join("scans_webp");
        fs::create_dir(&dest).unwrap();
        write_file(&dest.join("a.webp"), 10);
        write_file(&dest.join("b.webp"), 20);

        let reporter = MemoryReporter::new();
        let result = process_directory(&scans, None, true, &HalvingEncoder, &reporter).unwrap();

        assert_eq!(result.converted, 2);
        assert_eq!(fs::metadata(dest.join("a.webp")).unwrap().len(), 500);
        assert_eq!(fs::metadata(dest.join("b.webp")).unwrap().len(), 1000);
    }

    #[test]
    fn test_one_failure_does_not_abort_the_directory() {
        let temp = TempDir::new().unwrap();
        let scans = temp.path().join("scans");
        fs::create_dir(&scans).unwrap();
        write_file(&scans.join("bad.tif"), 1000);
        write_file(&scans.join("good.tif"), 2000);

        let reporter = MemoryReporter::new();
        let result = process_directory(&scans, None, false, &FlakyEncoder, &reporter).unwrap();

        assert_eq!(result.converted, 1);
        assert_eq!(result.original_bytes, 2000);
        assert_eq!(result.converted_bytes, 1000);
        assert!(reporter.contains("Conversion failed for"));
        assert!(reporter.contains("bad.tif"));
        assert!(temp.path().join("scans_webp").join("good.webp").is_file());
    }

    #[test]
    fn test_manifest_entries_skip_missing_directories() {
        let temp = TempDir::new().unwrap();
        let scans = setup_scans(temp.path());
        let missing = temp.path().join("nonexistent");

        let reporter = MemoryReporter::new();
        let totals = process_manifest_entries(
            &[missing.clone(), scans],
            None,
            &HalvingEncoder,
            &reporter,
        )
        .unwrap();

        assert_eq!(totals.converted, 2);
        assert_eq!(totals.original_bytes, 3000);
        assert!(reporter.contains(&format!("Directory not found: {}", missing.display())));
    }

    #[test]
    fn test_discovery_processes_each_tiff_subdir() {
        let temp = TempDir::new().unwrap();
        setup_scans(temp.path());

        let shots = temp.path().join("shots");
        fs::create_dir(&shots).unwrap();
        write_file(&shots.join("c.tif"), 4000);

        let empty = temp.path().join("docs");
        fs::create_dir(&empty).unwrap();

        let reporter = MemoryReporter::new();
        let totals = process_discovered(temp.path(), None, &HalvingEncoder, &reporter).unwrap();

        assert_eq!(totals.converted, 3);
        assert_eq!(totals.original_bytes, 7000);
        assert_eq!(totals.converted_bytes, 3500);
        assert!(!temp.path().join("docs_webp").exists());
    }

    #[test]
    fn test_destination_for_paths() {
        assert_eq!(
            destination_for(Path::new("/archive/scans"), None),
            PathBuf::from("/archive/scans_webp")
        );
        assert_eq!(
            destination_for(Path::new("/archive/scans"), Some(Path::new("/out"))),
            PathBuf::from("/out/scans_webp")
        );
        assert_eq!(
            destination_for(Path::new("scans"), None),
            PathBuf::from("scans_webp")
        );
    }
}
