use clap::Parser;
use shared_utils::{ensure_dir_exists, print_summary_report, Reporter, RunTotals, TeeReporter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tiff2webp::classify::{classify, TargetKind};
use tiff2webp::encoder::CwebpEncoder;
use tiff2webp::manifest::read_manifest;
use tiff2webp::processor::{process_directory, process_discovered, process_manifest_entries};

#[derive(Parser)]
#[command(name = "tiff2webp")]
#[command(
    version,
    about = "Batch TIFF to lossless WebP conversion at maximum compression effort",
    long_about = None
)]
struct Cli {
    /// Directory to convert, or a .txt manifest listing directories.
    /// Omitted: scan the working directory for TIFF-bearing subdirectories.
    #[arg(value_name = "TARGET")]
    target: Option<PathBuf>,

    /// Root directory for converted output; created if missing.
    #[arg(short = 'o', long = "output_dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let reporter = match TeeReporter::open_default() {
        Ok(reporter) => reporter,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &reporter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            reporter.error(&format!("Fatal: {:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, reporter: &dyn Reporter) -> anyhow::Result<()> {
    let run_started = Instant::now();

    let encoder = CwebpEncoder::locate()?;

    if let Some(output_dir) = cli.output_dir.as_deref() {
        if !output_dir.exists() {
            ensure_dir_exists(output_dir)?;
            reporter.info(&format!(
                "Created output directory: {}",
                output_dir.display()
            ));
        }
    }
    let output_root = cli.output_dir.as_deref();

    let totals = match cli.target.as_deref() {
        Some(target) => match classify(target) {
            TargetKind::Directory => {
                // Explicitly named directory: re-convert everything in it.
                let mut totals = RunTotals::new();
                let result = process_directory(target, output_root, true, &encoder, reporter)?;
                totals.absorb(&result);
                totals
            }
            TargetKind::Manifest => {
                let directories = read_manifest(target)?;
                process_manifest_entries(&directories, output_root, &encoder, reporter)?
            }
            TargetKind::Invalid => {
                anyhow::bail!(
                    "Unsupported target: {} (expected a directory or a .txt manifest)",
                    target.display()
                );
            }
        },
        None => {
            reporter.info("Scanning the working directory for TIFF-bearing subdirectories...");
            let cwd = std::env::current_dir()?;
            process_discovered(&cwd, output_root, &encoder, reporter)?
        }
    };

    print_summary_report(reporter, &totals, run_started.elapsed());
    Ok(())
}
