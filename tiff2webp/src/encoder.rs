//! cwebp invocation. A failed encode is a value returned to the caller,
//! never a panic, so one bad file cannot take down a batch.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cwebp exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("cwebp not found on PATH: {0}")]
    ToolNotFound(#[from] which::Error),
}

/// One input file in, one output file out.
pub trait Encoder {
    /// Returns the wall-clock time of the encode alone; file sizes are
    /// measured by the caller, outside this timing.
    fn convert(&self, input: &Path, output: &Path) -> Result<Duration, EncodeError>;
}

/// Drives the external `cwebp` binary in lossless mode at maximum
/// compression effort.
pub struct CwebpEncoder {
    program: PathBuf,
}

impl CwebpEncoder {
    /// Locates `cwebp` on PATH. Done once at startup so a missing binary
    /// aborts the run before any directory work begins.
    pub fn locate() -> Result<Self, EncodeError> {
        let program = which::which("cwebp")?;
        Ok(Self { program })
    }

    #[cfg(test)]
    fn with_program(program: PathBuf) -> Self {
        Self { program }
    }
}

impl Encoder for CwebpEncoder {
    fn convert(&self, input: &Path, output: &Path) -> Result<Duration, EncodeError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-lossless")
            .arg("-quiet")
            .args(["-m", "6"]) // compression method 0-6
            .args(["-z", "9"]) // effort level 0-9
            .args(["-pass", "10"]) // analysis passes
            .arg(input)
            .arg("-o")
            .arg(output);

        let started = Instant::now();
        let result = cmd.output();
        let elapsed = started.elapsed();

        let process_output = result.map_err(|source| EncodeError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if !process_output.status.success() {
            return Err(EncodeError::Failed {
                code: process_output.status.code(),
                stderr: String::from_utf8_lossy(&process_output.stderr)
                    .trim()
                    .to_string(),
            });
        }

        Ok(elapsed)
    }
}
