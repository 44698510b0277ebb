//! Batch TIFF → WebP conversion: target classification, directory
//! discovery, incremental filtering, cwebp invocation, and statistics
//! accumulation. The binary in `main.rs` is a thin driver over these
//! modules.

pub mod classify;
pub mod encoder;
pub mod filter;
pub mod manifest;
pub mod processor;

pub use classify::{
    classify, collect_source_files, dirs_with_matching_files, TargetKind, TIFF_SUFFIXES,
};
pub use encoder::{CwebpEncoder, EncodeError, Encoder};
pub use filter::select_pending;
pub use manifest::read_manifest;
pub use processor::{process_directory, process_discovered, process_manifest_entries};
