//! Decoder for Viatom pulse-oximetry binary dumps.
//!
//! Viatom oximeters (O2Ring, Checkme O2 and relatives) export recordings as a fixed
//! 40-byte header followed by packed 5-byte records. This crate validates the header,
//! derives per-sample timestamps, decodes SpO2, heart rate and the validity flag, and
//! corrects the double-sampling artifact devices produce at a 4 second interval.
//!
//! # Layers
//!
//! - [`dump::format`]: byte layout and [`Header`] parsing
//! - [`dump::decoder`]: records to [`Sample`]s, plus the deduplication pass
//! - [`RecordingReader`]: file and buffer entry point producing a [`Recording`]
//! - [`output`]: tabular writers and the YAML summary
//! - [`config`]: options shared by the library and the `viatom` binary
//!
//! The header parser and decoder are pure functions over byte slices and return
//! [`FormatError`]s; file handling is kept in the reader and writers.
//!
//! # Example
//!
//! ```rust,no_run
//! use viatom::output::{write_csv_file, write_summary_file};
//! use viatom::{ConverterConfig, RecordingReader};
//!
//! fn main() -> viatom::Result<()> {
//!     let config = ConverterConfig::default();
//!     let recording = RecordingReader::new(config.decode.clone()).open("night.dat")?;
//!
//!     write_csv_file("night.csv", &recording, &config.output)?;
//!     write_summary_file("night.yaml", &recording)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dump;
mod error;
pub mod output;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

pub use config::{ConverterConfig, DecodeOptions, OutputOptions};
pub use dump::{Header, RecordingReader};
pub use error::*;
pub use types::*;
