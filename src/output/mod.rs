//! Rendering decoded recordings.
//!
//! The decoder knows nothing about output formats. Writers implement [`SampleSink`]
//! and are driven by [`write_recording`], which emits the column header once and then
//! every sample in time order.
//!
//! Files are written through [`StagedFile`]: each output is rendered to a hidden
//! sibling and only renamed into place once everything has been flushed, so a failed
//! conversion never leaves a truncated output behind. [`commit_all`] publishes
//! several outputs together.

mod csv;
mod staged;
mod summary;

pub use csv::CsvSink;
pub use staged::{StagedFile, commit_all};
pub use summary::{RecordingSummary, stage_summary_file, write_summary_file};

use std::io;
use std::path::Path;
use tracing::debug;

use crate::Result;
use crate::config::OutputOptions;
use crate::types::{Recording, Sample};

/// Column names of the tabular output, in order
pub const COLUMNS: [&str; 4] = ["Timestamp", "SpO2", "Heartrate", "Valid"];

/// Destination for decoded samples.
pub trait SampleSink {
    /// Write the column header row
    fn write_header(&mut self) -> io::Result<()>;

    /// Write one sample row
    fn write_sample(&mut self, sample: &Sample) -> io::Result<()>;

    /// Flush buffered output
    fn finish(&mut self) -> io::Result<()>;
}

/// Render a whole recording into a sink.
pub fn write_recording<S: SampleSink + ?Sized>(sink: &mut S, recording: &Recording) -> io::Result<()> {
    sink.write_header()?;
    for sample in recording.samples() {
        sink.write_sample(sample)?;
    }
    sink.finish()
}

/// Render a recording as delimited text into a staged file for `path`.
pub fn stage_csv_file<P: AsRef<Path>>(
    path: P,
    recording: &Recording,
    options: &OutputOptions,
) -> Result<StagedFile> {
    options.validate()?;
    debug!("Writing {} rows for {}", recording.len(), path.as_ref().display());

    StagedFile::write_with(path, |writer| {
        let mut sink = CsvSink::new(writer, options.clone());
        write_recording(&mut sink, recording)
    })
}

/// Write a recording as delimited text to `path`.
///
/// The file only appears at `path` when every row was written successfully.
pub fn write_csv_file<P: AsRef<Path>>(
    path: P,
    recording: &Recording,
    options: &OutputOptions,
) -> Result<()> {
    stage_csv_file(path, recording, options)?.commit()?;
    Ok(())
}
