//! Fully decoded recording

use super::Sample;
use crate::dump::format::Header;

/// Result of decoding one dump.
///
/// Produced once by the decoder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    /// Parsed file header
    pub header: Header,
    /// Number of whole records found after the header
    pub record_count: usize,
    /// Sample interval derived from the header duration and the record count
    pub resolution_ms: u64,
    /// Sample interval after deduplication (doubles when pairs were collapsed)
    pub effective_resolution_ms: u64,
    /// Whether the double-sampling correction collapsed the sequence
    pub deduplicated: bool,
    /// Bytes after the last whole record that were ignored
    pub trailing_bytes: usize,
    /// Samples in time order
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Start of the recording in epoch milliseconds
    pub fn start_epoch_ms(&self) -> i64 {
        self.header.start_epoch_ms
    }

    /// Number of samples the device flagged as invalid
    pub fn invalid_count(&self) -> usize {
        self.samples.iter().filter(|s| !s.valid).count()
    }
}
