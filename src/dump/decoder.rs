//! Record decoding and the double-sampling correction
//!
//! The decoder turns the record area of a dump into [`Sample`]s. Timing is not stored
//! per record: the sample interval is derived from the header duration and the number
//! of whole records, and each sample's timestamp is the start time plus its index
//! times that interval.
//!
//! ## Double sampling
//!
//! Devices configured for a 4 second interval write every reading twice, which makes
//! the derived interval come out as 2 seconds. When the interval is exactly 2000 ms
//! and every consecutive pair carries the same reading, the pairs are collapsed to
//! their first sample. A single mismatching pair means the recording really was taken
//! at 2 seconds, so the sequence is kept whole.

use tracing::{debug, trace};

use super::format::{Header, INVALID_MARKER, RECORD_SIZE};
use crate::config::DecodeOptions;
use crate::error::FormatError;
use crate::types::{Recording, Sample};

/// Interval at which the double-sampling correction applies
pub const DOUBLE_SAMPLED_RESOLUTION_MS: u64 = 2000;

/// Outcome of the double-sampling correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduplication {
    pub samples: Vec<Sample>,
    /// Interval between the returned samples
    pub resolution_ms: u64,
    /// Whether pairs were collapsed
    pub collapsed: bool,
}

/// Whole records and leftover bytes in a record area of `body_len` bytes.
fn record_layout(body_len: usize) -> (usize, usize) {
    (body_len / RECORD_SIZE, body_len % RECORD_SIZE)
}

/// Derive the sample interval in milliseconds.
///
/// The duration is divided by the record count before scaling to milliseconds, so
/// sub-second remainders are truncated away: 10 s over 4 records gives 2000 ms,
/// not 2500 ms.
pub fn resolution_ms(duration_seconds: u16, record_count: usize) -> Result<u64, FormatError> {
    if record_count == 0 {
        return Err(FormatError::EmptyRecording);
    }
    Ok(u64::from(duration_seconds) / record_count as u64 * 1000)
}

/// Decode the record area of a dump with default options.
pub fn decode(body: &[u8], header: &Header) -> Result<Recording, FormatError> {
    decode_with(body, header, &DecodeOptions::default())
}

/// Decode the record area of a dump.
///
/// `body` is everything after the fixed header. Bytes after the last whole record are
/// ignored and reported in [`Recording::trailing_bytes`].
pub fn decode_with(
    body: &[u8],
    header: &Header,
    options: &DecodeOptions,
) -> Result<Recording, FormatError> {
    let (record_count, trailing_bytes) = record_layout(body.len());
    let resolution_ms = resolution_ms(header.duration_seconds, record_count)?;

    debug!(
        record_count,
        resolution_ms,
        trailing_bytes,
        duration_seconds = header.duration_seconds,
        "Decoding records"
    );

    let samples: Vec<Sample> = body
        .chunks_exact(RECORD_SIZE)
        .enumerate()
        .map(|(index, record)| decode_record(record, header.start_epoch_ms, resolution_ms, index))
        .collect();

    let dedup = if options.deduplicate {
        deduplicate(samples, resolution_ms)?
    } else {
        Deduplication { samples, resolution_ms, collapsed: false }
    };

    if dedup.collapsed {
        debug!(
            before = record_count,
            after = dedup.samples.len(),
            "Collapsed double-sampled records"
        );
    }

    Ok(Recording {
        header: header.clone(),
        record_count,
        resolution_ms,
        effective_resolution_ms: dedup.resolution_ms,
        deduplicated: dedup.collapsed,
        trailing_bytes,
        samples: dedup.samples,
    })
}

/// Apply the double-sampling correction.
///
/// Only acts when `resolution_ms` is [`DOUBLE_SAMPLED_RESOLUTION_MS`]. The check is all
/// or nothing: either every pair collapses or the sequence is returned untouched. After
/// a collapse the returned interval is doubled, so running the correction again on its
/// own output does nothing.
///
/// Fails with [`FormatError::OddRecordCount`] when the sequence cannot be split into
/// pairs.
pub fn deduplicate(samples: Vec<Sample>, resolution_ms: u64) -> Result<Deduplication, FormatError> {
    if resolution_ms != DOUBLE_SAMPLED_RESOLUTION_MS {
        return Ok(Deduplication { samples, resolution_ms, collapsed: false });
    }

    if samples.len() % 2 != 0 {
        return Err(FormatError::OddRecordCount { count: samples.len() });
    }

    let all_pairs_match = samples.chunks_exact(2).all(|pair| pair[0].same_reading(&pair[1]));
    if !all_pairs_match {
        trace!(count = samples.len(), "Pairs differ, keeping full sequence");
        return Ok(Deduplication { samples, resolution_ms, collapsed: false });
    }

    let samples = samples.into_iter().step_by(2).collect();
    Ok(Deduplication { samples, resolution_ms: resolution_ms * 2, collapsed: true })
}

fn decode_record(record: &[u8], start_epoch_ms: i64, resolution_ms: u64, index: usize) -> Sample {
    // Offset is bounded by duration_seconds * 1000, so it fits an i64.
    let offset_ms = (resolution_ms * index as u64) as i64;
    Sample {
        timestamp_ms: start_epoch_ms + offset_ms,
        spo2: record[0],
        heart_rate: record[1],
        valid: record[2] != INVALID_MARKER,
    }
}
