//! Viatom dump layout and header parsing
//!
//! A dump is a fixed 40-byte header followed by packed 5-byte records. Multi-byte
//! fields are little-endian.
//!
//! ## Header Layout
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | signature, always `0x0003` |
//! | 2 | 2 | year |
//! | 4 | 1 | month |
//! | 5 | 1 | day |
//! | 6 | 1 | hour |
//! | 7 | 1 | minute |
//! | 8 | 1 | second |
//! | 9 | 2 | declared header size (informational) |
//! | 13 | 2 | recording duration, seconds |
//!
//! Bytes not listed are reserved. The record area always starts at [`HEADER_SIZE`]
//! regardless of the declared header size.
//!
//! ## Record Layout
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | SpO2 |
//! | 1 | 1 | heart rate |
//! | 2 | 1 | invalid flag, `0xFF` when the reading is untrustworthy |
//! | 3 | 2 | reserved |

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::error::FormatError;
use crate::types::TimestampPolicy;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 40;

/// Size of one packed record in bytes
pub const RECORD_SIZE: usize = 5;

/// Signature identifying an oximetry dump
pub const SIGNATURE: u16 = 0x0003;

/// Value of the record flag byte marking an invalid reading
pub const INVALID_MARKER: u8 = 0xFF;

/// Years the device clock can report
pub const YEAR_RANGE: std::ops::RangeInclusive<u16> = 2015..=2059;

const SIGNATURE_OFFSET: usize = 0;
const YEAR_OFFSET: usize = 2;
const MONTH_OFFSET: usize = 4;
const DAY_OFFSET: usize = 5;
const HOUR_OFFSET: usize = 6;
const MINUTE_OFFSET: usize = 7;
const SECOND_OFFSET: usize = 8;
const HEADER_SIZE_OFFSET: usize = 9;
const DURATION_OFFSET: usize = 13;

/// Parsed dump header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub signature: u16,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Header size as written by the device. Not used to locate records.
    pub header_size_declared: u16,
    /// Total recording duration in seconds
    pub duration_seconds: u16,
    /// Calendar start time exactly as stored
    pub start: NaiveDateTime,
    /// Policy used to derive `start_epoch_ms`
    pub timestamp_policy: TimestampPolicy,
    /// `start` converted under `timestamp_policy`
    pub start_epoch_ms: i64,
}

impl Header {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Parse a header, reading the start time as UTC.
    pub fn parse(buffer: &[u8]) -> Result<Self, FormatError> {
        Self::parse_with(buffer, TimestampPolicy::Utc)
    }

    /// Parse a header from the start of `buffer`.
    ///
    /// Only the first [`HEADER_SIZE`] bytes are inspected; anything after is ignored.
    pub fn parse_with(buffer: &[u8], policy: TimestampPolicy) -> Result<Self, FormatError> {
        trace!(buffer_len = buffer.len(), "Parsing dump header");

        let header: &[u8; HEADER_SIZE] = buffer
            .get(..HEADER_SIZE)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(FormatError::TooShort { len: buffer.len(), required: HEADER_SIZE })?;

        let signature = read_u16_le(header, SIGNATURE_OFFSET);
        if signature != SIGNATURE {
            return Err(FormatError::BadSignature { found: signature, expected: SIGNATURE });
        }

        let year = read_u16_le(header, YEAR_OFFSET);
        let month = header[MONTH_OFFSET];
        let day = header[DAY_OFFSET];
        let hour = header[HOUR_OFFSET];
        let minute = header[MINUTE_OFFSET];
        let second = header[SECOND_OFFSET];

        debug!(year, month, day, hour, minute, second, "Parsed recording start");

        let bad_timestamp = FormatError::BadTimestamp { year, month, day, hour, minute, second };
        let start = calendar_start(year, month, day, hour, minute, second)
            .ok_or_else(|| bad_timestamp.clone())?;
        let start_epoch_ms = policy.to_epoch_ms(start).ok_or(bad_timestamp)?;

        let header_size_declared = read_u16_le(header, HEADER_SIZE_OFFSET);
        let duration_seconds = read_u16_le(header, DURATION_OFFSET);

        debug!(
            header_size_declared,
            duration_seconds,
            start_epoch_ms,
            policy = %policy,
            "Parsed dump header"
        );

        Ok(Self {
            signature,
            year,
            month,
            day,
            hour,
            minute,
            second,
            header_size_declared,
            duration_seconds,
            start,
            timestamp_policy: policy,
            start_epoch_ms,
        })
    }
}

/// Validate the calendar fields and build the naive start time.
///
/// Fields must be inside the device's ranges and also form a real date, so a
/// February 30th is rejected.
fn calendar_start(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Option<NaiveDateTime> {
    let in_range = YEAR_RANGE.contains(&year)
        && (1..=12).contains(&month)
        && (1..=31).contains(&day)
        && hour <= 23
        && minute <= 59
        && second <= 59;
    if !in_range {
        return None;
    }

    NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())?.and_hms_opt(
        hour.into(),
        minute.into(),
        second.into(),
    )
}

fn read_u16_le(header: &[u8; HEADER_SIZE], offset: usize) -> u16 {
    u16::from_le_bytes([header[offset], header[offset + 1]])
}
