//! Synthetic dump construction for tests and benchmarks
//!
//! Real device captures are not redistributable, so tests build dumps byte by byte.
//! [`DumpBuilder`] starts from a valid header (2024-06-01 12:00:00, no records) and
//! lets each field be overridden, including into invalid values.

#![cfg(any(test, feature = "benchmark"))]

use crate::dump::format::{HEADER_SIZE, RECORD_SIZE, SIGNATURE};

/// One packed record: SpO2, heart rate, invalid flag, two reserved bytes
pub type RawRecord = [u8; RECORD_SIZE];

/// Builder for raw dump bytes.
#[derive(Debug, Clone)]
pub struct DumpBuilder {
    signature: u16,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    declared_header_size: u16,
    duration_seconds: u16,
    body: Vec<u8>,
}

impl Default for DumpBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self {
            signature: SIGNATURE,
            year: 2024,
            month: 6,
            day: 1,
            hour: 12,
            minute: 0,
            second: 0,
            declared_header_size: HEADER_SIZE as u16,
            duration_seconds: 0,
            body: Vec::new(),
        }
    }

    pub fn signature(mut self, signature: u16) -> Self {
        self.signature = signature;
        self
    }

    pub fn start(mut self, year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        self.year = year;
        self.month = month;
        self.day = day;
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    pub fn declared_header_size(mut self, size: u16) -> Self {
        self.declared_header_size = size;
        self
    }

    pub fn duration_seconds(mut self, seconds: u16) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Append records in order
    pub fn records(mut self, records: &[RawRecord]) -> Self {
        for record in records {
            self.body.extend_from_slice(record);
        }
        self
    }

    /// Append the same record `count` times
    pub fn repeat_record(mut self, record: RawRecord, count: usize) -> Self {
        for _ in 0..count {
            self.body.extend_from_slice(&record);
        }
        self
    }

    /// Append `pairs` double-sampled readings, cycling through `readings`.
    ///
    /// Each reading is written twice in a row, the way devices set to a 4 second
    /// interval store them.
    pub fn paired_records(mut self, readings: &[RawRecord], pairs: usize) -> Self {
        for record in readings.iter().cycle().take(pairs) {
            self.body.extend_from_slice(record);
            self.body.extend_from_slice(record);
        }
        self
    }

    /// Append raw bytes after the records, e.g. a partial record
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        bytes[0..2].copy_from_slice(&self.signature.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.year.to_le_bytes());
        bytes[4] = self.month;
        bytes[5] = self.day;
        bytes[6] = self.hour;
        bytes[7] = self.minute;
        bytes[8] = self.second;
        bytes[9..11].copy_from_slice(&self.declared_header_size.to_le_bytes());
        bytes[13..15].copy_from_slice(&self.duration_seconds.to_le_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dump_is_header_only() {
        let bytes = DumpBuilder::new().build();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..2], &[0x03, 0x00]);
        assert_eq!(&bytes[2..4], &2024u16.to_le_bytes());
    }

    #[test]
    fn paired_records_writes_each_reading_twice() {
        let bytes = DumpBuilder::new().paired_records(&[[1, 2, 3, 4, 5], [6, 7, 8, 9, 10]], 3).build();
        let body = &bytes[HEADER_SIZE..];
        assert_eq!(body.len(), 6 * RECORD_SIZE);
        assert_eq!(&body[0..5], &body[5..10]);
        assert_eq!(&body[10..15], &[6, 7, 8, 9, 10]);
        assert_eq!(&body[20..25], &[1, 2, 3, 4, 5]);
    }
}
