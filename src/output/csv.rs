//! Delimited text writer

use std::io::{self, Write};

use super::{COLUMNS, SampleSink};
use crate::config::OutputOptions;
use crate::types::Sample;

/// Writes samples as delimited text rows.
///
/// Fields are quoted when `quote_all` is set or when a field contains the delimiter.
/// Embedded quotes are doubled.
pub struct CsvSink<W: Write> {
    writer: W,
    options: OutputOptions,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W, options: OutputOptions) -> Self {
        Self { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_row(&mut self, fields: &[&str]) -> io::Result<()> {
        let mut delimiter = [0u8; 4];
        let delimiter = self.options.delimiter.encode_utf8(&mut delimiter).as_bytes();

        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.writer.write_all(delimiter)?;
            }
            if self.options.quote_all || field.contains(self.options.delimiter) {
                write!(self.writer, "\"{}\"", field.replace('"', "\"\""))?;
            } else {
                self.writer.write_all(field.as_bytes())?;
            }
        }
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> SampleSink for CsvSink<W> {
    fn write_header(&mut self) -> io::Result<()> {
        self.write_row(&COLUMNS)
    }

    fn write_sample(&mut self, sample: &Sample) -> io::Result<()> {
        let timestamp = sample.timestamp_ms.to_string();
        let spo2 = sample.spo2.to_string();
        let heart_rate = sample.heart_rate.to_string();
        let valid = sample.valid_flag().to_string();
        self.write_row(&[timestamp.as_str(), spo2.as_str(), heart_rate.as_str(), valid.as_str()])
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
