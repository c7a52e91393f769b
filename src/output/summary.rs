//! Recording summary as YAML

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use super::StagedFile;
use crate::Result;
use crate::types::{Recording, TimestampPolicy};

/// Metadata about a decoded recording, for logging next to the sample table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSummary {
    /// Start time as stored in the header, ISO 8601 without offset
    pub start: String,
    pub timestamp_policy: TimestampPolicy,
    pub start_epoch_ms: i64,
    /// Timestamp of the last sample, if any
    pub end_epoch_ms: Option<i64>,
    pub duration_seconds: u16,
    pub declared_header_size: u16,
    pub record_count: usize,
    pub resolution_ms: u64,
    pub effective_resolution_ms: u64,
    pub deduplicated: bool,
    pub trailing_bytes: usize,
    pub sample_count: usize,
    pub invalid_sample_count: usize,
}

impl RecordingSummary {
    pub fn from_recording(recording: &Recording) -> Self {
        let header = &recording.header;
        Self {
            start: header.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            timestamp_policy: header.timestamp_policy,
            start_epoch_ms: header.start_epoch_ms,
            end_epoch_ms: recording.samples.last().map(|s| s.timestamp_ms),
            duration_seconds: header.duration_seconds,
            declared_header_size: header.header_size_declared,
            record_count: recording.record_count,
            resolution_ms: recording.resolution_ms,
            effective_resolution_ms: recording.effective_resolution_ms,
            deduplicated: recording.deduplicated,
            trailing_bytes: recording.trailing_bytes,
            sample_count: recording.len(),
            invalid_sample_count: recording.invalid_count(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

/// Render the summary of `recording` as YAML into a staged file for `path`.
pub fn stage_summary_file<P: AsRef<Path>>(path: P, recording: &Recording) -> Result<StagedFile> {
    let yaml = RecordingSummary::from_recording(recording).to_yaml()?;
    StagedFile::write_with(path, |writer| writer.write_all(yaml.as_bytes()))
}

/// Write the summary of `recording` to `path` as YAML.
pub fn write_summary_file<P: AsRef<Path>>(path: P, recording: &Recording) -> Result<()> {
    stage_summary_file(path, recording)?.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingReader;
    use crate::test_utils::DumpBuilder;

    fn summary() -> RecordingSummary {
        let bytes = DumpBuilder::new()
            .duration_seconds(40)
            .paired_records(&[[97, 61, 0, 0, 0], [0, 0, 0xFF, 0, 0]], 10)
            .trailing(&[1])
            .build();
        let recording = RecordingReader::default().decode_bytes(&bytes).unwrap();
        RecordingSummary::from_recording(&recording)
    }

    #[test]
    fn summary_reflects_decoding() {
        let summary = summary();
        assert_eq!(summary.start, "2024-06-01T12:00:00");
        assert_eq!(summary.timestamp_policy, TimestampPolicy::Utc);
        assert_eq!(summary.record_count, 20);
        assert_eq!(summary.resolution_ms, 2000);
        assert_eq!(summary.effective_resolution_ms, 4000);
        assert!(summary.deduplicated);
        assert_eq!(summary.trailing_bytes, 1);
        assert_eq!(summary.sample_count, 10);
        assert_eq!(summary.invalid_sample_count, 5);
        assert_eq!(summary.end_epoch_ms, Some(1_717_243_200_000 + 9 * 4000));
    }

    #[test]
    fn yaml_round_trips() {
        let summary = summary();
        let yaml = summary.to_yaml().unwrap();
        assert!(yaml.contains("timestamp_policy: utc"));
        assert!(yaml.contains("deduplicated: true"));

        let parsed: RecordingSummary = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn summary_file_is_published_whole() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let bytes = DumpBuilder::new().duration_seconds(8).repeat_record([95, 70, 0, 0, 0], 2).build();
        let recording = RecordingReader::default().decode_bytes(&bytes)?;

        let path = dir.path().join("night.yaml");
        write_summary_file(&path, &recording)?;
        assert!(std::fs::read_to_string(&path)?.contains("sample_count: 2"));

        let missing = dir.path().join("missing").join("night.yaml");
        let error = write_summary_file(&missing, &recording).unwrap_err();
        assert_eq!(error.kind(), "IOFailure");
        assert!(!missing.exists());
        Ok(())
    }
}
