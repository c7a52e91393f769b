//! Dump file reader
//!
//! Loads a whole dump into memory and runs the header parser and record decoder over
//! it. The file handle is released as soon as the bytes are read, before any decoding
//! happens.
//!
//! ```rust,no_run
//! use viatom::{DecodeOptions, RecordingReader};
//!
//! fn convert() -> viatom::Result<()> {
//!     let reader = RecordingReader::new(DecodeOptions::default());
//!     let recording = reader.open("O2Ring_20240601.dat")?;
//!     println!("{} samples every {} ms", recording.len(), recording.effective_resolution_ms);
//!     Ok(())
//! }
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use super::decoder::decode_with;
use super::format::{HEADER_SIZE, Header};
use crate::config::DecodeOptions;
use crate::types::Recording;
use crate::{Result, ViatomError};

/// Reads and decodes dump files.
#[derive(Debug, Clone, Default)]
pub struct RecordingReader {
    options: DecodeOptions,
}

impl RecordingReader {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Read and decode a dump file.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Recording> {
        let path = path.as_ref();
        info!("Opening dump: {}", path.display());

        let data = read_all(path)?;
        self.decode_bytes(&data)
    }

    /// Decode a dump already held in memory.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<Recording> {
        let header = Header::parse_with(data, self.options.timestamps)?;

        if usize::from(header.header_size_declared) != HEADER_SIZE {
            warn!(
                "Header declares {} bytes, records are read from offset {}",
                header.header_size_declared, HEADER_SIZE
            );
        }

        let recording = decode_with(&data[HEADER_SIZE..], &header, &self.options)?;

        if recording.trailing_bytes > 0 {
            warn!(
                "Ignoring {} trailing bytes after record {}",
                recording.trailing_bytes, recording.record_count
            );
        }

        info!(
            samples = recording.len(),
            records = recording.record_count,
            resolution_ms = recording.effective_resolution_ms,
            deduplicated = recording.deduplicated,
            "Decoded recording starting {}",
            header.start
        );

        Ok(recording)
    }
}

fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| ViatomError::file_error(path, e))?;

    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(|e| ViatomError::file_error(path, e))?;
    Ok(data)
}
