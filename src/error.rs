//! Error types for dump decoding and conversion.
//!
//! Two layers are provided:
//!
//! - [`FormatError`] describes structural problems with a dump buffer. It is what the
//!   pure header parser and record decoder return, so the core can be embedded without
//!   dragging file-system concerns along.
//! - [`ViatomError`] wraps [`FormatError`] and adds the I/O, configuration and output
//!   failures that only appear once files are involved.
//!
//! Every failure is terminal for the file being converted. There is no retry path and
//! no partial output.
//!
//! ```rust
//! use viatom::{FormatError, ViatomError};
//!
//! let error: ViatomError = FormatError::EmptyRecording.into();
//! assert_eq!(error.kind(), "EmptyRecording");
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T, E = ViatomError> = std::result::Result<T, E>;

/// Structural errors found while decoding a dump buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Dump too short: {len} bytes, header needs {required}")]
    TooShort { len: usize, required: usize },

    #[error("Bad signature {found:#06x}, expected {expected:#06x}")]
    BadSignature { found: u16, expected: u16 },

    #[error(
        "Invalid recording timestamp {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
    )]
    BadTimestamp { year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8 },

    #[error("Recording contains no samples")]
    EmptyRecording,

    #[error("Cannot pair {count} records at 2000 ms resolution")]
    OddRecordCount { count: usize },
}

impl FormatError {
    /// Short name of the failure, used for one-line diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatError::TooShort { .. } => "TooShort",
            FormatError::BadSignature { .. } => "BadSignature",
            FormatError::BadTimestamp { .. } => "BadTimestamp",
            FormatError::EmptyRecording => "EmptyRecording",
            FormatError::OddRecordCount { .. } => "OddRecordCount",
        }
    }
}

/// Main error type for conversion operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ViatomError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Failed to read dump {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in {context}: {details}")]
    Config { context: String, details: String },

    #[error("Failed to serialize recording summary")]
    Summary {
        #[source]
        source: serde_yaml_ng::Error,
    },
}

impl ViatomError {
    /// Short name of the failure kind.
    ///
    /// Format errors report their own kind; everything touching the file system reports
    /// `IOFailure`.
    pub fn kind(&self) -> &'static str {
        match self {
            ViatomError::Format(inner) => inner.kind(),
            ViatomError::File { .. } | ViatomError::Output { .. } => "IOFailure",
            ViatomError::Config { .. } => "ConfigError",
            ViatomError::Summary { .. } => "SummaryError",
        }
    }

    /// Returns the format error if this is a decoding failure.
    pub fn as_format(&self) -> Option<&FormatError> {
        match self {
            ViatomError::Format(inner) => Some(inner),
            _ => None,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ViatomError::Format(FormatError::TooShort { .. }) => vec![
                "Check the file was copied from the device completely",
                "Verify the file is a Viatom oximetry dump",
            ],
            ViatomError::Format(FormatError::BadSignature { .. }) => vec![
                "Verify the file is a Viatom oximetry dump",
                "Other Viatom record types are not supported",
            ],
            ViatomError::Format(FormatError::BadTimestamp { .. }) => vec![
                "Check the device clock was set when recording",
                "Try --timezone utc if the local time does not exist",
            ],
            ViatomError::Format(FormatError::EmptyRecording) => {
                vec!["The recording holds no samples; record for longer on the device"]
            }
            ViatomError::Format(FormatError::OddRecordCount { .. }) => vec![
                "Re-run with --no-dedup to keep every record",
                "Check the dump was not truncated",
            ],
            ViatomError::File { .. } => {
                vec!["Check the input file exists and is readable", "Check file permissions"]
            }
            ViatomError::Output { .. } => vec![
                "Check the output directory exists and is writable",
                "Ensure sufficient disk space",
            ],
            ViatomError::Config { .. } => {
                vec!["Check the configuration file syntax", "Check command line flag values"]
            }
            ViatomError::Summary { .. } => vec!["Check the summary path is writable"],
        }
    }

    /// Helper constructor for input file errors with path context.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViatomError::File { path: path.into(), source }
    }

    /// Helper constructor for output file errors with path context.
    pub fn output_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ViatomError::Output { path: path.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        ViatomError::Config { context: context.into(), details: details.into() }
    }
}

impl From<serde_yaml_ng::Error> for ViatomError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        ViatomError::Summary { source: err }
    }
}
