//! Viatom oximetry dump decoding
//!
//! - [`format`] holds the byte layout and the header parser
//! - [`decoder`] turns records into samples and applies the double-sampling correction
//! - [`reader`] ties both together for files and in-memory buffers

pub mod decoder;
pub mod format;
pub mod reader;

pub use decoder::{Deduplication, decode, decode_with, deduplicate};
pub use format::Header;
pub use reader::RecordingReader;
