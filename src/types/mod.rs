//! Core value types shared by the decoder and the writers.
//!
//! - [`Sample`] is one decoded measurement
//! - [`Recording`] is a fully decoded dump: header, derived timing and samples
//! - [`TimestampPolicy`] decides how the header's naive start time maps to an epoch

mod recording;
mod sample;
mod timestamp_policy;

pub use recording::Recording;
pub use sample::Sample;
pub use timestamp_policy::TimestampPolicy;
