//! Decoded oximetry samples

use serde::{Deserialize, Serialize};

/// One decoded measurement.
///
/// `spo2` and `heart_rate` are the raw device bytes; no unit conversion or range
/// clamping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Absolute sample time in epoch milliseconds
    pub timestamp_ms: i64,
    /// Blood oxygen saturation, raw device value
    pub spo2: u8,
    /// Pulse rate, raw device value
    pub heart_rate: u8,
    /// False when the device flagged the oximetry reading as untrustworthy
    pub valid: bool,
}

impl Sample {
    /// Whether two samples carry the same reading, ignoring their timestamps.
    pub fn same_reading(&self, other: &Sample) -> bool {
        self.spo2 == other.spo2 && self.heart_rate == other.heart_rate && self.valid == other.valid
    }

    /// `valid` rendered the way the tabular output expects it.
    pub fn valid_flag(&self) -> u8 {
        u8::from(self.valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_reading_ignores_timestamp() {
        let a = Sample { timestamp_ms: 0, spo2: 97, heart_rate: 60, valid: true };
        let b = Sample { timestamp_ms: 2000, ..a };
        assert!(a.same_reading(&b));

        let c = Sample { valid: false, ..b };
        assert!(!a.same_reading(&c));
        assert_eq!(c.valid_flag(), 0);
        assert_eq!(a.valid_flag(), 1);
    }
}
