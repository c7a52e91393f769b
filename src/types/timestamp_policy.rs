//! Calendar-to-epoch conversion policy for recording start times

use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the naive wall-clock time stored in a dump header becomes an epoch instant.
///
/// Dumps carry no timezone. `Utc` reads the fields as UTC and is the default because it
/// gives the same output on every machine. `Local` binds to the host calendar, which is
/// what the device's companion software does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Interpret header fields as UTC
    #[default]
    Utc,

    /// Interpret header fields in the host's local timezone
    Local,
}

impl TimestampPolicy {
    /// Convert a naive start time to epoch milliseconds.
    ///
    /// Returns `None` when the local time does not exist (a DST gap). Ambiguous local
    /// times resolve to the earlier instant.
    pub fn to_epoch_ms(self, start: NaiveDateTime) -> Option<i64> {
        match self {
            TimestampPolicy::Utc => Some(start.and_utc().timestamp_millis()),
            TimestampPolicy::Local => {
                Local.from_local_datetime(&start).earliest().map(|dt| dt.timestamp_millis())
            }
        }
    }
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampPolicy::Utc => f.write_str("utc"),
            TimestampPolicy::Local => f.write_str("local"),
        }
    }
}

impl FromStr for TimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utc" => Ok(TimestampPolicy::Utc),
            "local" => Ok(TimestampPolicy::Local),
            other => Err(format!("unknown timestamp policy '{}', expected utc or local", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Datelike, NaiveDate, Timelike};

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn utc_conversion_is_deterministic() {
        let start = naive(2024, 6, 1, 12, 0, 0);
        assert_eq!(TimestampPolicy::Utc.to_epoch_ms(start), Some(1_717_243_200_000));
    }

    #[test]
    fn utc_conversion_round_trips_calendar_fields() {
        let start = naive(2024, 6, 1, 12, 0, 0);
        let epoch_ms = TimestampPolicy::Utc.to_epoch_ms(start).unwrap();
        let back = DateTime::from_timestamp_millis(epoch_ms).unwrap().naive_utc();

        assert_eq!(back.year(), 2024);
        assert_eq!(back.month(), 6);
        assert_eq!(back.day(), 1);
        assert_eq!(back.hour(), 12);
        assert_eq!(back.minute(), 0);
        assert_eq!(back.second(), 0);
    }

    #[test]
    fn local_conversion_round_trips_through_host_calendar() {
        // Noon in June is never inside a DST transition.
        let start = naive(2024, 6, 1, 12, 0, 0);
        let epoch_ms = TimestampPolicy::Local.to_epoch_ms(start).unwrap();
        let back = DateTime::from_timestamp_millis(epoch_ms)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(back, start);
    }

    #[test]
    fn parses_from_cli_strings() {
        assert_eq!("utc".parse::<TimestampPolicy>(), Ok(TimestampPolicy::Utc));
        assert_eq!("LOCAL".parse::<TimestampPolicy>(), Ok(TimestampPolicy::Local));
        assert!("gmt+1".parse::<TimestampPolicy>().is_err());
        assert_eq!(TimestampPolicy::default().to_string(), "utc");
    }
}
