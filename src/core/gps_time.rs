//! Unix to GPS week time conversion

use crate::core::{GPS_EPOCH_UNIX_S, GPS_LEAP_SECONDS, SECONDS_PER_WEEK, WEEK_MS_GRANULARITY};
use serde::{Deserialize, Serialize};

/// GPS time as (week number, milliseconds into week)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpsTime {
    pub week: u16,
    pub week_ms: u32,
}

impl GpsTime {
    /// Convert Unix time in seconds to GPS week time.
    ///
    /// GPS time runs ahead of UTC by the leap second offset. Whole seconds are
    /// split into week and time-of-week; the sub-second part is floored to a
    /// 200 ms boundary. Times before the GPS epoch clamp to week 0.
    pub fn from_unix_seconds(unix_s: f64) -> Self {
        let epoch = (GPS_EPOCH_UNIX_S - GPS_LEAP_SECONDS) as f64;
        let gps_seconds = (unix_s - epoch).max(0.0) as i64;

        let week = gps_seconds / SECONDS_PER_WEEK;
        let sub_ms = ((unix_s * 1000.0) as i64).rem_euclid(1000);
        let week_ms = (gps_seconds % SECONDS_PER_WEEK) * 1000
            + (sub_ms / WEEK_MS_GRANULARITY) * WEEK_MS_GRANULARITY;

        Self {
            week: week.min(u16::MAX as i64) as u16,
            week_ms: week_ms as u32,
        }
    }

    /// Seconds elapsed since the GPS epoch (GPS timescale)
    pub fn total_seconds(&self) -> f64 {
        self.week as f64 * SECONDS_PER_WEEK as f64 + self.week_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gps_epoch() {
        let t = GpsTime::from_unix_seconds(GPS_EPOCH_UNIX_S as f64);
        assert_eq!(t.week, 0);
        // GPS is ahead of UTC by the leap seconds
        assert_eq!(t.week_ms, 18_000);
    }

    #[test]
    fn test_known_timestamp() {
        let t = GpsTime::from_unix_seconds(1_700_000_000.25);
        assert_eq!(t.week, 2288);
        assert_eq!(t.week_ms, 252_818_200);
    }

    #[test]
    fn test_sub_second_granularity() {
        let a = GpsTime::from_unix_seconds(1_700_000_000.0);
        let b = GpsTime::from_unix_seconds(1_700_000_000.199);
        let c = GpsTime::from_unix_seconds(1_700_000_000.9);
        assert_eq!(a, b);
        assert_eq!(c.week_ms - a.week_ms, 800);
    }

    #[test]
    fn test_week_rollover() {
        let epoch = (GPS_EPOCH_UNIX_S - GPS_LEAP_SECONDS) as f64;
        let t = GpsTime::from_unix_seconds(epoch + SECONDS_PER_WEEK as f64);
        assert_eq!(t.week, 1);
        assert_eq!(t.week_ms, 0);
        assert_eq!(t.total_seconds(), SECONDS_PER_WEEK as f64);
    }

    #[test]
    fn test_before_epoch_clamps() {
        let t = GpsTime::from_unix_seconds(0.0);
        assert_eq!(t.week, 0);
        assert_eq!(t.week_ms, 0);
    }
}
