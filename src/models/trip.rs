//! Trip length model
//!
//! Nights are derived from the requested date range when both ends are
//! known, otherwise from the number of itinerary days, otherwise from a
//! configured fallback. The result is never below one night, so it can
//! always be used as a divisor.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Fallback used when neither dates nor itinerary days are available
pub const DEFAULT_FALLBACK_NIGHTS: u32 = 7;

/// Number of nights in a trip, at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripLength(u32);

impl TripLength {
    /// Build from a raw night count, clamping zero and negatives to 1
    #[must_use]
    pub fn from_nights(nights: i64) -> Self {
        Self(u32::try_from(nights.max(1)).unwrap_or(u32::MAX))
    }

    /// Whole days between two instants, partial days rounded up
    #[must_use]
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let seconds = (end - start).num_seconds();
        let days = if seconds > 0 {
            (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
        } else {
            0
        };
        Self::from_nights(days)
    }

    /// Derive the trip length from whatever the request and itinerary provide
    #[must_use]
    pub fn derive(
        start_date: Option<&str>,
        end_date: Option<&str>,
        day_count: Option<usize>,
        fallback: u32,
    ) -> Self {
        if let (Some(start), Some(end)) = (
            start_date.and_then(parse_trip_date),
            end_date.and_then(parse_trip_date),
        ) {
            return Self::between(start, end);
        }

        match day_count {
            Some(days) if days > 0 => Self::from_nights(i64::try_from(days).unwrap_or(i64::MAX)),
            _ => Self::from_nights(i64::from(fallback)),
        }
    }

    /// Number of nights
    #[must_use]
    pub fn nights(self) -> u32 {
        self.0
    }

    /// Nights as a floating-point divisor
    #[must_use]
    pub fn as_divisor(self) -> f64 {
        f64::from(self.0)
    }
}

impl std::fmt::Display for TripLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 1 {
            write!(f, "1 night")
        } else {
            write!(f, "{} nights", self.0)
        }
    }
}

/// Parse a trip date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps are normalized to UTC.
#[must_use]
pub fn parse_trip_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(6, 6)]
    #[case(1, 1)]
    #[case(0, 1)]
    #[case(-3, 1)]
    fn test_from_nights_clamps(#[case] raw: i64, #[case] expected: u32) {
        assert_eq!(TripLength::from_nights(raw).nights(), expected);
    }

    #[rstest]
    #[case("2025-07-01", "2025-07-07", 6)]
    #[case("2025-07-01T10:00:00Z", "2025-07-03T09:00:00Z", 2)]
    #[case("2025-07-01T10:00:00Z", "2025-07-03T11:00:00Z", 3)]
    #[case("2025-07-01T22:00:00-07:00", "2025-07-03", 1)]
    #[case("2025-07-07", "2025-07-01", 1)]
    #[case("2025-07-01", "2025-07-01", 1)]
    fn test_derive_from_dates(#[case] start: &str, #[case] end: &str, #[case] expected: u32) {
        let length = TripLength::derive(Some(start), Some(end), Some(10), DEFAULT_FALLBACK_NIGHTS);
        assert_eq!(length.nights(), expected);
    }

    #[test]
    fn test_derive_falls_back_to_day_count() {
        let length = TripLength::derive(Some("2025-07-01"), None, Some(4), DEFAULT_FALLBACK_NIGHTS);
        assert_eq!(length.nights(), 4);

        let length = TripLength::derive(Some("not a date"), Some("2025-07-05"), Some(3), 7);
        assert_eq!(length.nights(), 3);
    }

    #[test]
    fn test_derive_falls_back_to_configured_default() {
        assert_eq!(TripLength::derive(None, None, None, 7).nights(), 7);
        assert_eq!(TripLength::derive(None, None, Some(0), 5).nights(), 5);
        assert_eq!(TripLength::derive(None, None, None, 0).nights(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(TripLength::from_nights(1).to_string(), "1 night");
        assert_eq!(TripLength::from_nights(6).to_string(), "6 nights");
    }
}
