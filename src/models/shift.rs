//! Shift model.
//!
//! A shift is an absolute interval worked at one workplace. Instants carry an
//! explicit UTC offset; the offset of the start instant defines the local
//! calendar used to derive weekdays and times of day.

use chrono::{DateTime, FixedOffset, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a worked shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Identifier assigned by the owning system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The start instant of the shift.
    pub start_time: DateTime<FixedOffset>,
    /// The end instant of the shift; must be after the start.
    pub end_time: DateTime<FixedOffset>,
    /// Consultations performed during the shift.
    #[serde(default)]
    pub patients_seen: Option<u32>,
    /// Outside visits performed during the shift.
    #[serde(default)]
    pub outside_visits: Option<u32>,
}

impl Shift {
    /// Creates a shift with no consultation or visit counts.
    pub fn new(start_time: DateTime<FixedOffset>, end_time: DateTime<FixedOffset>) -> Self {
        Self {
            id: None,
            start_time,
            end_time,
            patients_seen: None,
            outside_visits: None,
        }
    }

    /// Returns the total duration of the shift in hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_pay_engine::models::Shift;
    /// use chrono::DateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = Shift::new(
    ///     DateTime::parse_from_rfc3339("2026-01-12T20:00:00+00:00").unwrap(),
    ///     DateTime::parse_from_rfc3339("2026-01-13T08:00:00+00:00").unwrap(),
    /// );
    /// assert_eq!(shift.duration_hours(), Decimal::from(12));
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        hours_in(self.end_time - self.start_time)
    }
}

/// Converts a duration to hours as an exact-as-possible decimal, without trailing zeros.
pub fn hours_in(duration: TimeDelta) -> Decimal {
    (seconds_in(duration) / Decimal::from(3600)).normalize()
}

/// Converts a duration to seconds, keeping sub-second precision.
pub fn seconds_in(duration: TimeDelta) -> Decimal {
    Decimal::from(duration.num_seconds()) + Decimal::new(i64::from(duration.subsec_nanos()), 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    /// SH-001: 8 hour shift
    #[test]
    fn test_8_hour_shift() {
        let shift = Shift::new(
            instant("2026-01-14T09:00:00+00:00"),
            instant("2026-01-14T17:00:00+00:00"),
        );
        assert_eq!(shift.duration_hours(), Decimal::from(8));
    }

    /// SH-002: 90 minute shift
    #[test]
    fn test_90_minute_shift() {
        let shift = Shift::new(
            instant("2026-01-14T09:00:00+01:00"),
            instant("2026-01-14T10:30:00+01:00"),
        );
        assert_eq!(shift.duration_hours(), Decimal::new(15, 1));
    }

    #[test]
    fn test_duration_ignores_offset_differences() {
        // Same instants written in different offsets
        let shift = Shift::new(
            instant("2026-01-14T09:00:00+01:00"),
            instant("2026-01-14T09:00:00+00:00"),
        );
        assert_eq!(shift.duration_hours(), Decimal::ONE);
    }

    #[test]
    fn test_hours_have_no_trailing_zeros() {
        assert_eq!(hours_in(TimeDelta::hours(12)).to_string(), "12");
        assert_eq!(hours_in(TimeDelta::minutes(90)).to_string(), "1.5");
    }

    #[test]
    fn test_seconds_keep_sub_second_precision() {
        let delta = TimeDelta::milliseconds(1500);
        assert_eq!(seconds_in(delta), Decimal::new(15, 1));
    }

    #[test]
    fn test_deserialize_shift() {
        let json = r#"{
            "start_time": "2026-01-12T20:00:00+00:00",
            "end_time": "2026-01-13T08:00:00+00:00",
            "patients_seen": 4
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.patients_seen, Some(4));
        assert_eq!(shift.outside_visits, None);
        assert_eq!(shift.duration_hours(), Decimal::from(12));
    }
}
