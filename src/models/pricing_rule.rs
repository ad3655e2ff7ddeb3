//! Pricing rule model and related types.
//!
//! A pricing rule maps a weekday/time-of-day window to an hourly rate for one
//! workplace. Rules arrive in their stored wire form ([`PricingRuleInput`]) and
//! are validated into [`PricingRule`] before the resolver ever sees them.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::money::{Cents, multiply_to_cents};

/// A weekday tag as stored on pricing rules.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::DayOfWeek;
/// use chrono::Weekday;
///
/// assert_eq!(DayOfWeek::from(Weekday::Sat), DayOfWeek::Sat);
/// assert_eq!(DayOfWeek::Sat.to_string(), "sat");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// Returns the short lowercase tag (`mon`..`sun`).
    pub fn as_str(self) -> &'static str {
        match self {
            DayOfWeek::Mon => "mon",
            DayOfWeek::Tue => "tue",
            DayOfWeek::Wed => "wed",
            DayOfWeek::Thu => "thu",
            DayOfWeek::Fri => "fri",
            DayOfWeek::Sat => "sat",
            DayOfWeek::Sun => "sun",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
            Weekday::Sun => DayOfWeek::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The hourly rate a rule pays: either a flat amount or a multiple of the
/// workplace base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rate {
    /// A flat hourly amount in cents.
    Flat(Cents),
    /// A positive factor applied to the workplace base rate.
    Multiplier(Decimal),
}

impl Rate {
    /// Returns the effective hourly rate in cents against the given base rate.
    ///
    /// Multiplied rates are rounded to the cent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] when a multiplied rate does not
    /// fit in [`Cents`].
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay_engine::models::Rate;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Rate::Multiplier(Decimal::new(15, 1)).hourly_cents(2000).unwrap(), 3000);
    /// assert_eq!(Rate::Flat(4500).hourly_cents(2000).unwrap(), 4500);
    /// ```
    pub fn hourly_cents(&self, base_rate_cents: Cents) -> EngineResult<Cents> {
        match self {
            Rate::Flat(cents) => Ok(*cents),
            Rate::Multiplier(factor) => {
                multiply_to_cents("rate_multiplier", Decimal::from(base_rate_cents), *factor)
            }
        }
    }
}

/// A wall-clock window with minute resolution.
///
/// A window whose start is after its end wraps past midnight (overnight).
/// A window whose start equals its end covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Window start (inclusive).
    pub start: NaiveTime,
    /// Window end (exclusive).
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Returns true when the window wraps past midnight.
    pub fn is_overnight(&self) -> bool {
        minute_of_day(self.start) > minute_of_day(self.end)
    }

    /// Returns true when the given minute of the day (0..1440) lies inside the window.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_pay_engine::models::TimeWindow;
    /// use chrono::NaiveTime;
    ///
    /// let night = TimeWindow {
    ///     start: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
    ///     end: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    /// };
    /// assert!(night.contains(23 * 60 + 59));
    /// assert!(night.contains(0));
    /// assert!(!night.contains(8 * 60));
    /// ```
    pub fn contains(&self, minute: u32) -> bool {
        let start = minute_of_day(self.start);
        let end = minute_of_day(self.end);

        if start == end {
            return true;
        }
        if start < end {
            start <= minute && minute < end
        } else {
            minute >= start || minute < end
        }
    }
}

/// Returns the minute of the day (0..1440) for a wall-clock time, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// A validated pricing rule.
///
/// Construct it from a [`PricingRuleInput`] with `TryFrom`, which rejects a rule
/// that sets both or neither of `rate_cents` and `rate_multiplier`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRule {
    /// Identifier assigned by the owning system, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Lower value wins when several rules match the same instant.
    pub priority: i32,
    /// Window start, if set.
    #[serde(with = "clock_time")]
    pub time_start: Option<NaiveTime>,
    /// Window end, if set.
    #[serde(with = "clock_time")]
    pub time_end: Option<NaiveTime>,
    /// Days the rule applies to; empty means every day.
    pub days_of_week: Vec<DayOfWeek>,
    /// Reserved calendar dates. Carried through, never matched on.
    pub specific_dates: Vec<NaiveDate>,
    /// The hourly rate.
    pub rate: Rate,
    /// Flat amount per consultation, if the rule pays one.
    pub consultation_rate_cents: Option<Cents>,
    /// Flat amount per outside visit, if the rule pays one.
    pub outside_visit_rate_cents: Option<Cents>,
    /// Inactive rules never match.
    pub is_active: bool,
}

impl PricingRule {
    /// Returns the time window when both ends are set.
    ///
    /// A rule with neither or only one end set has no time restriction.
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => Some(TimeWindow { start, end }),
            _ => None,
        }
    }

    /// Returns true when the rule applies on the given day.
    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        self.days_of_week.is_empty() || self.days_of_week.contains(&day)
    }

    /// Returns the wall-clock times at which this rule can start or stop applying.
    pub fn boundaries(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.time_start.into_iter().chain(self.time_end)
    }
}

/// A pricing rule in its stored form, with the rate split over two optional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRuleInput {
    /// Identifier assigned by the owning system.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Lower value wins.
    #[serde(default)]
    pub priority: i32,
    /// Window start in `HH:MM`.
    #[serde(default, with = "clock_time")]
    pub time_start: Option<NaiveTime>,
    /// Window end in `HH:MM`.
    #[serde(default, with = "clock_time")]
    pub time_end: Option<NaiveTime>,
    /// Days the rule applies to.
    #[serde(default)]
    pub days_of_week: Option<Vec<DayOfWeek>>,
    /// Reserved calendar dates.
    #[serde(default)]
    pub specific_dates: Option<Vec<NaiveDate>>,
    /// Flat hourly rate in cents.
    #[serde(default)]
    pub rate_cents: Option<Cents>,
    /// Multiplier of the workplace base rate.
    #[serde(default)]
    pub rate_multiplier: Option<Decimal>,
    /// Flat amount per consultation.
    #[serde(default)]
    pub consultation_rate_cents: Option<Cents>,
    /// Flat amount per outside visit.
    #[serde(default)]
    pub outside_visit_rate_cents: Option<Cents>,
    /// Whether the rule is in effect.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TryFrom<PricingRuleInput> for PricingRule {
    type Error = EngineError;

    fn try_from(input: PricingRuleInput) -> EngineResult<Self> {
        let invalid = |message: &str| EngineError::InvalidRuleConfiguration {
            rule: input.name.clone(),
            message: message.to_string(),
        };

        if input.name.trim().is_empty() {
            return Err(invalid("rule name is required"));
        }

        let rate = match (input.rate_cents, input.rate_multiplier) {
            (Some(cents), None) if cents < 0 => {
                return Err(invalid("rate_cents must not be negative"));
            }
            (Some(cents), None) => Rate::Flat(cents),
            (None, Some(factor)) if factor <= Decimal::ZERO => {
                return Err(invalid("rate_multiplier must be positive"));
            }
            (None, Some(factor)) => Rate::Multiplier(factor),
            _ => {
                return Err(invalid(
                    "must set either rate_cents or rate_multiplier, not both",
                ));
            }
        };

        if input.consultation_rate_cents.is_some_and(|c| c < 0) {
            return Err(invalid("consultation_rate_cents must not be negative"));
        }
        if input.outside_visit_rate_cents.is_some_and(|c| c < 0) {
            return Err(invalid("outside_visit_rate_cents must not be negative"));
        }

        Ok(PricingRule {
            id: input.id,
            name: input.name,
            priority: input.priority,
            time_start: input.time_start,
            time_end: input.time_end,
            days_of_week: input.days_of_week.unwrap_or_default(),
            specific_dates: input.specific_dates.unwrap_or_default(),
            rate,
            consultation_rate_cents: input.consultation_rate_cents,
            outside_visit_rate_cents: input.outside_visit_rate_cents,
            is_active: input.is_active,
        })
    }
}

/// Serde support for optional `HH:MM` wall-clock times.
///
/// Accepts `HH:MM` and `HH:MM:SS`; seconds are dropped.
mod clock_time {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => s.serialize_str(&time.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let parsed = NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| D::Error::custom(format!("invalid time '{}', use HH:MM", raw)))?;
        Ok(parsed.with_second(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn input(name: &str) -> PricingRuleInput {
        PricingRuleInput {
            id: None,
            name: name.to_string(),
            priority: 1,
            time_start: None,
            time_end: None,
            days_of_week: None,
            specific_dates: None,
            rate_cents: None,
            rate_multiplier: None,
            consultation_rate_cents: None,
            outside_visit_rate_cents: None,
            is_active: true,
        }
    }

    // ==========================================================================
    // PR-001: Overnight window boundaries
    // ==========================================================================
    #[test]
    fn test_pr_001_overnight_window_boundaries() {
        let night = TimeWindow {
            start: time(20, 0),
            end: time(8, 0),
        };
        assert!(night.is_overnight());
        assert!(night.contains(23 * 60 + 59));
        assert!(night.contains(0));
        assert!(night.contains(7 * 60 + 59));
        assert!(!night.contains(8 * 60));
        assert!(!night.contains(19 * 60 + 59));
        assert!(night.contains(20 * 60));
    }

    // ==========================================================================
    // PR-002: Normal window is half-open
    // ==========================================================================
    #[test]
    fn test_pr_002_normal_window_half_open() {
        let day = TimeWindow {
            start: time(8, 0),
            end: time(20, 0),
        };
        assert!(!day.is_overnight());
        assert!(day.contains(8 * 60));
        assert!(day.contains(19 * 60 + 59));
        assert!(!day.contains(20 * 60));
        assert!(!day.contains(7 * 60 + 59));
    }

    // ==========================================================================
    // PR-003: Zero-width window covers the whole day
    // ==========================================================================
    #[test]
    fn test_pr_003_zero_width_window_matches_everything() {
        let window = TimeWindow {
            start: time(9, 0),
            end: time(9, 0),
        };
        assert!(window.contains(0));
        assert!(window.contains(9 * 60));
        assert!(window.contains(1439));
    }

    #[test]
    fn test_flat_rate_rule_validates() {
        let mut raw = input("Weekend");
        raw.rate_cents = Some(4500);
        let rule = PricingRule::try_from(raw).unwrap();
        assert_eq!(rule.rate, Rate::Flat(4500));
        assert!(rule.days_of_week.is_empty());
    }

    #[test]
    fn test_multiplier_rule_validates() {
        let mut raw = input("Night");
        raw.rate_multiplier = Some(Decimal::new(125, 2));
        let rule = PricingRule::try_from(raw).unwrap();
        assert_eq!(rule.rate, Rate::Multiplier(Decimal::new(125, 2)));
    }

    #[test]
    fn test_both_rates_rejected() {
        let mut raw = input("Both");
        raw.rate_cents = Some(1000);
        raw.rate_multiplier = Some(Decimal::ONE);
        match PricingRule::try_from(raw) {
            Err(EngineError::InvalidRuleConfiguration { rule, message }) => {
                assert_eq!(rule, "Both");
                assert!(message.contains("not both"));
            }
            other => panic!("Expected InvalidRuleConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_neither_rate_rejected() {
        let result = PricingRule::try_from(input("Neither"));
        assert!(matches!(
            result,
            Err(EngineError::InvalidRuleConfiguration { .. })
        ));
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let mut raw = input("Zero");
        raw.rate_multiplier = Some(Decimal::ZERO);
        assert!(PricingRule::try_from(raw).is_err());
    }

    #[test]
    fn test_negative_add_on_rate_rejected() {
        let mut raw = input("Consults");
        raw.rate_cents = Some(2000);
        raw.consultation_rate_cents = Some(-1);
        assert!(PricingRule::try_from(raw).is_err());
    }

    #[test]
    fn test_half_set_window_has_no_restriction() {
        let mut raw = input("Evening");
        raw.rate_cents = Some(2000);
        raw.time_start = Some(time(18, 0));
        let rule = PricingRule::try_from(raw).unwrap();
        assert!(rule.window().is_none());
        assert_eq!(rule.boundaries().collect::<Vec<_>>(), vec![time(18, 0)]);
    }

    #[test]
    fn test_multiplier_hourly_rate() {
        assert_eq!(Rate::Multiplier(Decimal::new(15, 1)).hourly_cents(2000).unwrap(), 3000);
        // 1333 * 1.5 = 1999.5 rounds away from zero
        assert_eq!(Rate::Multiplier(Decimal::new(15, 1)).hourly_cents(1333).unwrap(), 2000);
    }

    #[test]
    fn test_huge_multiplier_overflows_instead_of_panicking() {
        let factor = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        match Rate::Multiplier(factor).hourly_cents(1_000_000_000) {
            Err(EngineError::AmountOverflow { field }) => assert_eq!(field, "rate_multiplier"),
            other => panic!("Expected AmountOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_stored_rule() {
        let json = r#"{
            "name": "Night",
            "priority": 1,
            "time_start": "20:00",
            "time_end": "08:00",
            "days_of_week": ["mon", "tue", "wed", "thu", "fri", "sat", "sun"],
            "rate_multiplier": 1.25
        }"#;

        let raw: PricingRuleInput = serde_json::from_str(json).unwrap();
        assert!(raw.is_active);
        assert_eq!(raw.time_start, Some(time(20, 0)));
        assert_eq!(raw.days_of_week.as_ref().map(Vec::len), Some(7));

        let rule = PricingRule::try_from(raw).unwrap();
        let window = rule.window().unwrap();
        assert!(window.is_overnight());
    }

    #[test]
    fn test_invalid_clock_time_rejected() {
        let json = r#"{ "name": "Bad", "time_start": "8pm", "rate_cents": 100 }"#;
        let result: Result<PricingRuleInput, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_serializes_times_as_hh_mm() {
        let mut raw = input("Night");
        raw.rate_cents = Some(2500);
        raw.time_start = Some(time(20, 0));
        raw.time_end = Some(time(8, 0));
        let rule = PricingRule::try_from(raw).unwrap();

        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("\"time_start\":\"20:00\""));
        assert!(json.contains("\"rate\":{\"flat\":2500}"));
    }

    #[test]
    fn test_day_of_week_serialization() {
        let json = serde_json::to_string(&DayOfWeek::Wed).unwrap();
        assert_eq!(json, "\"wed\"");
        let day: DayOfWeek = serde_json::from_str("\"sun\"").unwrap();
        assert_eq!(day, DayOfWeek::Sun);
    }
}
