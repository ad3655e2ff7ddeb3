//! Shift partitioning into rate-homogeneous segments.
//!
//! A shift is cut at every instant where the governing rule could change
//! (local midnights and every rule's window boundaries on each day the shift
//! spans), each piece is resolved at its start instant, and adjacent pieces
//! governed by the same rule are merged back together.

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PricingRule, hours_in};

use super::rule_resolver::RuleSet;

/// A maximal sub-interval of a shift governed by a single rule (or the base rate).
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    /// Segment start (inclusive).
    pub start: DateTime<FixedOffset>,
    /// Segment end (exclusive).
    pub end: DateTime<FixedOffset>,
    /// The governing rule, `None` for the base rate.
    pub rule: Option<&'a PricingRule>,
    /// Duration in hours.
    pub hours: Decimal,
}

/// Partitions a shift into segments against an unordered rule list.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `end` is not after `start`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::partition_shift;
/// use shift_pay_engine::models::{PricingRule, PricingRuleInput};
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// let rules: Vec<PricingRule> = serde_json::from_str::<Vec<PricingRuleInput>>(r#"[
///     { "name": "Day", "priority": 1, "time_start": "08:00", "time_end": "20:00", "rate_cents": 2000 }
/// ]"#)
/// .unwrap()
/// .into_iter()
/// .map(|r| PricingRule::try_from(r).unwrap())
/// .collect();
///
/// // Monday 18:00 to 22:00
/// let segments = partition_shift(
///     DateTime::parse_from_rfc3339("2026-01-12T18:00:00+00:00").unwrap(),
///     DateTime::parse_from_rfc3339("2026-01-12T22:00:00+00:00").unwrap(),
///     &rules,
/// )
/// .unwrap();
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].rule.unwrap().name, "Day");
/// assert_eq!(segments[0].hours, Decimal::from(2));
/// assert!(segments[1].rule.is_none());
/// ```
pub fn partition_shift<'a>(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    rules: &'a [PricingRule],
) -> EngineResult<Vec<Segment<'a>>> {
    partition_with(&RuleSet::new(rules), start, end)
}

/// Partitions a shift into segments against a prepared [`RuleSet`].
///
/// The local calendar is the UTC offset of `start`; `end` is converted into it.
/// Segments are chronological, contiguous, and cover `[start, end)` exactly.
pub fn partition_with<'a>(
    rule_set: &RuleSet<'a>,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> EngineResult<Vec<Segment<'a>>> {
    let offset = *start.offset();
    let end = end.with_timezone(&offset);

    if end <= start {
        return Err(EngineError::InvalidInterval {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }

    let breakpoints = collect_breakpoints(rule_set, start, end);

    let mut segments: Vec<Segment<'a>> = Vec::new();
    for pair in breakpoints.windows(2) {
        let (piece_start, piece_end) = (pair[0], pair[1]);
        let rule = rule_set.resolve(&piece_start);

        if let Some(last) = segments.last_mut() {
            if same_resolution(last.rule, rule) {
                last.end = piece_end;
                last.hours = hours_in(piece_end - last.start);
                continue;
            }
        }

        segments.push(Segment {
            start: piece_start,
            end: piece_end,
            rule,
            hours: hours_in(piece_end - piece_start),
        });
    }

    debug!(
        pieces = breakpoints.len() - 1,
        segments = segments.len(),
        "Partitioned shift"
    );

    Ok(segments)
}

/// Collects the sorted, deduplicated cut points of `[start, end]`.
fn collect_breakpoints(
    rule_set: &RuleSet<'_>,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> Vec<DateTime<FixedOffset>> {
    let offset = *start.offset();

    let mut clock_times: BTreeSet<NaiveTime> =
        rule_set.iter().flat_map(|r| r.boundaries()).collect();
    clock_times.insert(NaiveTime::MIN);

    let mut points: BTreeSet<DateTime<FixedOffset>> = BTreeSet::new();
    points.insert(start);
    points.insert(end);

    let last_day = end.date_naive();
    let mut day = start.date_naive();
    loop {
        for clock in &clock_times {
            let Some(candidate) = offset.from_local_datetime(&day.and_time(*clock)).single() else {
                continue;
            };
            if candidate > start && candidate < end {
                points.insert(candidate);
            }
        }

        if day >= last_day {
            break;
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    points.into_iter().collect()
}

fn same_resolution(a: Option<&PricingRule>, b: Option<&PricingRule>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, PricingRuleInput};
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn instant(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn rule(json: &str) -> PricingRule {
        PricingRule::try_from(serde_json::from_str::<PricingRuleInput>(json).unwrap()).unwrap()
    }

    fn assert_covers(
        segments: &[Segment<'_>],
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) {
        assert_eq!(segments.first().unwrap().start, start);
        assert_eq!(segments.last().unwrap().end, end);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "Segments must be contiguous");
        }
    }

    // ==========================================================================
    // SP-001: Overnight rule spanning midnight yields one merged segment
    // ==========================================================================
    #[test]
    fn test_sp_001_overnight_rule_single_segment() {
        let rules = vec![rule(
            r#"{ "name": "Night", "priority": 1, "time_start": "20:00", "time_end": "08:00",
                 "days_of_week": ["mon","tue","wed","thu","fri","sat","sun"], "rate_multiplier": 1.25 }"#,
        )];
        let start = instant("2026-01-12T20:00:00+00:00");
        let end = instant("2026-01-13T08:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].rule.unwrap().name, "Night");
        assert_eq!(segments[0].hours, Decimal::from(12));
        assert_covers(&segments, start, end);
    }

    // ==========================================================================
    // SP-002: Day-restricted rule splits at local midnight
    // ==========================================================================
    #[test]
    fn test_sp_002_weekend_rule_splits_at_midnight() {
        let rules = vec![rule(
            r#"{ "name": "Weekend", "priority": 1, "days_of_week": ["sat","sun"], "rate_cents": 3000 }"#,
        )];
        // Friday 22:00 to Saturday 06:00 (2026-01-16 is a Friday)
        let start = instant("2026-01-16T22:00:00+00:00");
        let end = instant("2026-01-17T06:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].rule.is_none());
        assert_eq!(segments[0].hours, Decimal::from(2));
        assert_eq!(segments[1].rule.unwrap().name, "Weekend");
        assert_eq!(segments[1].start, instant("2026-01-17T00:00:00+00:00"));
        assert_eq!(segments[1].hours, Decimal::from(6));
    }

    // ==========================================================================
    // SP-003: Midnight without a rule change is merged away
    // ==========================================================================
    #[test]
    fn test_sp_003_midnight_merged_when_rule_unchanged() {
        let rules: Vec<PricingRule> = vec![];
        let start = instant("2026-01-12T22:00:00+00:00");
        let end = instant("2026-01-13T06:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].rule.is_none());
        assert_eq!(segments[0].hours, Decimal::from(8));
    }

    // ==========================================================================
    // SP-004: Invalid interval rejected before partitioning
    // ==========================================================================
    #[test]
    fn test_sp_004_end_before_start_rejected() {
        let rules: Vec<PricingRule> = vec![];
        let result = partition_shift(
            instant("2026-01-12T20:00:00+00:00"),
            instant("2026-01-12T08:00:00+00:00"),
            &rules,
        );
        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
    }

    #[test]
    fn test_zero_length_interval_rejected() {
        let rules: Vec<PricingRule> = vec![];
        let at = instant("2026-01-12T20:00:00+00:00");
        assert!(partition_shift(at, at, &rules).is_err());
    }

    #[test]
    fn test_day_and_night_rules_split_at_boundaries() {
        let rules = vec![
            rule(r#"{ "name": "Day", "priority": 2, "time_start": "08:00", "time_end": "20:00", "rate_cents": 2000 }"#),
            rule(r#"{ "name": "Night", "priority": 1, "time_start": "20:00", "time_end": "08:00", "rate_cents": 2500 }"#),
        ];
        // Monday 06:00 to Tuesday 10:00 (28 hours)
        let start = instant("2026-01-12T06:00:00+00:00");
        let end = instant("2026-01-13T10:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        let names: Vec<&str> = segments.iter().map(|s| s.rule.unwrap().name.as_str()).collect();
        assert_eq!(names, vec!["Night", "Day", "Night", "Day"]);

        let hours: Vec<Decimal> = segments.iter().map(|s| s.hours).collect();
        assert_eq!(
            hours,
            vec![
                Decimal::from(2),
                Decimal::from(12),
                Decimal::from(12),
                Decimal::from(2)
            ]
        );
        assert_covers(&segments, start, end);
    }

    #[test]
    fn test_end_in_other_offset_is_normalised() {
        let rules: Vec<PricingRule> = vec![];
        let start = instant("2026-01-12T20:00:00+01:00");
        let end = instant("2026-01-12T22:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].hours, Decimal::from(3));
        assert_eq!(segments[0].end.offset(), start.offset());
    }

    #[test]
    fn test_inactive_rule_boundaries_do_not_split() {
        let rules = vec![rule(
            r#"{ "name": "Off", "priority": 1, "time_start": "12:00", "time_end": "13:00",
                 "rate_cents": 9999, "is_active": false }"#,
        )];
        let start = instant("2026-01-12T09:00:00+00:00");
        let end = instant("2026-01-12T17:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].rule.is_none());
    }

    #[test]
    fn test_multi_day_shift_resolves_weekday_per_day() {
        let rules = vec![rule(
            r#"{ "name": "Sunday", "priority": 1, "days_of_week": ["sun"], "rate_multiplier": 2 }"#,
        )];
        // Saturday 12:00 to Monday 12:00 (2026-01-17 is a Saturday)
        let start = instant("2026-01-17T12:00:00+00:00");
        let end = instant("2026-01-19T12:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 3);
        assert!(segments[0].rule.is_none());
        assert_eq!(segments[1].rule.unwrap().days_of_week, vec![DayOfWeek::Sun]);
        assert_eq!(segments[1].hours, Decimal::from(24));
        assert!(segments[2].rule.is_none());
    }

    #[test]
    fn test_boundary_at_shift_start_not_duplicated() {
        let rules = vec![rule(
            r#"{ "name": "Evening", "priority": 1, "time_start": "18:00", "time_end": "23:00", "rate_cents": 2400 }"#,
        )];
        let start = instant("2026-01-12T18:00:00+00:00");
        let end = instant("2026-01-12T23:00:00+00:00");

        let segments = partition_shift(start, end, &rules).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].rule.unwrap().name, "Evening");
    }

    proptest! {
        #[test]
        fn prop_segments_cover_shift_exactly(
            start_minute in 0i64..(14 * 24 * 60),
            length_minutes in 1i64..(3 * 24 * 60),
            offset_hours in -12i32..=12,
            window_start in 0u32..24,
            window_end in 0u32..24,
        ) {
            let rules = vec![
                rule(&format!(
                    r#"{{ "name": "Window", "priority": 1, "time_start": "{:02}:00", "time_end": "{:02}:30", "rate_cents": 2500 }}"#,
                    window_start, window_end
                )),
                rule(r#"{ "name": "Weekend", "priority": 2, "days_of_week": ["sat","sun"], "rate_multiplier": 1.5 }"#),
            ];

            let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let epoch = offset.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
            let start = epoch + TimeDelta::minutes(start_minute);
            let end = start + TimeDelta::minutes(length_minutes);

            let segments = partition_shift(start, end, &rules).unwrap();

            prop_assert_eq!(segments.first().unwrap().start, start);
            prop_assert_eq!(segments.last().unwrap().end, end);
            let mut total = TimeDelta::zero();
            for segment in &segments {
                prop_assert!(segment.end > segment.start);
                total = total + (segment.end - segment.start);
            }
            prop_assert_eq!(total, end - start);
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert!(!same_resolution(pair[0].rule, pair[1].rule));
            }
        }

        #[test]
        fn prop_resolution_constant_within_segment(
            start_minute in 0i64..(7 * 24 * 60),
            length_minutes in 1i64..(2 * 24 * 60),
            probe in 0.0f64..1.0,
        ) {
            let rules = vec![
                rule(r#"{ "name": "Night", "priority": 1, "time_start": "22:00", "time_end": "06:00", "rate_cents": 3000 }"#),
                rule(r#"{ "name": "Sunday", "priority": 2, "days_of_week": ["sun"], "rate_cents": 4000 }"#),
            ];
            let set = RuleSet::new(&rules);

            let offset = FixedOffset::east_opt(0).unwrap();
            let epoch = offset.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
            let start = epoch + TimeDelta::minutes(start_minute);
            let end = start + TimeDelta::minutes(length_minutes);

            for segment in partition_with(&set, start, end).unwrap() {
                let span = (segment.end - segment.start).num_minutes();
                let at = segment.start + TimeDelta::minutes((span as f64 * probe) as i64);
                let at = if at >= segment.end { segment.start } else { at };
                prop_assert!(same_resolution(set.resolve(&at), segment.rule));
            }
        }
    }
}
