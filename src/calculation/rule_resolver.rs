//! Pricing rule resolution.
//!
//! This module decides which pricing rule governs a given instant. Rules are
//! filtered to the active ones and ordered by priority once, into an immutable
//! [`RuleSet`], so that repeated lookups during partitioning never re-sort.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

use crate::models::{DayOfWeek, PricingRule};

/// The active pricing rules of a workplace in precedence order.
///
/// Rules are sorted ascending by `priority` with a stable sort, so rules that
/// share a priority keep their input order. Callers should keep priorities
/// unique; ties are resolved by input order only as a deterministic fallback.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::RuleSet;
/// use shift_pay_engine::models::{DayOfWeek, PricingRule, PricingRuleInput};
///
/// let rules: Vec<PricingRule> = serde_json::from_str::<Vec<PricingRuleInput>>(r#"[
///     { "name": "Weekend", "priority": 2, "days_of_week": ["sat", "sun"], "rate_cents": 3000 },
///     { "name": "Night", "priority": 1, "time_start": "20:00", "time_end": "08:00", "rate_multiplier": 1.25 }
/// ]"#)
/// .unwrap()
/// .into_iter()
/// .map(|r| PricingRule::try_from(r).unwrap())
/// .collect();
///
/// let rule_set = RuleSet::new(&rules);
/// assert_eq!(rule_set.resolve_at(DayOfWeek::Sat, 22 * 60).unwrap().name, "Night");
/// assert_eq!(rule_set.resolve_at(DayOfWeek::Sat, 12 * 60).unwrap().name, "Weekend");
/// assert!(rule_set.resolve_at(DayOfWeek::Mon, 12 * 60).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet<'a> {
    rules: Vec<&'a PricingRule>,
}

impl<'a> RuleSet<'a> {
    /// Builds the ordered set of active rules.
    pub fn new(rules: &'a [PricingRule]) -> Self {
        let mut active: Vec<&'a PricingRule> = rules.iter().filter(|r| r.is_active).collect();
        active.sort_by_key(|r| r.priority);
        Self { rules: active }
    }

    /// Returns true when no active rule exists.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of active rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Iterates the active rules in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &'a PricingRule> + '_ {
        self.rules.iter().copied()
    }

    /// Resolves the rule governing an instant, in the instant's own local calendar.
    ///
    /// Returns `None` when no active rule matches; the caller then falls back
    /// to the workplace base rate.
    pub fn resolve<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Option<&'a PricingRule> {
        let day = DayOfWeek::from(instant.weekday());
        let minute = instant.hour() * 60 + instant.minute();
        self.resolve_at(day, minute)
    }

    /// Resolves the rule governing a local weekday and minute of the day.
    pub fn resolve_at(&self, day: DayOfWeek, minute: u32) -> Option<&'a PricingRule> {
        self.iter().find(|rule| rule_matches(rule, day, minute))
    }
}

/// Resolves the rule governing an instant from an unordered rule list.
///
/// Convenience for one-off lookups; build a [`RuleSet`] when resolving many
/// instants against the same rules.
pub fn resolve_rule<'a, Tz: TimeZone>(
    rules: &'a [PricingRule],
    instant: &DateTime<Tz>,
) -> Option<&'a PricingRule> {
    RuleSet::new(rules).resolve(instant)
}

/// Returns true when the rule applies at the given local weekday and minute.
///
/// The rule's `specific_dates` are not consulted.
fn rule_matches(rule: &PricingRule, day: DayOfWeek, minute: u32) -> bool {
    if !rule.applies_on(day) {
        return false;
    }
    match rule.window() {
        Some(window) => window.contains(minute),
        None => true,
    }
}
