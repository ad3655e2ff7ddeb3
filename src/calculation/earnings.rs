//! Shift earnings calculation.
//!
//! This module prices a shift: it partitions the shift into rate-homogeneous
//! segments, prices each segment at its governing rule's effective hourly
//! rate, and adds the flat per-shift add-ons.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Cents, EarningSegment, PayModel, PricingRule, Shift, ShiftEarnings, Workplace, add_cents,
    round_to_cents, seconds_in,
};

use super::add_ons::calculate_add_ons;
use super::rule_resolver::RuleSet;
use super::segment_partition::{Segment, partition_with};

/// Returns the effective hourly rate in cents for a segment.
///
/// A flat rule pays its own rate, a multiplier rule pays the rounded multiple
/// of the base rate, and no rule pays the base rate.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::effective_rate_cents;
///
/// assert_eq!(effective_rate_cents(None, 2000).unwrap(), 2000);
/// ```
pub fn effective_rate_cents(
    rule: Option<&PricingRule>,
    base_rate_cents: Cents,
) -> EngineResult<Cents> {
    match rule {
        Some(rule) => rule.rate.hourly_cents(base_rate_cents),
        None => Ok(base_rate_cents),
    }
}

/// Calculates the earnings for a shift.
///
/// # Arguments
///
/// * `shift` - The worked shift
/// * `workplace` - The workplace the shift was worked at
/// * `rules` - The workplace's pricing rules, in any order
///
/// # Returns
///
/// The priced segments in chronological order, the add-ons and the totals.
/// Each segment amount is `rate_cents * exact_hours` rounded to the cent
/// independently; `base_total_cents` is the sum of the rounded amounts.
///
/// # Errors
///
/// * [`EngineError::InvalidInterval`] when the shift does not end after it starts
/// * [`EngineError::UnsupportedPayModel`] when the workplace is not paid hourly
/// * [`EngineError::AmountOverflow`] when a rate, amount or total does not fit in cents
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::calculate_shift_earnings;
/// use shift_pay_engine::models::{PricingRule, PricingRuleInput, Shift, Workplace};
/// use chrono::DateTime;
///
/// let rules: Vec<PricingRule> = serde_json::from_str::<Vec<PricingRuleInput>>(r#"[
///     { "name": "Night", "priority": 1, "time_start": "20:00", "time_end": "08:00",
///       "days_of_week": ["mon","tue","wed","thu","fri","sat","sun"], "rate_multiplier": 1.25 }
/// ]"#)
/// .unwrap()
/// .into_iter()
/// .map(|r| PricingRule::try_from(r).unwrap())
/// .collect();
///
/// // Monday 20:00 to Tuesday 08:00
/// let shift = Shift::new(
///     DateTime::parse_from_rfc3339("2026-01-12T20:00:00+00:00").unwrap(),
///     DateTime::parse_from_rfc3339("2026-01-13T08:00:00+00:00").unwrap(),
/// );
///
/// let earnings = calculate_shift_earnings(&shift, &Workplace::hourly(2000), &rules).unwrap();
/// assert_eq!(earnings.segments.len(), 1);
/// assert_eq!(earnings.segments[0].rate_cents, 2500);
/// assert_eq!(earnings.total_cents, 30000);
/// ```
pub fn calculate_shift_earnings(
    shift: &Shift,
    workplace: &Workplace,
    rules: &[PricingRule],
) -> EngineResult<ShiftEarnings> {
    if workplace.pay_model != PayModel::Hourly {
        return Err(EngineError::UnsupportedPayModel {
            pay_model: workplace.pay_model.to_string(),
        });
    }

    let rule_set = RuleSet::new(rules);
    let segments = partition_with(&rule_set, shift.start_time, shift.end_time)?;

    let priced = segments
        .iter()
        .map(|segment| price_segment(segment, workplace.base_rate_cents))
        .collect::<EngineResult<Vec<EarningSegment>>>()?;
    let base_total_cents = priced
        .iter()
        .try_fold(0, |total, s| add_cents("base_total_cents", total, s.amount_cents))?;

    let governing = segments.first().and_then(|s| s.rule);
    let (add_ons, warnings) = calculate_add_ons(shift, workplace, governing)?;
    let add_ons_total = add_ons
        .iter()
        .try_fold(0, |total, a| add_cents("add_ons_total_cents", total, a.amount_cents))?;
    let total_cents = add_cents("total_cents", base_total_cents, add_ons_total)?;

    debug!(
        segments = priced.len(),
        base_total_cents,
        add_ons_total,
        "Calculated shift earnings"
    );

    Ok(ShiftEarnings {
        segments: priced,
        base_total_cents,
        add_ons,
        total_cents,
        warnings,
    })
}

fn price_segment(segment: &Segment<'_>, base_rate_cents: Cents) -> EngineResult<EarningSegment> {
    let rate_cents = effective_rate_cents(segment.rule, base_rate_cents)?;
    let seconds = seconds_in(segment.end - segment.start);
    let rate_seconds = Decimal::from(rate_cents)
        .checked_mul(seconds)
        .ok_or_else(|| EngineError::AmountOverflow {
            field: "amount_cents".to_string(),
        })?;
    let amount_cents = round_to_cents("amount_cents", rate_seconds / Decimal::from(3600))?;

    Ok(EarningSegment {
        start: segment.start,
        end: segment.end,
        hours: segment.hours,
        rate_cents,
        amount_cents,
        rule_name: segment.rule.map(|r| r.name.clone()),
    })
}
