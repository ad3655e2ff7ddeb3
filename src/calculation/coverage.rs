//! Weekly pricing matrix.
//!
//! Previews a workplace's rules as a 7×24 grid: one cell per weekday and hour,
//! resolved at the start of the hour slot.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Cents, DayOfWeek, PricingRule};

use super::earnings::effective_rate_cents;
use super::rule_resolver::RuleSet;

/// Number of hour slots in a week.
pub const HOURS_PER_WEEK: u32 = 168;

/// One hour slot of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    /// The weekday.
    pub day: DayOfWeek,
    /// The hour of the day, 0..24.
    pub hour: u32,
    /// The rule governing the slot start, `None` for the base rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    /// Effective hourly rate in cents.
    pub rate_cents: Cents,
}

/// The weekly grid and how much of it the rules cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingMatrix {
    /// Cells ordered Monday 00:00 to Sunday 23:00.
    pub cells: Vec<MatrixCell>,
    /// Slots governed by a rule.
    pub covered: u32,
    /// Total slots, always 168.
    pub total: u32,
    /// `covered / total` as a whole percentage.
    pub coverage_percent: u32,
    /// The base rate unmatched slots fall back to.
    pub base_rate_cents: Cents,
}

impl PricingMatrix {
    /// Returns the cell for a weekday and hour.
    pub fn cell(&self, day: DayOfWeek, hour: u32) -> Option<&MatrixCell> {
        self.cells.iter().find(|c| c.day == day && c.hour == hour)
    }
}

/// Builds the weekly pricing matrix for a rule list.
///
/// Fails with [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when a multiplied rate does not fit in cents.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::pricing_matrix;
/// use shift_pay_engine::models::{PricingRule, PricingRuleInput};
///
/// let rules: Vec<PricingRule> = serde_json::from_str::<Vec<PricingRuleInput>>(r#"[
///     { "name": "Weekend", "priority": 1, "days_of_week": ["sat", "sun"], "rate_cents": 3000 }
/// ]"#)
/// .unwrap()
/// .into_iter()
/// .map(|r| PricingRule::try_from(r).unwrap())
/// .collect();
///
/// let matrix = pricing_matrix(&rules, 2000).unwrap();
/// assert_eq!(matrix.covered, 48);
/// assert_eq!(matrix.coverage_percent, 29);
/// ```
pub fn pricing_matrix(
    rules: &[PricingRule],
    base_rate_cents: Cents,
) -> EngineResult<PricingMatrix> {
    let rule_set = RuleSet::new(rules);

    let cells = DayOfWeek::ALL
        .into_iter()
        .flat_map(|day| (0..24).map(move |hour| (day, hour)))
        .map(|(day, hour)| {
            let rule = rule_set.resolve_at(day, hour * 60);
            Ok(MatrixCell {
                day,
                hour,
                rule_name: rule.map(|r| r.name.clone()),
                rate_cents: effective_rate_cents(rule, base_rate_cents)?,
            })
        })
        .collect::<EngineResult<Vec<MatrixCell>>>()?;

    let covered = cells.iter().filter(|c| c.rule_name.is_some()).count() as u32;
    let coverage_percent = (Decimal::from(covered * 100) / Decimal::from(HOURS_PER_WEEK))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);

    Ok(PricingMatrix {
        cells,
        covered,
        total: HOURS_PER_WEEK,
        coverage_percent,
        base_rate_cents,
    })
}
