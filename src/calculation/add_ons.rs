//! Per-shift flat add-ons.
//!
//! Consultations and outside visits are paid once per shift at the rate of the
//! rule governing the shift's start instant. A counted event that cannot be
//! paid is reported as a warning on the result rather than silently dropped.

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AddOnKind, AddOnPayment, Cents, EarningsWarning, PricingRule, Shift, Workplace};

/// Warning code for events counted on a shift with no governing rule.
pub const NO_GOVERNING_RULE: &str = "NO_GOVERNING_RULE";

/// Warning code for events the governing rule carries no rate for.
pub const MISSING_ADD_ON_RATE: &str = "MISSING_ADD_ON_RATE";

/// Calculates the add-on payments for a shift.
///
/// # Arguments
///
/// * `shift` - The worked shift, carrying the event counts
/// * `workplace` - Enables or disables each kind of add-on
/// * `governing` - The rule resolved at the shift's start instant, if any
///
/// # Returns
///
/// The payments due, in `[Consultation, OutsideVisit]` order, and the warnings
/// for counted events that earned nothing. A count of zero, an unset count,
/// or an add-on disabled on the workplace produces neither.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`]
/// naming the rate field when `units * rate` does not fit in cents.
pub fn calculate_add_ons(
    shift: &Shift,
    workplace: &Workplace,
    governing: Option<&PricingRule>,
) -> EngineResult<(Vec<AddOnPayment>, Vec<EarningsWarning>)> {
    let mut payments = Vec::new();
    let mut warnings = Vec::new();

    let candidates = [
        (
            AddOnKind::Consultation,
            workplace.has_consultation_pay,
            shift.patients_seen,
            governing.and_then(|r| r.consultation_rate_cents),
        ),
        (
            AddOnKind::OutsideVisit,
            workplace.has_outside_visit_pay,
            shift.outside_visits,
            governing.and_then(|r| r.outside_visit_rate_cents),
        ),
    ];

    for (kind, enabled, units, rate) in candidates {
        let Some(units) = units.filter(|u| enabled && *u > 0) else {
            continue;
        };

        match (governing, rate) {
            (Some(rule), Some(rate_cents)) => {
                let amount_cents = Cents::from(units)
                    .checked_mul(rate_cents)
                    .ok_or_else(|| EngineError::AmountOverflow {
                        field: rate_field(kind).to_string(),
                    })?;
                payments.push(AddOnPayment {
                    kind,
                    units,
                    rate_cents,
                    amount_cents,
                    rule_name: rule.name.clone(),
                });
            }
            (None, _) => {
                warn!(kind = ?kind, units, "Add-on not paid: no rule governs the shift start");
                warnings.push(EarningsWarning {
                    code: NO_GOVERNING_RULE.to_string(),
                    message: format!(
                        "{} {} not paid: no pricing rule governs the shift start",
                        units,
                        describe(kind)
                    ),
                });
            }
            (Some(rule), None) => {
                warn!(
                    kind = ?kind,
                    units,
                    rule = %rule.name,
                    "Add-on not paid: governing rule has no rate"
                );
                warnings.push(EarningsWarning {
                    code: MISSING_ADD_ON_RATE.to_string(),
                    message: format!(
                        "{} {} not paid: rule '{}' has no rate for them",
                        units,
                        describe(kind),
                        rule.name
                    ),
                });
            }
        }
    }

    Ok((payments, warnings))
}

fn rate_field(kind: AddOnKind) -> &'static str {
    match kind {
        AddOnKind::Consultation => "consultation_rate_cents",
        AddOnKind::OutsideVisit => "outside_visit_rate_cents",
    }
}

fn describe(kind: AddOnKind) -> &'static str {
    match kind {
        AddOnKind::Consultation => "consultation(s)",
        AddOnKind::OutsideVisit => "outside visit(s)",
    }
}
