//! Quarterly social-security contribution estimate.
//!
//! Self-employed contributions are declared quarterly: 70 % of the quarter's
//! gross income sets a monthly contributory base, bounded below by one IAS and
//! above by twelve.

use rust_decimal::Decimal;

use crate::config::TaxYearConfig;
use crate::error::EngineResult;
use crate::models::{Cents, SocialSecurityEstimate, multiply_to_cents, round_to_cents};

use super::tax::ensure_non_negative;

/// Upper bound of the monthly contributory base, in multiples of the IAS.
pub const MAX_BASE_IAS_MULTIPLE: i64 = 12;

/// Estimates the social-security contribution for one quarter.
///
/// # Errors
///
/// Returns [`EngineError::NegativeAmount`](crate::error::EngineError::NegativeAmount)
/// when the quarterly gross income is negative.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::estimate_quarterly_social_security;
/// use shift_pay_engine::config::TaxTables;
///
/// let tables = TaxTables::builtin();
/// let estimate = estimate_quarterly_social_security(tables.get(2026).unwrap(), 900_000).unwrap();
///
/// // 70% of EUR 9,000 over three months is a EUR 2,100 monthly base
/// assert_eq!(estimate.monthly_base, 210_000);
/// assert_eq!(estimate.monthly_contribution, 44_940);
/// assert_eq!(estimate.quarterly_payment, 134_820);
/// ```
pub fn estimate_quarterly_social_security(
    config: &TaxYearConfig,
    quarterly_gross_cents: Cents,
) -> EngineResult<SocialSecurityEstimate> {
    let gross = ensure_non_negative("quarterly_gross_cents", quarterly_gross_cents)?;

    let relevant_income =
        multiply_to_cents("relevant_income", Decimal::from(gross), config.ss_income_coefficient)?;
    let monthly_share = Decimal::from(relevant_income) / Decimal::from(3);
    let monthly_base = round_to_cents("monthly_base", monthly_share)?
        .clamp(config.ias_value_cents, config.ias_value_cents * MAX_BASE_IAS_MULTIPLE);
    let monthly_contribution =
        multiply_to_cents("monthly_contribution", Decimal::from(monthly_base), config.ss_rate)?;

    Ok(SocialSecurityEstimate {
        relevant_income,
        monthly_base,
        monthly_contribution,
        quarterly_payment: monthly_contribution * 3,
        annual_estimate: monthly_contribution * 12,
    })
}
