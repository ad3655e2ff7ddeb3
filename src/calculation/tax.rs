//! Annual income tax estimation.
//!
//! This module estimates the progressive income tax (IRS), solidarity
//! surcharge, and social-security contribution of a self-employed worker for
//! one fiscal year, using the bracket table of that year.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxYearConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BracketBreakdown, Cents, TaxInput, TaxResult, add_cents, multiply_to_cents, round_to_cents,
};

/// Taxable income above which the first solidarity tier applies, in cents.
pub const SOLIDARITY_LOWER_THRESHOLD_CENTS: Cents = 8_000_000;
/// Taxable income above which the second solidarity tier applies, in cents.
pub const SOLIDARITY_UPPER_THRESHOLD_CENTS: Cents = 25_000_000;

const SOLIDARITY_LOWER_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);
const SOLIDARITY_UPPER_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Calculates the annual tax estimate.
///
/// # Arguments
///
/// * `input` - Gross income and regime options
/// * `config` - The tax table of the fiscal year to apply
///
/// # Returns
///
/// A [`TaxResult`] with `net_income == gross_income - irs_amount - social_security`.
/// A zero gross income yields an all-zero result with no brackets.
///
/// # Errors
///
/// * [`EngineError::NegativeAmount`] when the gross income is negative
/// * [`EngineError::InvalidRate`] when the activity coefficient or withholding rate is
///   outside `[0, 1]`
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::calculate_tax;
/// use shift_pay_engine::config::TaxTables;
/// use shift_pay_engine::models::TaxInput;
///
/// let tables = TaxTables::builtin();
/// let input = TaxInput::simplified(500_000, 2026);
/// let result = calculate_tax(&input, tables.get(2026).unwrap()).unwrap();
///
/// // EUR 5,000 stays under the minimum existence threshold
/// assert_eq!(result.irs_amount, 0);
/// assert_eq!(result.net_income, result.gross_income - result.social_security);
/// ```
pub fn calculate_tax(input: &TaxInput, config: &TaxYearConfig) -> EngineResult<TaxResult> {
    let gross = ensure_non_negative("gross_annual_cents", input.gross_annual_cents)?;
    let coefficient = ensure_fraction(
        "activity_coefficient",
        input.activity_coefficient.unwrap_or(config.simplified_coefficient),
    )?;
    let withholding_rate = ensure_fraction(
        "withholding_rate",
        input.withholding_rate.unwrap_or(config.default_withholding_rate),
    )?;

    if gross == 0 {
        return Ok(TaxResult::zero(config.fiscal_year));
    }

    let taxable = if input.is_simplified_regime {
        multiply_to_cents("taxable_income", Decimal::from(gross), coefficient)?
    } else {
        gross
    };

    let bracket_breakdown = progressive_brackets(taxable, config)?;
    let bracket_tax = bracket_breakdown
        .iter()
        .try_fold(0, |total, b| add_cents("irs_amount", total, b.tax))?;
    let surcharge = solidarity_surcharge(taxable)?;

    let mut irs_amount = add_cents("irs_amount", bracket_tax, surcharge)?;
    if gross - irs_amount < config.min_existence_cents {
        let clamped = (gross - config.min_existence_cents).max(0);
        debug!(
            fiscal_year = config.fiscal_year,
            bracket_tax = irs_amount,
            clamped,
            "Minimum existence overrides bracket tax"
        );
        irs_amount = clamped;
    }

    let social_security = annual_social_security(gross, config)?;
    let withholding_tax =
        multiply_to_cents("withholding_tax", Decimal::from(gross), withholding_rate)?;
    let net_income = gross - irs_amount - social_security;

    let irs_effective_rate = if taxable > 0 {
        Decimal::from(irs_amount) / Decimal::from(taxable)
    } else {
        Decimal::ZERO
    };

    Ok(TaxResult {
        tax_year: config.fiscal_year,
        gross_income: gross,
        taxable_income: taxable,
        irs_amount,
        irs_effective_rate,
        social_security,
        withholding_tax,
        net_income,
        monthly_net: round_to_cents("monthly_net", Decimal::from(net_income) / Decimal::from(12))?,
        bracket_breakdown,
    })
}

/// Walks the brackets in ascending order, consuming taxable income bracket by bracket.
fn progressive_brackets(
    taxable: Cents,
    config: &TaxYearConfig,
) -> EngineResult<Vec<BracketBreakdown>> {
    let mut remaining = taxable;
    let mut breakdown = Vec::new();

    for bracket in &config.brackets {
        if remaining <= 0 {
            break;
        }
        let consumed = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        breakdown.push(BracketBreakdown {
            bracket: format!("{:.1}%", bracket.rate * Decimal::ONE_HUNDRED),
            taxable_in_bracket: consumed,
            rate: bracket.rate,
            tax: multiply_to_cents("irs_amount", Decimal::from(consumed), bracket.rate)?,
        });
        remaining -= consumed;
    }

    Ok(breakdown)
}

/// Returns the solidarity surcharge on taxable income, each tier rounded separately.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::solidarity_surcharge;
///
/// assert_eq!(solidarity_surcharge(8_000_000).unwrap(), 0);
/// // EUR 100,000: 2.5% of EUR 20,000
/// assert_eq!(solidarity_surcharge(10_000_000).unwrap(), 50_000);
/// ```
pub fn solidarity_surcharge(taxable: Cents) -> EngineResult<Cents> {
    let mut surcharge = 0;
    if taxable > SOLIDARITY_LOWER_THRESHOLD_CENTS {
        let band = taxable.min(SOLIDARITY_UPPER_THRESHOLD_CENTS) - SOLIDARITY_LOWER_THRESHOLD_CENTS;
        surcharge += multiply_to_cents("irs_amount", Decimal::from(band), SOLIDARITY_LOWER_RATE)?;
    }
    if taxable > SOLIDARITY_UPPER_THRESHOLD_CENTS {
        let band = taxable - SOLIDARITY_UPPER_THRESHOLD_CENTS;
        surcharge += multiply_to_cents("irs_amount", Decimal::from(band), SOLIDARITY_UPPER_RATE)?;
    }
    Ok(surcharge)
}

/// Returns the flat annual social-security contribution on gross income.
pub fn annual_social_security(gross: Cents, config: &TaxYearConfig) -> EngineResult<Cents> {
    let relevant =
        multiply_to_cents("social_security", Decimal::from(gross), config.ss_income_coefficient)?;
    multiply_to_cents("social_security", Decimal::from(relevant), config.ss_rate)
}

pub(super) fn ensure_non_negative(field: &str, amount: Cents) -> EngineResult<Cents> {
    if amount < 0 {
        return Err(EngineError::NegativeAmount {
            field: field.to_string(),
        });
    }
    Ok(amount)
}

pub(super) fn ensure_fraction(field: &str, rate: Decimal) -> EngineResult<Decimal> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            value: rate.to_string(),
        });
    }
    Ok(rate)
}
