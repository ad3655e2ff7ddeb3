//! Tax estimate input and result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Cents;

/// Input to an annual tax estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Annual gross professional income in cents.
    pub gross_annual_cents: Cents,
    /// Fiscal year; `None` selects the latest configured table.
    #[serde(default)]
    pub year: Option<i32>,
    /// Whether only a coefficient of gross income is taxable.
    #[serde(default = "default_simplified")]
    pub is_simplified_regime: bool,
    /// Taxable share of gross under the simplified regime; defaults to the year's coefficient.
    #[serde(default)]
    pub activity_coefficient: Option<Decimal>,
    /// Withholding rate for the informational withholding figure; defaults to the year's rate.
    #[serde(default)]
    pub withholding_rate: Option<Decimal>,
}

fn default_simplified() -> bool {
    true
}

impl TaxInput {
    /// Creates an input for the simplified regime with the year's defaults.
    pub fn simplified(gross_annual_cents: Cents, year: i32) -> Self {
        Self {
            gross_annual_cents,
            year: Some(year),
            is_simplified_regime: true,
            activity_coefficient: None,
            withholding_rate: None,
        }
    }
}

/// One bracket's share of the progressive tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    /// Display label, the rate as a percentage (e.g. `12.5%`).
    pub bracket: String,
    /// Taxable income consumed by this bracket.
    pub taxable_in_bracket: Cents,
    /// The bracket rate.
    pub rate: Decimal,
    /// Tax due in this bracket.
    pub tax: Cents,
}

/// The result of an annual tax estimate.
///
/// Invariant: `net_income == gross_income - irs_amount - social_security`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// The fiscal year whose table was applied.
    pub tax_year: i32,
    /// Annual gross income.
    pub gross_income: Cents,
    /// Income subject to the brackets.
    pub taxable_income: Cents,
    /// Income tax including solidarity surcharge, after the minimum-existence clamp.
    pub irs_amount: Cents,
    /// `irs_amount / taxable_income`, zero when nothing is taxable.
    pub irs_effective_rate: Decimal,
    /// Annual social-security contribution.
    pub social_security: Cents,
    /// Amount withheld at source; informational, not deducted from net income.
    pub withholding_tax: Cents,
    /// Income after tax and social security.
    pub net_income: Cents,
    /// `net_income / 12`, rounded.
    pub monthly_net: Cents,
    /// Per-bracket breakdown in ascending bracket order.
    pub bracket_breakdown: Vec<BracketBreakdown>,
}

impl TaxResult {
    /// Returns an all-zero result for the given year.
    pub fn zero(tax_year: i32) -> Self {
        Self {
            tax_year,
            gross_income: 0,
            taxable_income: 0,
            irs_amount: 0,
            irs_effective_rate: Decimal::ZERO,
            social_security: 0,
            withholding_tax: 0,
            net_income: 0,
            monthly_net: 0,
            bracket_breakdown: Vec::new(),
        }
    }
}

/// A quarterly social-security contribution estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityEstimate {
    /// The share of quarterly gross income relevant for contributions.
    pub relevant_income: Cents,
    /// Monthly contributory base after the floor and ceiling.
    pub monthly_base: Cents,
    /// Monthly contribution.
    pub monthly_contribution: Cents,
    /// Contribution due for the quarter.
    pub quarterly_payment: Cents,
    /// Twelve monthly contributions.
    pub annual_estimate: Cents,
}

/// Amounts on an issued invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceAmounts {
    /// Invoiced gross amount.
    pub gross_cents: Cents,
    /// Withholding rate applied.
    pub withholding_rate: Decimal,
    /// Amount withheld at source.
    pub withholding_cents: Cents,
    /// VAT rate applied.
    pub vat_rate: Decimal,
    /// VAT charged on top of gross.
    pub vat_cents: Cents,
    /// `gross - withholding + vat`.
    pub net_cents: Cents,
}
