//! Request types for the shift pay engine API.
//!
//! This module defines the JSON request bodies of the calculation endpoints
//! and their conversion into validated domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Cents, PricingRule, PricingRuleInput, Shift, Workplace};

/// Request body for `POST /earnings/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsRequest {
    /// The worked shift.
    pub shift: Shift,
    /// The workplace the shift was worked at.
    pub workplace: Workplace,
    /// The workplace's pricing rules as stored.
    #[serde(default)]
    pub rules: Vec<PricingRuleInput>,
    /// Consultations performed; overrides the count on the shift when set.
    #[serde(default)]
    pub patients_seen: Option<u32>,
    /// Outside visits performed; overrides the count on the shift when set.
    #[serde(default)]
    pub outside_visits: Option<u32>,
}

impl EarningsRequest {
    /// Validates the rules and returns the domain inputs of the calculation.
    pub fn into_domain(self) -> EngineResult<(Shift, Workplace, Vec<PricingRule>)> {
        let rules = validate_rules(self.rules)?;

        let mut shift = self.shift;
        if self.patients_seen.is_some() {
            shift.patients_seen = self.patients_seen;
        }
        if self.outside_visits.is_some() {
            shift.outside_visits = self.outside_visits;
        }

        Ok((shift, self.workplace, rules))
    }
}

/// Request body for `POST /tax/social-security`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSecurityRequest {
    /// Gross income of the quarter in cents.
    pub quarterly_gross_cents: Cents,
    /// Fiscal year; the latest table when omitted.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Request body for `POST /pricing/matrix`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingMatrixRequest {
    /// Rate for slots no rule covers.
    pub base_rate_cents: Cents,
    /// The workplace's pricing rules as stored.
    #[serde(default)]
    pub rules: Vec<PricingRuleInput>,
}

impl PricingMatrixRequest {
    /// Validates the rules.
    pub fn validated_rules(self) -> EngineResult<Vec<PricingRule>> {
        validate_rules(self.rules)
    }
}

/// Request body for `POST /invoices/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRequest {
    /// Invoiced gross amount in cents.
    pub gross_cents: Cents,
    /// Withholding rate; the tax year's default when omitted.
    #[serde(default)]
    pub withholding_rate: Option<Decimal>,
    /// VAT rate; zero (exempt) when omitted.
    #[serde(default)]
    pub vat_rate: Option<Decimal>,
    /// Fiscal year supplying the default withholding rate.
    #[serde(default)]
    pub year: Option<i32>,
}

fn validate_rules(rules: Vec<PricingRuleInput>) -> EngineResult<Vec<PricingRule>> {
    rules.into_iter().map(PricingRule::try_from).collect()
}
