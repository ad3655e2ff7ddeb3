//! Core data models for the shift pay engine.
//!
//! This module contains the domain inputs (pricing rules, workplaces, shifts)
//! and the derived results (earnings, tax estimates) used throughout the engine.

mod earnings;
mod money;
mod pricing_rule;
mod shift;
mod tax;
mod workplace;

pub use earnings::{AddOnKind, AddOnPayment, EarningSegment, EarningsWarning, ShiftEarnings};
pub use money::{Cents, add_cents, multiply_to_cents, round_to_cents};
pub use pricing_rule::{DayOfWeek, PricingRule, PricingRuleInput, Rate, TimeWindow, minute_of_day};
pub use shift::{Shift, hours_in, seconds_in};
pub use tax::{BracketBreakdown, InvoiceAmounts, SocialSecurityEstimate, TaxInput, TaxResult};
pub use workplace::{PayModel, Workplace};
