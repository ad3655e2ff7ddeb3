//! Earnings result models.
//!
//! These types capture the output of a shift earnings calculation: one line
//! per rate-homogeneous segment, any per-shift add-ons, and the totals.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::Cents;

/// A priced segment of a shift.
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::EarningSegment;
/// use chrono::DateTime;
/// use rust_decimal::Decimal;
///
/// let segment = EarningSegment {
///     start: DateTime::parse_from_rfc3339("2026-01-12T20:00:00+00:00").unwrap(),
///     end: DateTime::parse_from_rfc3339("2026-01-13T08:00:00+00:00").unwrap(),
///     hours: Decimal::from(12),
///     rate_cents: 2500,
///     amount_cents: 30000,
///     rule_name: Some("Night".to_string()),
/// };
/// assert_eq!(segment.amount_cents, 30000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningSegment {
    /// Segment start (inclusive).
    pub start: DateTime<FixedOffset>,
    /// Segment end (exclusive).
    pub end: DateTime<FixedOffset>,
    /// Segment duration in hours.
    pub hours: Decimal,
    /// Effective hourly rate in cents.
    pub rate_cents: Cents,
    /// Amount earned in this segment, rounded to the cent.
    pub amount_cents: Cents,
    /// The governing rule, or `None` when the base rate applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
}

/// The kind of per-shift flat add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    /// Paid per patient seen.
    Consultation,
    /// Paid per outside visit.
    OutsideVisit,
}

/// A flat per-shift add-on payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnPayment {
    /// What the add-on pays for.
    pub kind: AddOnKind,
    /// Number of events paid.
    pub units: u32,
    /// Amount per event in cents.
    pub rate_cents: Cents,
    /// `units * rate_cents`.
    pub amount_cents: Cents,
    /// The rule the add-on rate was taken from.
    pub rule_name: String,
}

/// A non-fatal note attached to an earnings result.
///
/// Warnings flag inputs that did not translate into pay, such as a
/// consultation count with no governing consultation rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete earnings for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEarnings {
    /// Priced segments in chronological order.
    pub segments: Vec<EarningSegment>,
    /// Sum of the segment amounts.
    pub base_total_cents: Cents,
    /// Per-shift add-ons.
    pub add_ons: Vec<AddOnPayment>,
    /// `base_total_cents` plus all add-on amounts.
    pub total_cents: Cents,
    /// Inputs that did not translate into pay.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EarningsWarning>,
}

impl ShiftEarnings {
    /// Returns the total of all add-on payments.
    pub fn add_ons_total_cents(&self) -> Cents {
        self.add_ons.iter().map(|a| a.amount_cents).sum()
    }

    /// Returns the total hours across all segments.
    pub fn total_hours(&self) -> Decimal {
        self.segments.iter().map(|s| s.hours).sum()
    }
}
