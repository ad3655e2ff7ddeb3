//! Workplace model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Cents;

/// How a workplace pays for a shift.
///
/// Only [`PayModel::Hourly`] is driven by pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayModel {
    /// Paid per hour worked; the rate varies with the pricing rules.
    #[default]
    Hourly,
    /// A fixed amount per shift.
    PerTurn,
    /// A fixed monthly salary.
    Monthly,
}

impl fmt::Display for PayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayModel::Hourly => write!(f, "hourly"),
            PayModel::PerTurn => write!(f, "per_turn"),
            PayModel::Monthly => write!(f, "monthly"),
        }
    }
}

/// The pay configuration of a workplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workplace {
    /// Identifier assigned by the owning system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    /// Fallback hourly rate, also the base for multiplier rules.
    pub base_rate_cents: Cents,
    /// How shifts at this workplace are paid.
    #[serde(default)]
    pub pay_model: PayModel,
    /// Whether `patients_seen` on a shift earns consultation pay.
    #[serde(default)]
    pub has_consultation_pay: bool,
    /// Whether `outside_visits` on a shift earns outside-visit pay.
    #[serde(default)]
    pub has_outside_visit_pay: bool,
    /// Withholding rate applied to invoices; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withholding_rate: Option<Decimal>,
}

impl Workplace {
    /// Creates an hourly workplace with no add-on pay.
    pub fn hourly(base_rate_cents: Cents) -> Self {
        Self {
            id: None,
            base_rate_cents,
            pay_model: PayModel::Hourly,
            has_consultation_pay: false,
            has_outside_visit_pay: false,
            withholding_rate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_model_defaults_to_hourly() {
        let workplace: Workplace = serde_json::from_str(r#"{ "base_rate_cents": 2000 }"#).unwrap();
        assert_eq!(workplace.pay_model, PayModel::Hourly);
        assert!(!workplace.has_consultation_pay);
        assert!(!workplace.has_outside_visit_pay);
    }

    #[test]
    fn test_pay_model_serialization() {
        assert_eq!(
            serde_json::to_string(&PayModel::PerTurn).unwrap(),
            "\"per_turn\""
        );
        assert_eq!(PayModel::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_hourly_constructor() {
        let workplace = Workplace::hourly(2500);
        assert_eq!(workplace.base_rate_cents, 2500);
        assert_eq!(workplace.pay_model, PayModel::Hourly);
    }
}
