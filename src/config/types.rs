//! Configuration types for tax estimation.
//!
//! This module contains the strongly-typed tax tables that are either built
//! into the crate or deserialized from per-year YAML files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Cents;

/// One progressive income-tax bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive), in cents.
    pub lower_limit_cents: Cents,
    /// Upper bound of the bracket, `None` for the open top bracket.
    #[serde(default)]
    pub upper_limit_cents: Option<Cents>,
    /// Marginal rate.
    pub rate: Decimal,
    /// Published parcel to deduct under the `taxable * rate - deduction` formula.
    ///
    /// Carried for reference only; the bracket summation does not use it.
    #[serde(default)]
    pub deduction_cents: Cents,
}

impl TaxBracket {
    /// Returns the width of the bracket, `None` when it is unbounded.
    pub fn width(&self) -> Option<Cents> {
        self.upper_limit_cents.map(|upper| upper - self.lower_limit_cents)
    }
}

/// The tax parameters for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    /// The fiscal year.
    pub fiscal_year: i32,
    /// Brackets in ascending order, contiguous from zero.
    pub brackets: Vec<TaxBracket>,
    /// Social-security contribution rate.
    pub ss_rate: Decimal,
    /// Share of gross income relevant for social security.
    pub ss_income_coefficient: Decimal,
    /// Social support index (IAS), the monthly contribution base floor, in cents.
    pub ias_value_cents: Cents,
    /// Withholding rate applied when the caller supplies none.
    pub default_withholding_rate: Decimal,
    /// Income below which tax may not push the taxpayer, in cents.
    pub min_existence_cents: Cents,
    /// Taxable share of gross income under the simplified regime.
    pub simplified_coefficient: Decimal,
}

impl TaxYearConfig {
    /// Checks the table is usable by the tax calculation.
    ///
    /// Brackets must start at zero and be contiguous, and exactly the last one
    /// must be open. Every rate and coefficient must lie in `[0, 1]`.
    pub fn validate(&self, source: &str) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: source.to_string(),
            message,
        };

        let Some(first) = self.brackets.first() else {
            return Err(invalid(format!(
                "tax year {} defines no brackets",
                self.fiscal_year
            )));
        };
        if first.lower_limit_cents != 0 {
            return Err(invalid("first bracket must start at 0".to_string()));
        }

        let last = self.brackets.len() - 1;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if !is_fraction(bracket.rate) {
                return Err(invalid(format!("bracket {} rate must be within [0, 1]", index + 1)));
            }
            match bracket.upper_limit_cents {
                Some(upper) if upper <= bracket.lower_limit_cents => {
                    return Err(invalid(format!("bracket {} is empty", index + 1)));
                }
                None if index != last => {
                    return Err(invalid(format!(
                        "bracket {} is open but is not the last bracket",
                        index + 1
                    )));
                }
                _ => {}
            }
            if let Some(next) = self.brackets.get(index + 1) {
                if bracket.upper_limit_cents != Some(next.lower_limit_cents) {
                    return Err(invalid(format!(
                        "bracket {} does not start where bracket {} ends",
                        index + 2,
                        index + 1
                    )));
                }
            }
        }

        let fractions = [
            ("ss_rate", self.ss_rate),
            ("ss_income_coefficient", self.ss_income_coefficient),
            ("default_withholding_rate", self.default_withholding_rate),
            ("simplified_coefficient", self.simplified_coefficient),
        ];
        for (name, value) in fractions {
            if !is_fraction(value) {
                return Err(invalid(format!("{} must be within [0, 1]", name)));
            }
        }

        if self.ias_value_cents <= 0 || self.min_existence_cents < 0 {
            return Err(invalid(
                "ias_value_cents must be positive and min_existence_cents not negative".to_string(),
            ));
        }

        if self.brackets[last].upper_limit_cents.is_some() {
            return Err(invalid("last bracket must be open".to_string()));
        }

        Ok(())
    }
}

fn is_fraction(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Tax tables indexed by fiscal year.
///
/// Lookups are explicit: asking for a year with no table is an error, and the
/// latest table is only used when the caller asks for it.
///
/// # Example
///
/// ```
/// use shift_pay_engine::config::TaxTables;
///
/// let tables = TaxTables::builtin();
/// assert_eq!(tables.years(), vec![2025, 2026]);
/// assert_eq!(tables.latest().unwrap().fiscal_year, 2026);
/// assert!(tables.get(2019).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaxTables {
    years: BTreeMap<i32, TaxYearConfig>,
}

impl TaxTables {
    /// Builds the table set from individual years; a later duplicate year replaces an earlier one.
    pub fn new(configs: impl IntoIterator<Item = TaxYearConfig>) -> Self {
        Self {
            years: configs.into_iter().map(|c| (c.fiscal_year, c)).collect(),
        }
    }

    /// Returns the tables shipped with the crate (2025 and 2026).
    pub fn builtin() -> Self {
        Self::new([builtin_2025(), builtin_2026()])
    }

    /// Returns the table for a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedTaxYear`] when no table exists for `year`.
    pub fn get(&self, year: i32) -> EngineResult<&TaxYearConfig> {
        self.years
            .get(&year)
            .ok_or(EngineError::UnsupportedTaxYear { year })
    }

    /// Returns the table for `year`, or the latest table when `year` is `None`.
    pub fn resolve(&self, year: Option<i32>) -> EngineResult<&TaxYearConfig> {
        match year {
            Some(year) => self.get(year),
            None => self.latest(),
        }
    }

    /// Returns the most recent table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedTaxYear`] with year 0 when no table is configured.
    pub fn latest(&self) -> EngineResult<&TaxYearConfig> {
        self.years
            .values()
            .next_back()
            .ok_or(EngineError::UnsupportedTaxYear { year: 0 })
    }

    /// Returns the configured years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    /// Returns true when no year is configured.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

fn bracket(lower: Cents, upper: Option<Cents>, rate_permille: i64, deduction: Cents) -> TaxBracket {
    TaxBracket {
        lower_limit_cents: lower,
        upper_limit_cents: upper,
        rate: Decimal::new(rate_permille, 3),
        deduction_cents: deduction,
    }
}

fn builtin_2026() -> TaxYearConfig {
    TaxYearConfig {
        fiscal_year: 2026,
        brackets: vec![
            bracket(0, Some(770_300), 125, 0),
            bracket(770_300, Some(1_162_300), 165, 30_812),
            bracket(1_162_300, Some(1_647_200), 220, 94_754),
            bracket(1_647_200, Some(2_132_100), 250, 144_170),
            bracket(2_132_100, Some(2_714_600), 285, 218_792),
            bracket(2_714_600, Some(3_979_100), 350, 395_142),
            bracket(3_979_100, Some(5_199_700), 370, 474_724),
            bracket(5_199_700, Some(8_119_900), 435, 812_940),
            bracket(8_119_900, None, 480, 1_178_235),
        ],
        ss_rate: Decimal::new(214, 3),
        ss_income_coefficient: Decimal::new(70, 2),
        ias_value_cents: 53_713,
        default_withholding_rate: Decimal::new(23, 2),
        min_existence_cents: 1_288_000,
        simplified_coefficient: Decimal::new(75, 2),
    }
}

fn builtin_2025() -> TaxYearConfig {
    TaxYearConfig {
        fiscal_year: 2025,
        brackets: vec![
            bracket(0, Some(747_900), 130, 0),
            bracket(747_900, Some(1_128_400), 165, 26_177),
            bracket(1_128_400, Some(1_599_200), 220, 88_240),
            bracket(1_599_200, Some(2_070_000), 250, 136_218),
            bracket(2_070_000, Some(2_635_500), 285, 208_668),
            bracket(2_635_500, Some(3_863_200), 350, 379_973),
            bracket(3_863_200, Some(5_048_300), 370, 457_237),
            bracket(5_048_300, Some(7_883_400), 435, 785_377),
            bracket(7_883_400, None, 480, 1_140_130),
        ],
        ss_rate: Decimal::new(214, 3),
        ss_income_coefficient: Decimal::new(70, 2),
        ias_value_cents: 52_250,
        default_withholding_rate: Decimal::new(23, 2),
        min_existence_cents: 1_218_000,
        simplified_coefficient: Decimal::new(75, 2),
    }
}
