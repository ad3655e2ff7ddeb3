//! Integer minor-currency amounts and the crate-wide rounding policy.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// A monetary amount in minor currency units (e.g. EUR 25.50 = 2550).
pub type Cents = i64;

/// Rounds a decimal amount of cents to a whole cent, half away from zero.
///
/// Every monetary step in the engine rounds through this function so that the
/// same input always lands on the same cent.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] naming `field` when the rounded
/// amount does not fit in [`Cents`].
///
/// # Example
///
/// ```
/// use shift_pay_engine::models::round_to_cents;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_to_cents("amount", Decimal::new(965, 1)).unwrap(), 97);   // 96.5
/// assert_eq!(round_to_cents("amount", Decimal::new(-965, 1)).unwrap(), -97); // -96.5
/// assert_eq!(round_to_cents("amount", Decimal::new(9649, 2)).unwrap(), 96);  // 96.49
/// assert!(round_to_cents("amount", Decimal::MAX).is_err());
/// ```
pub fn round_to_cents(field: &str, value: Decimal) -> EngineResult<Cents> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| amount_overflow(field))
}

/// Multiplies an amount by a factor and rounds the product to a whole cent.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] naming `field` when the product
/// overflows the decimal range or does not fit in [`Cents`].
pub fn multiply_to_cents(field: &str, amount: Decimal, factor: Decimal) -> EngineResult<Cents> {
    let product = amount.checked_mul(factor).ok_or_else(|| amount_overflow(field))?;
    round_to_cents(field, product)
}

/// Adds two amounts of cents.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] naming `field` when the sum does
/// not fit in [`Cents`].
pub fn add_cents(field: &str, lhs: Cents, rhs: Cents) -> EngineResult<Cents> {
    lhs.checked_add(rhs).ok_or_else(|| amount_overflow(field))
}

fn amount_overflow(field: &str) -> EngineError {
    EngineError::AmountOverflow {
        field: field.to_string(),
    }
}
