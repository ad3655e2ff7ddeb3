//! Error types for the shift pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition under which a calculation is rejected.

use thiserror::Error;

/// The main error type for the shift pay engine.
///
/// Every error is deterministic and detected before any output is produced:
/// a calculation either fully succeeds or returns one of these variants.
///
/// # Example
///
/// ```
/// use shift_pay_engine::error::EngineError;
///
/// let error = EngineError::UnsupportedTaxYear { year: 2019 };
/// assert_eq!(error.to_string(), "No tax table configured for year 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The interval end is not strictly after its start.
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        /// The interval start, RFC 3339.
        start: String,
        /// The interval end, RFC 3339.
        end: String,
    },

    /// A pricing rule failed validation at the creation boundary.
    #[error("Invalid pricing rule '{rule}': {message}")]
    InvalidRuleConfiguration {
        /// The name of the offending rule.
        rule: String,
        /// What made the rule invalid.
        message: String,
    },

    /// No tax bracket table exists for the requested year.
    #[error("No tax table configured for year {year}")]
    UnsupportedTaxYear {
        /// The requested fiscal year.
        year: i32,
    },

    /// A monetary input was negative.
    #[error("Invalid amount for '{field}': must not be negative")]
    NegativeAmount {
        /// The offending input field.
        field: String,
    },

    /// A rate or coefficient was outside `[0, 1]`.
    #[error("Invalid rate for '{field}': {value} is not between 0 and 1")]
    InvalidRate {
        /// The offending input field.
        field: String,
        /// The rejected value.
        value: String,
    },

    /// A monetary result does not fit in a whole number of cents.
    #[error("Amount overflow in '{field}': result exceeds the representable range")]
    AmountOverflow {
        /// The rate or amount whose arithmetic overflowed.
        field: String,
    },

    /// The workplace pay model is not driven by the pricing rules.
    #[error("Pay model '{pay_model}' is not supported by the earnings calculator")]
    UnsupportedPayModel {
        /// The pay model tag.
        pay_model: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
