//! Calculation logic for the shift pay engine.
//!
//! This module contains the pricing-rule resolver, the partitioning of a shift
//! into rate-homogeneous segments, shift earnings with their per-shift add-ons,
//! the weekly pricing matrix, and the annual tax, social-security and invoice
//! calculations.

mod add_ons;
mod coverage;
mod earnings;
mod invoice;
mod rule_resolver;
mod segment_partition;
mod social_security;
mod tax;

pub use add_ons::{MISSING_ADD_ON_RATE, NO_GOVERNING_RULE, calculate_add_ons};
pub use coverage::{HOURS_PER_WEEK, MatrixCell, PricingMatrix, pricing_matrix};
pub use earnings::{calculate_shift_earnings, effective_rate_cents};
pub use invoice::calculate_invoice;
pub use rule_resolver::{RuleSet, resolve_rule};
pub use segment_partition::{Segment, partition_shift, partition_with};
pub use social_security::{MAX_BASE_IAS_MULTIPLE, estimate_quarterly_social_security};
pub use tax::{
    SOLIDARITY_LOWER_THRESHOLD_CENTS, SOLIDARITY_UPPER_THRESHOLD_CENTS, annual_social_security,
    calculate_tax, solidarity_surcharge,
};
