//! Invoice amounts.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Cents, InvoiceAmounts, multiply_to_cents};

use super::tax::{ensure_fraction, ensure_non_negative};

/// Calculates the amounts on an invoice: withholding retained by the payer and
/// VAT charged on top of the gross amount.
///
/// `net_cents` is `gross - withholding + vat`.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::calculate_invoice;
/// use rust_decimal::Decimal;
///
/// let invoice = calculate_invoice(100_000, Decimal::new(23, 2), Decimal::ZERO).unwrap();
/// assert_eq!(invoice.withholding_cents, 23_000);
/// assert_eq!(invoice.net_cents, 77_000);
/// ```
pub fn calculate_invoice(
    gross_cents: Cents,
    withholding_rate: Decimal,
    vat_rate: Decimal,
) -> EngineResult<InvoiceAmounts> {
    let gross = ensure_non_negative("gross_cents", gross_cents)?;
    let withholding_rate = ensure_fraction("withholding_rate", withholding_rate)?;
    let vat_rate = ensure_fraction("vat_rate", vat_rate)?;

    let withholding_cents =
        multiply_to_cents("withholding_cents", Decimal::from(gross), withholding_rate)?;
    let vat_cents = multiply_to_cents("vat_cents", Decimal::from(gross), vat_rate)?;

    Ok(InvoiceAmounts {
        gross_cents: gross,
        withholding_rate,
        withholding_cents,
        vat_rate,
        vat_cents,
        net_cents: gross - withholding_cents + vat_cents,
    })
}
