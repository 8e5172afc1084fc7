//! Per-installment amount from total, down payment and count.
//!
//! # Rules
//! - One-time methods (PIX, credit card, cash): base = total
//! - Installment methods (bank slip, transfer): base = total − down payment
//! - amount = base / count, rounded to two decimals
//!
//! Derivation only runs when total, down payment and count are all filled in and the count
//! is a positive integer. Otherwise nothing is derived and a previously stored amount is
//! kept as is; it is never cleared.

use serde::{Deserialize, Serialize};

use crate::document::format::{cents_value, format_decimal};
use crate::models::record::{present, FinancialTerms, PaymentMethod};

/// Result of a successful derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentQuote {
    pub base: f64,
    pub amount: f64,
    /// pt-BR display form (`"200,00"`), the form stored back into the record.
    pub formatted_amount: String,
}

/// Derives the installment amount from money fields, read as cents like `format_currency`
/// prints them (`"100000"` and `"1.000,00"` are both R$ 1.000,00).
///
/// Returns `None` when the guard fails. A down payment larger than the total leaves a base
/// of zero rather than a negative installment.
pub fn derive_installment(
    total_value: &str,
    down_payment: &str,
    installment_count: &str,
    method: PaymentMethod,
) -> Option<InstallmentQuote> {
    if total_value.trim().is_empty() || down_payment.trim().is_empty() {
        return None;
    }
    let count = installment_count
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)?;

    let total = cents_value(total_value);
    let down = cents_value(down_payment);

    let base = if method.is_one_time() {
        total
    } else {
        (total - down).max(0.0)
    };
    let amount = round_cents(base / f64::from(count));

    Some(InstallmentQuote {
        base: round_cents(base),
        amount,
        formatted_amount: format_decimal(amount),
    })
}

/// Derives from a record's terms.
pub fn quote_terms(terms: &FinancialTerms) -> Option<InstallmentQuote> {
    derive_installment(
        present(&terms.total_value)?,
        present(&terms.down_payment)?,
        present(&terms.installment_count)?,
        terms.payment_method,
    )
}

/// Stores the derived amount into `terms.installment_amount` and returns the quote.
///
/// On `None` the field is left untouched.
pub fn apply_installment(terms: &mut FinancialTerms) -> Option<InstallmentQuote> {
    let quote = quote_terms(terms)?;
    terms.installment_amount = Some(quote.formatted_amount.clone());
    Some(quote)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
