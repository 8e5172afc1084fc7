//! Raw form values to display strings.
//!
//! Every function here is total: malformed input degrades to the placeholder (or to zero for
//! `parse_numeric_value`), never to a panic or an error.

/// Blank line printed wherever a value is missing, so the document can be filled by hand.
pub const PLACEHOLDER: &str = "________________";

// ────────────────────────────────────────────────────────────────────────────
// Currency
// ────────────────────────────────────────────────────────────────────────────

/// Formats a money field for clause text: `"100000"` or `"1.000,00"` → `"R$ 1.000,00"`.
///
/// Non-digits are stripped and the remaining digits are read as cents. Empty input and
/// zero (`"0,00"`) both yield [`PLACEHOLDER`].
pub fn format_currency(raw: &str) -> String {
    match significant_digits(raw) {
        Some(digits) => format!("R$ {}", group_cents(&digits)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Normalizes what the user typed into a money input: `"100000"` → `"1.000,00"`.
///
/// Returns an empty string when the input carries no digits at all, `"0,00"` for zero.
pub fn format_currency_input(raw: &str) -> String {
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return String::new();
    }
    group_cents(&significant_digits(raw).unwrap_or_default())
}

/// Reads a money field the way [`format_currency`] prints it: digits as cents.
/// `"100000"` and `"1.000,00"` are both `1000.0`; no digits is `0.0`.
pub fn cents_value(raw: &str) -> f64 {
    significant_digits(raw)
        .and_then(|digits| digits.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map_or(0.0, |cents| cents / 100.0)
}

/// Digits of `raw` with leading zeros removed, or `None` if the value is zero or empty.
fn significant_digits(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|c| *c == '0')
        .collect();
    (!digits.is_empty()).then_some(digits)
}

/// Renders a run of cent digits (no leading zeros) as `"1.234,56"`.
fn group_cents(digits: &str) -> String {
    let padded = format!("{digits:0>3}");
    let (units, cents) = padded.split_at(padded.len() - 2);

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{grouped},{cents}")
}

// ────────────────────────────────────────────────────────────────────────────
// Dates and numbers
// ────────────────────────────────────────────────────────────────────────────

/// `"2025-03-05"` → `"05/03/2025"`. Anything that is not three non-empty dash-separated
/// parts yields [`PLACEHOLDER`].
pub fn format_date(iso_date: &str) -> String {
    let parts: Vec<&str> = iso_date.trim().split('-').collect();
    match parts.as_slice() {
        [year, month, day] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
            format!("{day}/{month}/{year}")
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Reads a pt-BR number (`"1.000,50"` → `1000.5`). Returns `0.0` when nothing parses.
#[allow(dead_code)]
pub fn parse_numeric_value(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    cleaned
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Renders a decimal amount in pt-BR with exactly two fraction digits: `1234.5` → `"1.234,50"`.
pub fn format_decimal(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    // `{:.0}` keeps very large values exact enough for display without integer overflow.
    let digits = format!("{cents:.0}");
    let body = group_cents(digits.trim_start_matches('0'));
    if value < 0.0 && cents > 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
