//! Brazilian-real currency formatting and parsing.
//!
//! Amounts are displayed as `R$ 1.234,50`: thousands grouped by `.`, a
//! decimal `,` and exactly two fraction digits. [`parse_monetary`] is the
//! exact inverse for non-negative values with at most two fraction digits.

use crate::fields::FieldValue;

/// Currency marker placed before every formatted amount.
pub const CURRENCY_SYMBOL: &str = "R$";

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Format an amount as Brazilian currency.
///
/// ```
/// use peticao::format::format_currency;
///
/// assert_eq!(format_currency(1234.5), "R$ 1.234,50");
/// assert_eq!(format_currency(0.0), "R$ 0,00");
/// ```
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{} {}", CURRENCY_SYMBOL, value);
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };

    format!(
        "{} {}{}{}{}",
        CURRENCY_SYMBOL,
        sign,
        group_thousands(int_part),
        DECIMAL_SEPARATOR,
        frac_part
    )
}

/// Format a field value: amounts become currency strings, text is returned
/// unchanged.
pub fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Amount(v) => format_currency(*v),
        FieldValue::Text(s) => s.clone(),
    }
}

/// Parse a Brazilian-formatted amount such as `1.234,56` or `R$ 1.234,56`.
///
/// Thousands separators are stripped first, then the decimal comma becomes
/// a point. Returns `None` when the token is not a number or overflows to
/// infinity.
pub fn parse_monetary(raw: &str) -> Option<f64> {
    let token = raw.trim();
    let token = token.strip_prefix(CURRENCY_SYMBOL).unwrap_or(token).trim();

    if token.is_empty()
        || !token
            .chars()
            .all(|c| c.is_ascii_digit() || c == THOUSANDS_SEPARATOR || c == DECIMAL_SEPARATOR)
    {
        return None;
    }

    let normalized = token
        .replace(THOUSANDS_SEPARATOR, "")
        .replace(DECIMAL_SEPARATOR, ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}
