//! Lenient amount parsing and currency formatting.
//!
//! Form fields arrive as whatever the user typed. Parsing follows browser
//! `parseFloat` rules: leading whitespace is skipped and the longest numeric
//! prefix is taken, so `"12abc"` reads as 12. Anything without a numeric
//! prefix is treated as absent.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Decimal places used for every displayed currency value.
pub const CURRENCY_DP: u32 = 2;

/// A numeric form field: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    /// Parsed value, or `None` when the field has no numeric prefix.
    pub fn try_decimal(&self) -> Option<Decimal> {
        match self {
            RawAmount::Number(n) => try_parse_amount(&n.to_string()),
            RawAmount::Text(s) => try_parse_amount(s),
        }
    }

    /// Parsed value with unparsable input read as zero.
    pub fn to_decimal(&self) -> Decimal {
        self.try_decimal().unwrap_or(Decimal::ZERO)
    }

    /// The field as entered, trimmed.
    pub fn as_text(&self) -> String {
        match self {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s.trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RawAmount::Text(s) if s.trim().is_empty())
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// Parse a form value, reading anything unparsable as zero.
pub fn parse_amount(input: &str) -> Decimal {
    try_parse_amount(input).unwrap_or(Decimal::ZERO)
}

/// Parse the longest numeric prefix of `input`.
///
/// Returns `None` only when there is no prefix. Values beyond the `Decimal`
/// range saturate at `Decimal::MAX` or `Decimal::MIN`; values too small to
/// represent read as zero.
pub fn try_parse_amount(input: &str) -> Option<Decimal> {
    let literal = numeric_prefix(input.trim_start())?;

    let parsed = if literal.contains('e') {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str(&literal)
    };
    Some(parsed.unwrap_or_else(|_| out_of_range(&literal)))
}

/// Value for a well-formed literal that `Decimal` cannot hold.
fn out_of_range(literal: &str) -> Decimal {
    let mantissa = literal.split('e').next().unwrap_or(literal);
    if literal.contains("e-") || !mantissa.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        Decimal::ZERO
    } else if literal.starts_with('-') {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

/// Extract `[+-]digits[.digits][e[+-]digits]` from the start of `s`, normalized
/// so that `rust_decimal` accepts it (`.5` becomes `0.5`, `5.` becomes `5`).
fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    let mut out = String::new();

    match bytes.first() {
        Some(b'-') => {
            out.push('-');
            pos += 1;
        }
        Some(b'+') => pos += 1,
        _ => {}
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &s[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &s[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    // The exponent only counts when at least one digit follows it.
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            out.push('e');
            out.push_str(&s[pos + 1..end]);
        }
    }

    Some(out)
}

/// Round half away from zero to currency precision.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Render with exactly two decimal places, e.g. `"125.00"`.
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_currency(value);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    // `rescale` cannot widen the scale of values near the range limit.
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_plain_and_signed_values() {
        assert_eq!(parse_amount("42"), dec!(42));
        assert_eq!(parse_amount("  10.50 "), dec!(10.50));
        assert_eq!(parse_amount("-3.25"), dec!(-3.25));
        assert_eq!(parse_amount("+7"), dec!(7));
    }

    #[test]
    fn takes_longest_numeric_prefix() {
        assert_eq!(parse_amount("12abc"), dec!(12));
        assert_eq!(parse_amount("1.5.6"), dec!(1.5));
        assert_eq!(parse_amount("3e"), dec!(3));
        assert_eq!(parse_amount("2e2x"), dec!(200));
    }

    #[test]
    fn accepts_bare_decimal_points() {
        assert_eq!(parse_amount(".5"), dec!(0.5));
        assert_eq!(parse_amount("5."), dec!(5));
        assert_eq!(try_parse_amount("."), None);
    }

    #[test]
    fn unparsable_input_reads_as_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("NaN"), Decimal::ZERO);
        assert_eq!(parse_amount("-"), Decimal::ZERO);
    }

    #[test]
    fn out_of_range_input_saturates() {
        assert_eq!(try_parse_amount("1e999"), Some(Decimal::MAX));
        assert_eq!(try_parse_amount("-1e100"), Some(Decimal::MIN));
        assert_eq!(
            try_parse_amount("99999999999999999999999999999999"),
            Some(Decimal::MAX)
        );
        assert_eq!(try_parse_amount("1e-100"), Some(Decimal::ZERO));
        assert_eq!(try_parse_amount("0e999"), Some(Decimal::ZERO));
    }

    #[test]
    fn json_numbers_parse_like_text() {
        let raw: RawAmount = serde_json::from_str("10.005").unwrap();
        assert_eq!(raw.to_decimal(), dec!(10.005));

        let raw: RawAmount = serde_json::from_str("\"2\"").unwrap();
        assert_eq!(raw, RawAmount::Text("2".to_string()));
        assert_eq!(raw.to_decimal(), dec!(2));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(dec!(20.01)), dec!(20.01));
        assert_eq!(round_currency(dec!(0.005)), dec!(0.01));
        assert_eq!(round_currency(dec!(-0.005)), dec!(-0.01));
        assert_eq!(round_currency(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn formats_with_two_places() {
        assert_eq!(format_currency(dec!(125)), "125.00");
        assert_eq!(format_currency(dec!(12.5)), "12.50");
        assert_eq!(format_currency(dec!(20.0100)), "20.01");
        assert_eq!(format_currency(dec!(-0.001)), "0.00");
        assert_eq!(format_currency(dec!(-4.2)), "-4.20");
    }

    #[test]
    fn formats_values_near_the_range_limit() {
        assert_eq!(format_currency(Decimal::MAX), "79228162514264337593543950335.00");
        assert_eq!(format_currency(Decimal::MIN), "-79228162514264337593543950335.00");
        assert_eq!(
            format_currency(dec!(1000000000000000000000000000)),
            "1000000000000000000000000000.00"
        );
    }
}
