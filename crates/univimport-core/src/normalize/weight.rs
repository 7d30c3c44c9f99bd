//! Weight parsing across decimal conventions.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::WEIGHT_NOISE;

/// Parse a weight such as `"1.234,56 kg"`, `"12,5"` or `"1000"`.
///
/// A period followed by exactly three digits and then the end or a comma is
/// a thousands separator and is dropped; any remaining comma is the decimal
/// mark. Garbage parses to zero.
pub fn parse_weight(raw: &str) -> Decimal {
    let cleaned = WEIGHT_NOISE.replace_all(raw.trim(), "");
    let normalized = strip_thousands_separators(&cleaned).replace(',', ".");

    Decimal::from_str(&normalized)
        .ok()
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

fn strip_thousands_separators(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == '.' && is_thousands_group(&chars[i + 1..]) {
            continue;
        }
        result.push(c);
    }

    result
}

fn is_thousands_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(|c| c.is_ascii_digit())
        && rest.get(3).is_none_or(|&c| c == ',')
}

/// Round to two decimals and render with a comma decimal mark.
///
/// Whole numbers keep one fractional digit (`1000` becomes `"1000,0"`).
pub fn format_weight(weight: Decimal) -> String {
    let text = weight.round_dp(2).normalize().to_string();
    let text = if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    };
    text.replace('.', ",")
}
