//! Numeric keys, ids and integer coercions.

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::patterns::{DECIMAL_ID, INTEGER_ID, LEADING_NUMBER};
use crate::models::Cell;

/// Return the first number found in `text`, including a directly following
/// `.digits` fraction. Empty when `text` contains no digit.
pub fn extract_leading_number(text: &str) -> String {
    LEADING_NUMBER
        .find(text.trim())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Check that `id` consists of digits only, or digits with one decimal
/// fraction when `allow_decimal` is set.
pub fn is_article_id(id: &str, allow_decimal: bool) -> bool {
    if allow_decimal {
        DECIMAL_ID.is_match(id)
    } else {
        INTEGER_ID.is_match(id)
    }
}

/// Left-pad an article id with zeros to six characters.
pub fn pad_article_id(id: &str) -> String {
    format!("{:0>6}", id)
}

/// Parse a quantity cell. Unparseable and negative values become zero.
pub fn parse_quantity(cell: &Cell) -> Decimal {
    let value = match cell {
        Cell::Int(i) => Some(Decimal::from(*i)),
        Cell::Float(f) => Decimal::from_f64(*f),
        Cell::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        _ => None,
    };

    value
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

/// Truncate a cell to an integer, zero when it is not numeric.
pub fn integer_or_zero(cell: &Cell) -> i64 {
    cell.as_number()
        .and_then(|n| n.trunc().to_i64())
        .unwrap_or(0)
}

/// Render a batch code as a plain integer string, `"0"` when not numeric.
///
/// Spreadsheets store long batch numbers as floats, which would otherwise
/// surface as `7.001e3` or `7001.0`.
pub fn batch_code(cell: &Cell) -> String {
    integer_or_zero(cell).to_string()
}

/// Truncate a decimal to an integer.
pub fn truncate_to_i64(value: Decimal) -> i64 {
    value.trunc().to_i64().unwrap_or(0)
}
