//! Common regex patterns for manifest field normalization.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First number in free text: 10030004 or 10030004.112
    pub static ref LEADING_NUMBER: Regex = Regex::new(
        r"[0-9]+(?:\.[0-9]+)?"
    ).unwrap();

    // Article ids
    pub static ref INTEGER_ID: Regex = Regex::new(
        r"^[0-9]+$"
    ).unwrap();

    pub static ref DECIMAL_ID: Regex = Regex::new(
        r"^[0-9]+(?:\.[0-9]+)?$"
    ).unwrap();

    // Date patterns, optional trailing time part
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^([0-9]{1,2})[./\-]([0-9]{1,2})[./\-]([0-9]{4}|[0-9]{2})(?:[ T].*)?$"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"^([0-9]{4})[./\-]([0-9]{1,2})[./\-]([0-9]{1,2})(?:[ T].*)?$"
    ).unwrap();

    // Anything that cannot be part of a weight figure
    pub static ref WEIGHT_NOISE: Regex = Regex::new(
        r"[^0-9,.]"
    ).unwrap();
}
