//! Best-before date parsing.

use chrono::{NaiveDate, TimeDelta};

use super::patterns::{DATE_DMY, DATE_YMD, INTEGER_ID};
use crate::models::Cell;

/// Render format of dates in the import files.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a date cell.
///
/// Text is read day-first (`05.03.2025` is 5 March). Numbers and digit-only
/// text are spreadsheet serial dates. Anything else is absent.
pub fn parse_flexible_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Int(i) => from_serial(*i as f64),
        Cell::Float(f) | Cell::DateTime(f) => from_serial(*f),
        Cell::Text(s) => {
            let s = s.trim();
            if INTEGER_ID.is_match(s) {
                s.parse::<f64>().ok().and_then(from_serial)
            } else {
                parse_date_text(s)
            }
        }
        Cell::Empty | Cell::Bool(_) | Cell::Error(_) => None,
    }
}

/// Convert a spreadsheet serial day count to a date.
///
/// The epoch is 1899-12-30, which absorbs the phantom 29 February 1900 of
/// the spreadsheet calendar for every serial after it. Fractions are the
/// time of day and are dropped.
pub fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial.abs() > 3_000_000.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = TimeDelta::try_days(serial.floor() as i64)?;
    epoch.checked_add_signed(days)
}

/// Parse a textual date, day before month.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_YMD.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    if let Some(caps) = DATE_DMY.captures(text) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3]);

        // Month-first only when day-first is impossible (13/01 vs 01/13).
        return NaiveDate::from_ymd_opt(year, second, first)
            .or_else(|| NaiveDate::from_ymd_opt(year, first, second));
    }

    None
}

/// Render a date as `dd.mm.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if s.len() <= 2 {
        // Two-digit year: 00-50 are 20xx, 51-99 are 19xx
        if year <= 50 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}
