//! Untyped spreadsheet cell values.

use serde::{Deserialize, Serialize};

/// A single cell as read from a workbook, before any column semantics apply.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No value stored.
    #[default]
    Empty,
    /// Text cell.
    Text(String),
    /// Integer cell.
    Int(i64),
    /// Floating point cell.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
    /// Date/time cell, kept as its spreadsheet serial number.
    DateTime(f64),
    /// Formula error (`#N/A`, `#DIV/0!`, ...).
    Error(String),
}

impl Cell {
    /// True when no value is stored at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True for empty cells and text cells containing only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as text.
    ///
    /// Integral floats drop their fraction so that numeric id cells read back
    /// as plain digit strings (`123.0` becomes `"123"`).
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) | Cell::DateTime(f) => format_float(*f),
            Cell::Bool(b) => b.to_string(),
            Cell::Error(e) => e.clone(),
        }
    }

    /// Trimmed text rendering.
    pub fn trimmed(&self) -> String {
        self.text().trim().to_string()
    }

    /// Numeric interpretation, `None` when the cell holds no finite number.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Int(i) => *i as f64,
            Cell::Float(f) | Cell::DateTime(f) => *f,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty | Cell::Bool(_) | Cell::Error(_) => return None,
        };

        value.is_finite().then_some(value)
    }
}

static EMPTY: Cell = Cell::Empty;

/// Cell at `idx`, empty when the row is shorter.
pub fn cell_at(row: &[Cell], idx: usize) -> &Cell {
    row.get(idx).unwrap_or(&EMPTY)
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{:.0}", f)
    } else {
        format!("{}", f)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rendering() {
        assert_eq!(Cell::Float(123.0).text(), "123");
        assert_eq!(Cell::Float(12.5).text(), "12.5");
        assert_eq!(Cell::Int(55).text(), "55");
        assert_eq!(Cell::Empty.text(), "");
        assert_eq!(Cell::from(" 000123 ").trimmed(), "000123");
    }

    #[test]
    fn test_blank_detection() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::from("   ").is_blank());
        assert!(!Cell::from("   ").is_empty());
        assert!(!Cell::Int(0).is_blank());
    }

    #[test]
    fn test_cell_at_pads_short_rows() {
        let row = vec![Cell::Int(1)];
        assert_eq!(cell_at(&row, 0), &Cell::Int(1));
        assert_eq!(cell_at(&row, 7), &Cell::Empty);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(Cell::from(" 7001 ").as_number(), Some(7001.0));
        assert_eq!(Cell::from("1.2e3").as_number(), Some(1200.0));
        assert_eq!(Cell::from("AB12").as_number(), None);
        assert_eq!(Cell::Float(f64::NAN).as_number(), None);
        assert_eq!(Cell::Bool(true).as_number(), None);
    }
}
