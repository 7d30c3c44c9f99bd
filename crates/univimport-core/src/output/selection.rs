//! Operator assignments of storage location and annotation onto output rows.

use crate::error::OutputError;

/// Rows an assignment applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelection {
    /// Every output row.
    All,
    /// 1-based output row numbers, sorted and de-duplicated.
    Rows(Vec<usize>),
}

impl RowSelection {
    /// Parse a range list such as `"1-5, 8, 12-15"`.
    pub fn parse(input: &str) -> Result<Self, OutputError> {
        parse_row_ranges(input).map(RowSelection::Rows)
    }

    /// 0-based indices selected within a table of `len` rows.
    /// Numbers outside `1..=len` are ignored.
    pub fn indices(&self, len: usize) -> Vec<usize> {
        match self {
            RowSelection::All => (0..len).collect(),
            RowSelection::Rows(rows) => rows
                .iter()
                .filter(|&&row| (1..=len).contains(&row))
                .map(|row| row - 1)
                .collect(),
        }
    }
}

/// Storage location and annotation for a set of rows.
///
/// `None` and blank values leave the row unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub rows: RowSelection,
    pub storage_location: Option<String>,
    pub annotation: Option<String>,
}

impl Assignment {
    /// Assignment covering every row.
    pub fn all(storage_location: Option<String>, annotation: Option<String>) -> Self {
        Self {
            rows: RowSelection::All,
            storage_location,
            annotation,
        }
    }

    /// Assignment for a range list such as `"1-10, 17"`.
    pub fn for_ranges(
        ranges: &str,
        storage_location: Option<String>,
        annotation: Option<String>,
    ) -> Result<Self, OutputError> {
        Ok(Self {
            rows: RowSelection::parse(ranges)?,
            storage_location,
            annotation,
        })
    }

    /// Trimmed storage location, `None` when blank.
    pub fn storage_location(&self) -> Option<&str> {
        non_blank(self.storage_location.as_deref())
    }

    /// Trimmed annotation, `None` when blank.
    pub fn annotation(&self) -> Option<&str> {
        non_blank(self.annotation.as_deref())
    }

    /// True when applying the assignment would change nothing.
    pub fn is_noop(&self) -> bool {
        self.storage_location().is_none() && self.annotation().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse comma-separated row numbers and inclusive `start-end` ranges.
///
/// Returns sorted, de-duplicated 1-based row numbers. A reversed range
/// selects nothing.
pub fn parse_row_ranges(input: &str) -> Result<Vec<usize>, OutputError> {
    let invalid = |reason: String| OutputError::InvalidSelection {
        input: input.to_string(),
        reason,
    };
    let number = |text: &str| {
        text.trim()
            .parse::<usize>()
            .map_err(|_| invalid(format!("'{}' is not a row number", text.trim())))
    };

    let mut rows = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                if end.contains('-') {
                    return Err(invalid(format!("'{}' is not a range", part)));
                }
                let (start, end) = (number(start)?, number(end)?);
                rows.extend(start..=end);
            }
            None => rows.push(number(part)?),
        }
    }

    rows.sort_unstable();
    rows.dedup();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_ranges() {
        assert_eq!(parse_row_ranges("1-5, 8").unwrap(), vec![1, 2, 3, 4, 5, 8]);
        assert_eq!(parse_row_ranges("12-15,3,3 , 14").unwrap(), vec![3, 12, 13, 14, 15]);
        assert_eq!(parse_row_ranges(" 7 ").unwrap(), vec![7]);
        assert_eq!(parse_row_ranges("5-3").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_row_ranges("").unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_parse_row_ranges_rejects_garbage() {
        for input in ["a", "1-x", "1-2-3", "-4", "2,,b"] {
            let err = parse_row_ranges(input).unwrap_err();
            assert!(
                matches!(err, OutputError::InvalidSelection { .. }),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_indices_ignore_out_of_range() {
        let selection = RowSelection::parse("0, 2-4, 9").unwrap();
        assert_eq!(selection.indices(3), vec![1, 2]);
        assert_eq!(RowSelection::All.indices(3), vec![0, 1, 2]);
    }

    #[test]
    fn test_blank_values_are_noop() {
        let assignment = Assignment::all(Some("  ".into()), None);
        assert!(assignment.is_noop());

        let assignment = Assignment::all(Some(" A-01 ".into()), Some(String::new()));
        assert_eq!(assignment.storage_location(), Some("A-01"));
        assert_eq!(assignment.annotation(), None);
    }
}
