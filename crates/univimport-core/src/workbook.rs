//! Spreadsheet workbook reading.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::WorkbookError;
use crate::models::Cell;

/// A headerless grid of cells, rows anchored at A1.
pub type Grid = Vec<Vec<Cell>>;

/// A named sheet with its cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Grid,
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Error(format!("{:?}", e)),
        }
    }
}

/// Read every sheet of a workbook, in workbook order.
pub fn read_sheets(path: &Path) -> Result<Vec<Sheet>, WorkbookError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| WorkbookError::Sheet {
                sheet: name.clone(),
                source,
            })?;

        let rows = range_to_grid(&range);
        debug!("Read sheet '{}' with {} rows", name, rows.len());
        sheets.push(Sheet { name, rows });
    }

    Ok(sheets)
}

/// Read the first sheet of a workbook.
pub fn read_first_sheet(path: &Path) -> Result<Sheet, WorkbookError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| WorkbookError::NoSheets(path.to_path_buf()))?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|source| WorkbookError::Sheet {
            sheet: name.clone(),
            source,
        })?;

    Ok(Sheet {
        rows: range_to_grid(&range),
        name,
    })
}

/// Convert a used range into a grid whose column 0 is spreadsheet column A.
///
/// A used range starts at its first non-empty cell; the leading columns are
/// padded back so that fixed column offsets stay valid.
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    range
        .rows()
        .map(|row| {
            std::iter::repeat_n(Cell::Empty, leading)
                .chain(row.iter().map(Cell::from))
                .collect()
        })
        .collect()
}
