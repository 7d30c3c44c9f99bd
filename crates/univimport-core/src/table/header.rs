//! Header-row search for manifests with leading non-data rows.

use tracing::debug;

use super::{Result, TableExtractor};
use crate::error::TableStructureError;
use crate::models::cell::cell_at;
use crate::models::{Cell, ManifestRow, BUSINESS_COLUMNS};

/// Finds the first row holding every business column label and binds the
/// rows below it by label.
pub struct HeaderSearchExtractor;

impl HeaderSearchExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Index of the header row and the position of each business column.
    fn find_header(&self, grid: &[Vec<Cell>]) -> Option<(usize, [usize; 9])> {
        grid.iter().enumerate().find_map(|(idx, row)| {
            let labels: Vec<String> = row.iter().map(Cell::trimmed).collect();
            let mut positions = [0usize; 9];

            for (slot, required) in positions.iter_mut().zip(BUSINESS_COLUMNS) {
                *slot = labels.iter().position(|label| label == required)?;
            }

            Some((idx, positions))
        })
    }
}

impl Default for HeaderSearchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for HeaderSearchExtractor {
    fn extract(&self, grid: &[Vec<Cell>]) -> Result<Vec<ManifestRow>> {
        let (header_idx, positions) =
            self.find_header(grid)
                .ok_or_else(|| TableStructureError::HeaderNotFound {
                    expected: BUSINESS_COLUMNS.iter().map(|s| s.to_string()).collect(),
                    scanned: grid.len(),
                })?;

        debug!("Header row found at index {}", header_idx);

        let rows = grid[header_idx + 1..]
            .iter()
            .map(|row| ManifestRow::from_cells(positions.map(|pos| cell_at(row, pos).clone())))
            .collect();

        Ok(rows)
    }

    fn allows_decimal_ids(&self) -> bool {
        false
    }
}
