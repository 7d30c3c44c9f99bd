//! Fixed-offset extraction for headerless manifests.

use tracing::debug;

use super::{Result, TableExtractor};
use crate::models::cell::cell_at;
use crate::models::{Cell, ManifestRow};
use crate::normalize::extract_leading_number;

/// Quantity of every positional row; the source carries none.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Unit of every positional row.
pub const DEFAULT_UNIT: &str = "BigBag";

/// Zero-based column offsets of the positional layout.
///
/// These offsets are an upstream layout contract and must not be inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalLayout {
    pub article_id: usize,
    pub weight: usize,
    pub expiry: usize,
    pub batch: usize,
    pub unit_id: usize,
}

impl Default for PositionalLayout {
    fn default() -> Self {
        Self {
            article_id: 0,
            weight: 1,
            expiry: 5,
            batch: 6,
            unit_id: 7,
        }
    }
}

/// Maps fixed column offsets to business columns.
///
/// Descriptions stay blank here and are filled from the article catalog.
pub struct PositionalExtractor {
    layout: PositionalLayout,
}

impl PositionalExtractor {
    pub fn new() -> Self {
        Self {
            layout: PositionalLayout::default(),
        }
    }

    pub fn layout(&self) -> PositionalLayout {
        self.layout
    }

    fn map_row(&self, row: &[Cell]) -> ManifestRow {
        let layout = &self.layout;
        let id_text = cell_at(row, layout.article_id).trimmed();

        ManifestRow {
            article_id: Cell::Text(extract_leading_number(&id_text)),
            description: Cell::Text(String::new()),
            unit_id: cell_at(row, layout.unit_id).clone(),
            batch: cell_at(row, layout.batch).clone(),
            quantity: Cell::Int(DEFAULT_QUANTITY),
            unit: Cell::Text(DEFAULT_UNIT.to_string()),
            load_carrier: Cell::Text(String::new()),
            expiry: cell_at(row, layout.expiry).clone(),
            weight: cell_at(row, layout.weight).clone(),
        }
    }
}

impl Default for PositionalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for PositionalExtractor {
    fn extract(&self, grid: &[Vec<Cell>]) -> Result<Vec<ManifestRow>> {
        let rows: Vec<ManifestRow> = grid
            .iter()
            .filter(|row| !cell_at(row, self.layout.article_id).is_empty())
            .map(|row| self.map_row(row))
            .collect();

        debug!("Mapped {} of {} positional rows", rows.len(), grid.len());
        Ok(rows)
    }

    fn allows_decimal_ids(&self) -> bool {
        true
    }
}
