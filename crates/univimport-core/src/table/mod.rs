//! Manifest table extraction.
//!
//! A manifest arrives as a headerless grid. Depending on the customer the
//! columns are either found through a header row ([`HeaderSearchExtractor`])
//! or sit at fixed offsets ([`PositionalExtractor`]). Both produce
//! [`ManifestRow`]s, which [`retain_valid_rows`] then filters the same way.

mod header;
mod positional;

pub use header::HeaderSearchExtractor;
pub use positional::{PositionalExtractor, PositionalLayout, DEFAULT_QUANTITY, DEFAULT_UNIT};

use tracing::debug;

use crate::error::TableStructureError;
use crate::models::{Cell, Customer, InputMode, ManifestRow};
use crate::normalize::is_article_id;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, TableStructureError>;

/// Trait for manifest table extractors.
pub trait TableExtractor {
    /// Bind grid rows to the canonical business columns.
    fn extract(&self, grid: &[Vec<Cell>]) -> Result<Vec<ManifestRow>>;

    /// Whether article ids may carry a decimal fraction.
    fn allows_decimal_ids(&self) -> bool;
}

/// Extractor matching the customer's input layout.
pub fn extractor_for(customer: Customer) -> Box<dyn TableExtractor> {
    match customer.input_mode() {
        InputMode::HeaderSearch => Box::new(HeaderSearchExtractor::new()),
        InputMode::Positional => Box::new(PositionalExtractor::new()),
    }
}

/// Drop rows without any business value and rows whose article id is not
/// a number of the expected shape. Kept rows carry the trimmed id text.
pub fn retain_valid_rows(rows: Vec<ManifestRow>, allow_decimal: bool) -> Vec<ManifestRow> {
    let total = rows.len();

    let kept: Vec<ManifestRow> = rows
        .into_iter()
        .filter(|row| !row.is_empty())
        .filter_map(|mut row| {
            let id = row.article_id.trimmed();
            if !is_article_id(&id, allow_decimal) {
                return None;
            }
            row.article_id = Cell::Text(id);
            Some(row)
        })
        .collect();

    debug!("Kept {} of {} rows with a valid article id", kept.len(), total);
    kept
}
