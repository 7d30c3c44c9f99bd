//! Article master catalog: normalized article key to display description.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::models::cell::cell_at;
use crate::models::{Cell, ManifestRow};
use crate::normalize::extract_leading_number;
use crate::workbook::{read_sheets, Sheet};

/// Header substring locating the match-key column.
pub const MATCH_COLUMN: &str = "match";
/// Header substring locating the description column.
pub const DESCRIPTION_COLUMN: &str = "bezeichnung";
/// Header substring locating the customer column.
pub const CUSTOMER_COLUMN: &str = "kunde";

/// Lookup from normalized article key to description.
#[derive(Debug, Clone, Default)]
pub struct ArticleCatalog {
    sheet: String,
    entries: HashMap<String, String>,
}

impl ArticleCatalog {
    /// Sheet the catalog was built from.
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Description for an already normalized key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Description for free text, normalized the same way as catalog keys.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.get(&extract_leading_number(text))
    }

    /// Fill row descriptions from the catalog, keyed by the article id.
    ///
    /// Unknown ids get an empty description. Returns the distinct ids that
    /// had no entry, in first-seen order.
    pub fn fill_descriptions(&self, rows: &mut [ManifestRow]) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();

        for row in rows.iter_mut() {
            let key = row.article_id.trimmed();
            let description = match self.get(&key) {
                Some(description) => description.to_string(),
                None => {
                    if !missing.contains(&key) {
                        missing.push(key);
                    }
                    String::new()
                }
            };
            row.description = Cell::Text(description);
        }

        missing
    }
}

/// Load the catalog from the first sheet of `path` that has all three
/// required columns, optionally keeping only rows whose customer column
/// contains `customer_filter` (case-insensitive).
pub fn load_catalog(path: &Path, customer_filter: Option<&str>) -> Result<ArticleCatalog> {
    let sheets = read_sheets(path)?;
    let catalog = resolve_catalog(path, &sheets, customer_filter)?;

    info!(
        "Loaded {} catalog entries from sheet '{}'",
        catalog.len(),
        catalog.sheet
    );

    Ok(catalog)
}

/// Probe `sheets` in order and build the catalog from the first one that
/// satisfies the column contract.
pub fn resolve_catalog(
    path: &Path,
    sheets: &[Sheet],
    customer_filter: Option<&str>,
) -> std::result::Result<ArticleCatalog, CatalogError> {
    let mut last = None;

    for sheet in sheets {
        match build_from_sheet(sheet, customer_filter) {
            Ok(catalog) => return Ok(catalog),
            Err(err) => {
                debug!("Skipping catalog sheet: {}", err);
                last = Some(Box::new(err));
            }
        }
    }

    Err(CatalogError::NoMatchingSheet {
        path: path.to_path_buf(),
        last,
    })
}

/// Locations of the three catalog column roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CatalogColumns {
    key: usize,
    description: usize,
    customer: usize,
}

fn build_from_sheet(
    sheet: &Sheet,
    customer_filter: Option<&str>,
) -> std::result::Result<ArticleCatalog, CatalogError> {
    let Some((header, data)) = sheet.rows.split_first() else {
        return Err(CatalogError::MissingColumn {
            sheet: sheet.name.clone(),
            role: MATCH_COLUMN,
            found: Vec::new(),
        });
    };

    let headers: Vec<String> = header.iter().map(Cell::trimmed).collect();
    let columns = CatalogColumns {
        key: find_column(&sheet.name, &headers, MATCH_COLUMN)?,
        description: find_column(&sheet.name, &headers, DESCRIPTION_COLUMN)?,
        customer: find_column(&sheet.name, &headers, CUSTOMER_COLUMN)?,
    };

    let filter = customer_filter.map(str::to_lowercase);
    let mut entries = HashMap::new();

    for row in data {
        let cell = |idx: usize| cell_at(row, idx);

        if let Some(filter) = &filter {
            if !cell(columns.customer).text().to_lowercase().contains(filter.as_str()) {
                continue;
            }
        }

        let (key_cell, description_cell) = (cell(columns.key), cell(columns.description));
        if key_cell.is_blank() || description_cell.is_blank() {
            continue;
        }

        let key = extract_leading_number(&key_cell.text());
        if key.is_empty() {
            continue;
        }

        entries
            .entry(key)
            .or_insert_with(|| description_cell.trimmed());
    }

    debug!(
        "Catalog sheet '{}': columns {:?}, {} entries",
        sheet.name,
        columns,
        entries.len()
    );

    Ok(ArticleCatalog {
        sheet: sheet.name.clone(),
        entries,
    })
}

/// First header containing `needle`, case-insensitive.
fn find_column(
    sheet: &str,
    headers: &[String],
    needle: &'static str,
) -> std::result::Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h.to_lowercase().contains(needle))
        .ok_or_else(|| CatalogError::MissingColumn {
            sheet: sheet.to_string(),
            role: needle,
            found: headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
        })
}
