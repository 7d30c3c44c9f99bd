//! Error types for the univimport-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the univimport library.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The manifest workbook for the selected customer does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Workbook could not be opened or read.
    #[error("workbook error: {0}")]
    Workbook(#[from] WorkbookError),

    /// Article catalog has no usable sheet.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The manifest table could not be located.
    #[error("table structure error: {0}")]
    Table(#[from] TableStructureError),

    /// Writing the import files failed.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading spreadsheet workbooks.
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// Failed to open/parse the workbook file.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Failed to read a single sheet.
    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// The workbook contains no sheets at all.
    #[error("workbook {} has no sheets", .0.display())]
    NoSheets(PathBuf),
}

/// Errors related to the article catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A sheet lacks one of the required column roles.
    #[error("sheet '{sheet}' has no column containing '{role}' (columns: {found:?})")]
    MissingColumn {
        sheet: String,
        role: &'static str,
        found: Vec<String>,
    },

    /// No sheet of the workbook offers all required columns.
    #[error("no sheet in {} offers the columns match/bezeichnung/kunde{}", .path.display(), last_failure(.last))]
    NoMatchingSheet {
        path: PathBuf,
        last: Option<Box<CatalogError>>,
    },
}

fn last_failure(last: &Option<Box<CatalogError>>) -> String {
    match last {
        Some(err) => format!("; last failure: {}", err),
        None => String::new(),
    }
}

/// Errors related to locating the manifest table.
#[derive(Error, Debug)]
pub enum TableStructureError {
    /// No row contains every required header label.
    #[error("no header row containing all of {expected:?} found in {scanned} rows")]
    HeaderNotFound {
        expected: Vec<String>,
        scanned: usize,
    },
}

/// Errors related to producing the output files.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet serialization failed.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// A row selection could not be parsed.
    #[error("invalid row selection '{input}': {reason}")]
    InvalidSelection { input: String, reason: String },
}

/// Result type for the univimport library.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_sheet_reports_last_failure() {
        let err = CatalogError::NoMatchingSheet {
            path: PathBuf::from("artikel.xlsx"),
            last: Some(Box::new(CatalogError::MissingColumn {
                sheet: "Tabelle2".to_string(),
                role: "kunde",
                found: vec!["Match".to_string(), "Bezeichnung".to_string()],
            })),
        };

        let msg = err.to_string();
        assert!(msg.contains("artikel.xlsx"));
        assert!(msg.contains("Tabelle2"));
        assert!(msg.contains("kunde"));
    }

    #[test]
    fn test_header_not_found_lists_expected() {
        let err = TableStructureError::HeaderNotFound {
            expected: vec!["Artikelnummer".to_string(), "MHD".to_string()],
            scanned: 12,
        };

        let msg = err.to_string();
        assert!(msg.contains("Artikelnummer"));
        assert!(msg.contains("12 rows"));
    }
}
