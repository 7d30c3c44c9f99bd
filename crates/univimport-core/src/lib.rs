//! Core library for converting warehouse shipment manifests into logistics
//! import files.
//!
//! This crate provides:
//! - Workbook reading into untyped cell grids
//! - Manifest table extraction (header search or fixed column offsets)
//! - Field normalization (ids, quantities, weights, dates, categories)
//! - Article catalog resolution
//! - Aggregation per logistics unit
//! - CSV and spreadsheet import file rendering

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod models;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod table;
pub mod workbook;

pub use aggregate::{Aggregator, UnitKey};
pub use catalog::{load_catalog, ArticleCatalog};
pub use error::{ImportError, Result};
pub use models::{AggregatedRecord, CanonicalRecord, Cell, Customer, ImportConfig, InputMode, ManifestRow, OutputRow};
pub use output::{parse_row_ranges, Assignment, RowSelection};
pub use pipeline::{ImportReport, ImportRequest, Pipeline, PreparedImport, RenderedFiles};
pub use table::{extractor_for, TableExtractor};
