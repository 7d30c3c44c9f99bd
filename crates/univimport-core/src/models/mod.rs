//! Data models for the import pipeline.

pub mod cell;
pub mod config;
pub mod customer;
pub mod record;

pub use cell::Cell;
pub use config::ImportConfig;
pub use customer::{Customer, InputMode};
pub use record::{AggregatedRecord, CanonicalRecord, ManifestRow, OutputRow, BUSINESS_COLUMNS, OUTPUT_HEADERS};
