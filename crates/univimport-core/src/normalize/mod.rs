//! Field normalizers turning raw cells into canonical values.

pub mod categories;
pub mod dates;
pub mod numbers;
pub mod patterns;
pub mod weight;

pub use categories::{map_load_carrier, normalize_unit};
pub use dates::{format_date, from_serial, parse_date_text, parse_flexible_date};
pub use numbers::{
    batch_code, extract_leading_number, integer_or_zero, is_article_id, pad_article_id,
    parse_quantity, truncate_to_i64,
};
pub use weight::{format_weight, parse_weight};

use crate::models::config::LoadCarrierRule;
use crate::models::{CanonicalRecord, ManifestRow};

/// Applies every field normalizer to a manifest row.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    load_carriers: Vec<LoadCarrierRule>,
}

impl RecordNormalizer {
    pub fn new(load_carriers: Vec<LoadCarrierRule>) -> Self {
        Self { load_carriers }
    }

    /// Normalize one row. Never fails: unparseable fields take their defaults.
    pub fn normalize(&self, row: ManifestRow) -> CanonicalRecord {
        CanonicalRecord {
            article_id: row.article_id.trimmed(),
            description: (!row.description.is_empty()).then(|| row.description.text()),
            quantity: parse_quantity(&row.quantity),
            unit: normalize_unit(&row.unit),
            load_carrier: map_load_carrier(&row.load_carrier, &self.load_carriers),
            expiry: parse_flexible_date(&row.expiry),
            weight: parse_weight(&row.weight.text()),
            unit_id: row.unit_id,
            batch: row.batch,
        }
    }

    pub fn normalize_all(&self, rows: Vec<ManifestRow>) -> Vec<CanonicalRecord> {
        rows.into_iter().map(|row| self.normalize(row)).collect()
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(crate::models::config::MappingConfig::default().load_carriers)
    }
}
