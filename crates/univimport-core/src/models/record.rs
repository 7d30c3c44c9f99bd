//! Record shapes flowing through the import pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// Source header labels of the nine business columns, in field order.
pub const BUSINESS_COLUMNS: [&str; 9] = [
    "Artikelnummer",
    "Benennung",
    "LHM-Nr.",
    "Charge",
    "Menge",
    "Einheit",
    "Stelltyp",
    "MHD",
    "Gesamtgewicht",
];

/// Output header labels, in output column order.
pub const OUTPUT_HEADERS: [&str; 12] = [
    "Nr.",
    "Artikel-Nr.",
    "Artikelbezeichnung",
    "LG ID",
    "Charge",
    "Menge PS",
    "Einheit",
    "Lademittel",
    "MHD",
    "Gewicht kg",
    "Lagerort",
    "Sonstiger Text",
];

/// One manifest row with canonical column identities but raw cell values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManifestRow {
    pub article_id: Cell,
    pub description: Cell,
    pub unit_id: Cell,
    pub batch: Cell,
    pub quantity: Cell,
    pub unit: Cell,
    pub load_carrier: Cell,
    pub expiry: Cell,
    pub weight: Cell,
}

impl ManifestRow {
    /// Build a row from cells given in [`BUSINESS_COLUMNS`] order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        let [article_id, description, unit_id, batch, quantity, unit, load_carrier, expiry, weight] =
            cells;
        Self {
            article_id,
            description,
            unit_id,
            batch,
            quantity,
            unit,
            load_carrier,
            expiry,
            weight,
        }
    }

    pub fn cells(&self) -> [&Cell; 9] {
        [
            &self.article_id,
            &self.description,
            &self.unit_id,
            &self.batch,
            &self.quantity,
            &self.unit,
            &self.load_carrier,
            &self.expiry,
            &self.weight,
        ]
    }

    /// True when no business column holds a value.
    pub fn is_empty(&self) -> bool {
        self.cells().iter().all(|c| c.is_empty())
    }
}

/// A manifest row after field normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    /// Cleaned numeric article id.
    pub article_id: String,
    /// Article description, `None` when the source cell was empty.
    pub description: Option<String>,
    /// Logistics-unit id, used as grouping value as-is.
    pub unit_id: Cell,
    /// Batch/lot id as read.
    pub batch: Cell,
    /// Non-negative quantity, zero on parse failure.
    pub quantity: Decimal,
    /// Unit of measure after relabeling.
    pub unit: Option<String>,
    /// Canonical load-carrier label, empty when unmapped.
    pub load_carrier: String,
    /// Best-before date.
    pub expiry: Option<NaiveDate>,
    /// Non-negative weight in kg, zero on parse failure.
    pub weight: Decimal,
}

/// One record per logistics unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRecord {
    pub unit_id: i64,
    pub article_id: String,
    pub description: String,
    /// Plain integer string, `"0"` when not numeric.
    pub batch: String,
    pub quantity: i64,
    pub unit: String,
    pub load_carrier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<NaiveDate>,
    /// Summed weight rounded to two decimals.
    pub weight: Decimal,
}

/// A finished row of the import files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub sequence: usize,
    pub article_id: String,
    pub description: String,
    pub unit_id: i64,
    pub batch: String,
    pub quantity: i64,
    pub unit: String,
    pub load_carrier: String,
    /// `dd.mm.yyyy` or empty.
    pub expiry: String,
    /// Comma-decimal weight text.
    pub weight: String,
    pub storage_location: String,
    pub annotation: String,
}

impl OutputRow {
    /// Field values in [`OUTPUT_HEADERS`] order.
    pub fn to_record(&self) -> [String; 12] {
        [
            self.sequence.to_string(),
            self.article_id.clone(),
            self.description.clone(),
            self.unit_id.to_string(),
            self.batch.clone(),
            self.quantity.to_string(),
            self.unit.clone(),
            self.load_carrier.clone(),
            self.expiry.clone(),
            self.weight.clone(),
            self.storage_location.clone(),
            self.annotation.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_row_emptiness() {
        assert!(ManifestRow::default().is_empty());

        let row = ManifestRow {
            description: Cell::from(""),
            ..Default::default()
        };
        assert!(!row.is_empty());
    }

    #[test]
    fn test_from_cells_order() {
        let row = ManifestRow::from_cells([
            Cell::from("1"),
            Cell::from("Widget"),
            Cell::Int(55),
            Cell::Int(7001),
            Cell::Int(10),
            Cell::from("Container"),
            Cell::from("Euro-Pool"),
            Cell::Int(45555),
            Cell::from("1.000,00"),
        ]);

        assert_eq!(row.unit_id, Cell::Int(55));
        assert_eq!(row.load_carrier, Cell::from("Euro-Pool"));
        assert_eq!(row.weight, Cell::from("1.000,00"));
    }
}
