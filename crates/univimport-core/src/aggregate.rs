//! Grouping of normalized records per logistics unit.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AggregatedRecord, CanonicalRecord, Cell};
use crate::normalize::{batch_code, integer_or_zero, pad_article_id, truncate_to_i64};

/// Logistics-unit id as a grouping value.
///
/// Numeric ids group and sort numerically, textual ids sort after them.
#[derive(Debug, Clone)]
pub enum UnitKey {
    Number(f64),
    Text(String),
}

impl UnitKey {
    /// Grouping value of a cell, `None` for empty cells.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        let number = match cell {
            Cell::Empty => return None,
            Cell::Int(i) => *i as f64,
            Cell::Float(f) | Cell::DateTime(f) => *f,
            Cell::Bool(b) => f64::from(u8::from(*b)),
            Cell::Text(s) => return Some(UnitKey::Text(s.clone())),
            Cell::Error(e) => return Some(UnitKey::Text(e.clone())),
        };

        // Adding 0.0 folds -0.0 into 0.0.
        (!number.is_nan()).then_some(UnitKey::Number(number + 0.0))
    }

    /// Integer id, zero when the key is not numeric.
    pub fn to_i64(&self) -> i64 {
        match self {
            UnitKey::Number(n) => integer_or_zero(&Cell::Float(*n)),
            UnitKey::Text(s) => integer_or_zero(&Cell::Text(s.clone())),
        }
    }
}

impl Ord for UnitKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (UnitKey::Number(a), UnitKey::Number(b)) => a.total_cmp(b),
            (UnitKey::Number(_), UnitKey::Text(_)) => Ordering::Less,
            (UnitKey::Text(_), UnitKey::Number(_)) => Ordering::Greater,
            (UnitKey::Text(a), UnitKey::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for UnitKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for UnitKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UnitKey {}

/// Running reduction of one group.
#[derive(Debug, Default)]
struct Group {
    article_id: Option<String>,
    description: Option<String>,
    batch: Option<Cell>,
    unit: Option<String>,
    load_carrier: Option<String>,
    expiry: Option<NaiveDate>,
    quantity: Decimal,
    weight: Decimal,
}

impl Group {
    fn push(&mut self, record: CanonicalRecord) {
        self.article_id.get_or_insert(record.article_id);
        if let Some(description) = record.description {
            self.description.get_or_insert(description);
        }
        if !record.batch.is_empty() {
            self.batch.get_or_insert(record.batch);
        }
        if let Some(unit) = record.unit {
            self.unit.get_or_insert(unit);
        }
        self.load_carrier.get_or_insert(record.load_carrier);
        if let Some(expiry) = record.expiry {
            self.expiry.get_or_insert(expiry);
        }
        // Sums beyond the decimal range clamp instead of aborting the run.
        self.quantity = self.quantity.saturating_add(record.quantity);
        self.weight = self.weight.saturating_add(record.weight);
    }

    fn finish(self, key: &UnitKey, pad_article_ids: bool) -> AggregatedRecord {
        let article_id = self.article_id.unwrap_or_default();
        let article_id = if pad_article_ids {
            pad_article_id(article_id.trim())
        } else {
            article_id.trim().to_string()
        };

        AggregatedRecord {
            unit_id: key.to_i64(),
            article_id,
            description: self.description.unwrap_or_default(),
            batch: batch_code(self.batch.as_ref().unwrap_or(&Cell::Empty)),
            quantity: truncate_to_i64(self.quantity),
            unit: self.unit.unwrap_or_default(),
            load_carrier: self.load_carrier.unwrap_or_default(),
            expiry: self.expiry,
            weight: self.weight.round_dp(2),
        }
    }
}

/// Reduces normalized records to one record per logistics unit.
///
/// Quantity and weight are summed; every other field takes the first
/// non-empty value in source order.
pub struct Aggregator {
    pad_article_ids: bool,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            pad_article_ids: false,
        }
    }

    /// Zero-pad article ids to six digits.
    pub fn with_article_padding(mut self, pad: bool) -> Self {
        self.pad_article_ids = pad;
        self
    }

    /// Group records by logistics-unit id, in ascending id order.
    /// Records without a logistics-unit id are skipped.
    pub fn aggregate(&self, records: Vec<CanonicalRecord>) -> Vec<AggregatedRecord> {
        let total = records.len();
        let mut groups: BTreeMap<UnitKey, Group> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            let Some(key) = UnitKey::from_cell(&record.unit_id) else {
                skipped += 1;
                continue;
            };
            groups.entry(key).or_default().push(record);
        }

        debug!(
            "Aggregated {} records into {} units ({} without unit id)",
            total,
            groups.len(),
            skipped
        );

        groups
            .into_iter()
            .map(|(key, group)| group.finish(&key, self.pad_article_ids))
            .collect()
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(unit_id: Cell, article: &str, description: &str, quantity: i64, weight: &str) -> CanonicalRecord {
        CanonicalRecord {
            article_id: article.to_string(),
            description: Some(description.to_string()),
            unit_id,
            batch: Cell::Float(7001.0),
            quantity: Decimal::from(quantity),
            unit: Some("UMK".to_string()),
            load_carrier: "Euro".to_string(),
            expiry: NaiveDate::from_ymd_opt(2024, 9, 20),
            weight: Decimal::from_str(weight).unwrap(),
        }
    }

    #[test]
    fn test_group_sums_and_first_values() {
        let records = vec![
            record(Cell::Int(55), "123", "Erster", 3, "100.125"),
            record(Cell::Float(55.0), "456", "Zweiter", 4, "200.2"),
        ];

        let result = Aggregator::new().aggregate(records);

        assert_eq!(result.len(), 1);
        let unit = &result[0];
        assert_eq!(unit.unit_id, 55);
        assert_eq!(unit.quantity, 7);
        assert_eq!(unit.description, "Erster");
        assert_eq!(unit.article_id, "123");
        assert_eq!(unit.batch, "7001");
        assert_eq!(unit.weight, Decimal::from_str("300.32").unwrap());
    }

    #[test]
    fn test_groups_sorted_by_unit_id() {
        let records = vec![
            record(Cell::Int(900), "1", "a", 1, "1"),
            record(Cell::from("LHM-7"), "2", "b", 1, "1"),
            record(Cell::Int(12), "3", "c", 1, "1"),
            record(Cell::Empty, "4", "d", 1, "1"),
        ];

        let result = Aggregator::new().aggregate(records);

        let ids: Vec<(i64, &str)> = result
            .iter()
            .map(|r| (r.unit_id, r.article_id.as_str()))
            .collect();
        assert_eq!(ids, vec![(12, "3"), (900, "1"), (0, "2")]);
    }

    #[test]
    fn test_first_non_empty_value_wins() {
        let mut first = record(Cell::Int(1), "1", "x", 1, "1");
        first.description = None;
        first.batch = Cell::Empty;
        first.expiry = None;
        let mut second = record(Cell::Int(1), "1", "Beschreibung", 1, "1");
        second.batch = Cell::from("ABC");

        let result = Aggregator::new().aggregate(vec![first, second]);

        assert_eq!(result[0].description, "Beschreibung");
        assert_eq!(result[0].batch, "0");
        assert_eq!(result[0].expiry, NaiveDate::from_ymd_opt(2024, 9, 20));
    }

    #[test]
    fn test_article_padding() {
        let records = vec![record(Cell::Int(1), "123", "x", 1, "1")];

        let padded = Aggregator::new()
            .with_article_padding(true)
            .aggregate(records.clone());
        let plain = Aggregator::new().aggregate(records);

        assert_eq!(padded[0].article_id, "000123");
        assert_eq!(plain[0].article_id, "123");
    }

    #[test]
    fn test_fractional_quantity_truncates() {
        let mut a = record(Cell::Int(1), "1", "x", 0, "0");
        a.quantity = Decimal::from_str("1.5").unwrap();
        let mut b = record(Cell::Int(1), "1", "x", 0, "0");
        b.quantity = Decimal::from_str("1.25").unwrap();

        let result = Aggregator::new().aggregate(vec![a, b]);

        assert_eq!(result[0].quantity, 2);
    }

    #[test]
    fn test_oversized_sums_saturate() {
        let huge = "50000000000000000000000000000";
        let mut a = record(Cell::Int(55), "1", "x", 0, huge);
        a.quantity = Decimal::from_str(huge).unwrap();
        let b = a.clone();

        let result = Aggregator::new().aggregate(vec![a, b]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].weight, Decimal::MAX);
        assert_eq!(result[0].quantity, 0);
    }

    #[test]
    fn test_unit_key_ordering() {
        assert_eq!(UnitKey::Number(55.0), UnitKey::Number(55.0));
        assert!(UnitKey::Number(1e9) < UnitKey::Text("1".into()));
        assert_eq!(UnitKey::from_cell(&Cell::Float(-0.0)), Some(UnitKey::Number(0.0)));
        assert_eq!(UnitKey::from_cell(&Cell::Float(f64::NAN)), None);
        assert_eq!(UnitKey::Text("55".into()).to_i64(), 55);
    }
}
