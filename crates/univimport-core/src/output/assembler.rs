//! Final output rows: numbering, operator values, id decoration.

use tracing::debug;

use super::selection::Assignment;
use crate::models::{AggregatedRecord, Customer, OutputRow};
use crate::normalize::{format_date, format_weight};

/// Annotation marking sale goods, compared case-insensitively.
pub const SALE_GOODS_MARKER: &str = "verkaufsware";

/// Suffix appended to the article id of sale-goods rows.
pub const SALE_GOODS_SUFFIX: &str = " S";

/// Turns aggregated records into rows of the fixed output schema.
pub struct OutputAssembler {
    customer: Customer,
}

impl OutputAssembler {
    pub fn new(customer: Customer) -> Self {
        Self { customer }
    }

    /// Number the records from 1, apply `assignments` in order (later ones
    /// override earlier ones), then decorate ids and render dates and
    /// weights as text.
    pub fn assemble(&self, records: &[AggregatedRecord], assignments: &[Assignment]) -> Vec<OutputRow> {
        let mut rows: Vec<OutputRow> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| OutputRow {
                sequence: idx + 1,
                article_id: record.article_id.clone(),
                description: record.description.clone(),
                unit_id: record.unit_id,
                batch: record.batch.clone(),
                quantity: record.quantity,
                unit: record.unit.clone(),
                load_carrier: record.load_carrier.clone(),
                expiry: record.expiry.map(format_date).unwrap_or_default(),
                weight: format_weight(record.weight),
                storage_location: String::new(),
                annotation: String::new(),
            })
            .collect();

        for assignment in assignments {
            apply_assignment(&mut rows, assignment);
        }

        let prefix = self.customer.id_prefix();
        for row in &mut rows {
            if row.annotation.to_lowercase() == SALE_GOODS_MARKER {
                row.article_id.push_str(SALE_GOODS_SUFFIX);
            }
            row.article_id.insert_str(0, prefix);
        }

        rows
    }
}

fn apply_assignment(rows: &mut [OutputRow], assignment: &Assignment) {
    if assignment.is_noop() {
        debug!("Skipping assignment without values for {:?}", assignment.rows);
        return;
    }

    let indices = assignment.rows.indices(rows.len());
    if indices.is_empty() {
        debug!("Assignment {:?} selects no existing rows", assignment.rows);
        return;
    }

    for idx in indices {
        let row = &mut rows[idx];
        if let Some(storage) = assignment.storage_location() {
            row.storage_location = storage.to_string();
        }
        if let Some(annotation) = assignment.annotation() {
            row.annotation = annotation.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::selection::RowSelection;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn record(unit_id: i64, article_id: &str) -> AggregatedRecord {
        AggregatedRecord {
            unit_id,
            article_id: article_id.to_string(),
            description: "Widget".to_string(),
            batch: "7001".to_string(),
            quantity: 10,
            unit: "UMK".to_string(),
            load_carrier: "Euro".to_string(),
            expiry: NaiveDate::from_ymd_opt(2024, 9, 20),
            weight: Decimal::from(1000),
        }
    }

    #[test]
    fn test_assemble_single_row() {
        let rows = OutputAssembler::new(Customer::Mb).assemble(&[record(55, "000123")], &[]);

        let expected = OutputRow {
            sequence: 1,
            article_id: "MB 000123".to_string(),
            description: "Widget".to_string(),
            unit_id: 55,
            batch: "7001".to_string(),
            quantity: 10,
            unit: "UMK".to_string(),
            load_carrier: "Euro".to_string(),
            expiry: "20.09.2024".to_string(),
            weight: "1000,0".to_string(),
            storage_location: String::new(),
            annotation: String::new(),
        };
        assert_eq!(rows, vec![expected]);
    }

    #[test]
    fn test_assignments_and_sale_goods_suffix() {
        let records = vec![record(1, "1"), record(2, "2"), record(3, "3")];
        let assignments = vec![
            Assignment::all(Some("Halle 1".into()), Some("Rückware".into())),
            Assignment {
                rows: RowSelection::Rows(vec![2, 3, 9]),
                storage_location: Some(String::new()),
                annotation: Some("Verkaufsware".into()),
            },
            Assignment::for_ranges("3", Some("Halle 2".into()), None).unwrap(),
        ];

        let rows = OutputAssembler::new(Customer::Ng).assemble(&records, &assignments);

        let summary: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.article_id.as_str(), r.storage_location.as_str(), r.annotation.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("NG 1", "Halle 1", "Rückware"),
                ("NG 2 S", "Halle 1", "Verkaufsware"),
                ("NG 3 S", "Halle 2", "Verkaufsware"),
            ]
        );
        assert_eq!(rows.iter().map(|r| r.sequence).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_expiry_renders_empty() {
        let mut rec = record(1, "1");
        rec.expiry = None;
        rec.weight = Decimal::new(1234, 2);

        let rows = OutputAssembler::new(Customer::Ng).assemble(&[rec], &[]);

        assert_eq!(rows[0].expiry, "");
        assert_eq!(rows[0].weight, "12,34");
    }
}
