//! Printable spreadsheet copy of the import table.

use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};

use crate::error::OutputError;
use crate::models::config::OutputConfig;
use crate::models::{OutputRow, OUTPUT_HEADERS};

/// Page margins in inches: left, right, top, bottom, header, footer.
const MARGINS: (f64, f64, f64, f64, f64, f64) = (0.3, 0.3, 0.5, 0.5, 0.3, 0.3);

/// Output columns written as numbers rather than text.
const NUMERIC_COLUMNS: [usize; 3] = [0, 3, 5];

/// Sheet name, width cap and optional banner line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub max_column_width: usize,
    /// Free text placed in A1, above the table.
    pub banner: Option<String>,
}

impl SheetLayout {
    pub fn from_config(config: &OutputConfig, banner: Option<String>) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
            max_column_width: config.max_column_width,
            banner: banner.filter(|b| !b.trim().is_empty()),
        }
    }

    /// Row of the table header: 0, or 2 when a banner precedes it.
    pub fn header_row(&self) -> RowNum {
        if self.banner.is_some() { 2 } else { 0 }
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default(), None)
    }
}

/// Render `rows` as a single-sheet workbook, set up for a landscape
/// one-page printout.
pub fn render_xlsx(rows: &[OutputRow], layout: &SheetLayout) -> Result<Vec<u8>, OutputError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&layout.sheet_name)?;

    let mut widths: Vec<usize> = OUTPUT_HEADERS.iter().map(|h| h.chars().count()).collect();

    if let Some(banner) = &layout.banner {
        sheet.write_string(0, 0, banner)?;
        widths[0] = widths[0].max(banner.chars().count());
    }

    let header_row = layout.header_row();
    for (col, header) in OUTPUT_HEADERS.iter().enumerate() {
        sheet.write_string(header_row, col as ColNum, *header)?;
    }

    for (offset, row) in rows.iter().enumerate() {
        let row_num = header_row + 1 + offset as RowNum;
        write_row(sheet, row_num, row)?;

        for (col, value) in row.to_record().iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
        }
    }

    let last_row = header_row + rows.len() as RowNum;
    let last_col = (OUTPUT_HEADERS.len() - 1) as ColNum;
    sheet.set_print_area(0, 0, last_row, last_col)?;
    sheet.set_landscape();
    sheet.set_print_fit_to_pages(1, 1);
    let (left, right, top, bottom, header, footer) = MARGINS;
    sheet.set_margins(left, right, top, bottom, header, footer);

    for (col, width) in widths.into_iter().enumerate() {
        let width = (width + 2).min(layout.max_column_width);
        sheet.set_column_width(col as ColNum, width as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_row(sheet: &mut Worksheet, row_num: RowNum, row: &OutputRow) -> Result<(), OutputError> {
    let numbers = [row.sequence as f64, row.unit_id as f64, row.quantity as f64];

    for (col, value) in row.to_record().iter().enumerate() {
        match NUMERIC_COLUMNS.iter().position(|&c| c == col) {
            Some(slot) => sheet.write_number(row_num, col as ColNum, numbers[slot])?,
            None => sheet.write_string(row_num, col as ColNum, value)?,
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use calamine::{Data, Reader, Xlsx};

    fn row(sequence: usize) -> OutputRow {
        OutputRow {
            sequence,
            article_id: "NG 10030004.112".to_string(),
            description: "Marzipan roh in Säcken zu 25 kg".to_string(),
            unit_id: 900,
            batch: "240001".to_string(),
            quantity: 1,
            unit: "BigBag".to_string(),
            load_carrier: String::new(),
            expiry: "05.03.2025".to_string(),
            weight: "1250,5".to_string(),
            storage_location: "A-01".to_string(),
            annotation: String::new(),
        }
    }

    fn read_back(bytes: Vec<u8>, sheet: &str) -> calamine::Range<Data> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(sheet).unwrap()
    }

    #[test]
    fn test_table_without_banner() {
        let bytes = render_xlsx(&[row(1), row(2)], &SheetLayout::default()).unwrap();
        let range = read_back(bytes, "Ruecktour");

        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Nr.".into())));
        assert_eq!(range.get_value((2, 0)), Some(&Data::Float(2.0)));
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(900.0)));
        assert_eq!(range.get_value((1, 4)), Some(&Data::String("240001".into())));
        assert_eq!(range.get_value((1, 9)), Some(&Data::String("1250,5".into())));
    }

    #[test]
    fn test_banner_shifts_table() {
        let layout = SheetLayout {
            banner: Some("Rücktour KW 38".to_string()),
            ..SheetLayout::default()
        };

        let bytes = render_xlsx(&[row(1)], &layout).unwrap();
        let range = read_back(bytes, "Ruecktour");

        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Rücktour KW 38".into())));
        assert_eq!(range.get_value((2, 1)), Some(&Data::String("Artikel-Nr.".into())));
        assert_eq!(range.get_value((3, 1)), Some(&Data::String("NG 10030004.112".into())));
    }

    #[test]
    fn test_blank_banner_is_dropped() {
        let layout = SheetLayout::from_config(&OutputConfig::default(), Some("  ".into()));
        assert_eq!(layout.banner, None);
        assert_eq!(layout.header_row(), 0);
    }
}
