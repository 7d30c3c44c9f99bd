//! Semicolon-separated import file.

use csv::{Terminator, WriterBuilder};

use crate::error::OutputError;
use crate::models::{OutputRow, OUTPUT_HEADERS};

/// UTF-8 byte-order mark, expected by the importing system.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Field delimiter of the import file.
pub const DELIMITER: u8 = b';';

/// Render `rows` with a header line, BOM-prefixed and CRLF-terminated.
pub fn render_csv(rows: &[OutputRow]) -> Result<Vec<u8>, OutputError> {
    let mut buf: Vec<u8> = Vec::new();
    buf.extend_from_slice(&UTF8_BOM);

    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::CRLF)
        .from_writer(vec![]);

    wtr.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }

    let mut inner = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    buf.append(&mut inner);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(annotation: &str) -> OutputRow {
        OutputRow {
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
            annotation: annotation.to_string(),
        }
    }

    #[test]
    fn test_render_csv() {
        let bytes = render_csv(&[row("")]).unwrap();

        assert_eq!(&bytes[..3], &UTF8_BOM);
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(
            text,
            "Nr.;Artikel-Nr.;Artikelbezeichnung;LG ID;Charge;Menge PS;Einheit;Lademittel;MHD;Gewicht kg;Lagerort;Sonstiger Text\r\n\
             1;MB 000123;Widget;55;7001;10;UMK;Euro;20.09.2024;1000,0;;\r\n"
        );
    }

    #[test]
    fn test_delimiter_in_field_is_quoted() {
        let bytes = render_csv(&[row("a;b")]).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(text.ends_with(";\"a;b\"\r\n"));
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let bytes = render_csv(&[]).unwrap();
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
