use csv::{ReaderBuilder, Trim};
use tracing::{debug, error, info};

use streamoid_products::{RawRow, RowRejection};

use super::IngestError;

/// One CSV record: decoded cells, or a rejection when the record itself is unreadable.
pub type ParsedRow = Result<RawRow, RowRejection>;

/// Decode an uploaded CSV body into untyped rows.
///
/// The first line names the columns. Records may be shorter or longer than
/// the header; missing cells are absent from the row, surplus cells are
/// dropped. Blank lines are skipped. Fails only when the body as a whole is
/// not readable CSV text.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<ParsedRow>, IngestError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        error!("Upload is not valid UTF-8: {}", e);
        IngestError::InvalidInput(format!("file is not valid UTF-8: {e}"))
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    debug!("Creating CSV reader with headers enabled");
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| {
            error!("Failed to read CSV headers: {}", e);
            IngestError::InvalidInput(format!("unreadable header row: {e}"))
        })?
        .clone();
    debug!("CSV headers: {:?}", headers);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let parsed = match record {
            Ok(record) => Ok(headers
                .iter()
                .zip(record.iter())
                .collect::<RawRow>()),
            Err(e) => {
                debug!("Failed to read CSV record at row {}: {}", idx + 1, e);
                Err(RowRejection::malformed(e.to_string()))
            }
        };
        rows.push(parsed);

        if (idx + 1) % 1000 == 0 {
            debug!("Parsed {} CSV rows", idx + 1);
        }
    }

    info!("Parsed {} rows from CSV", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_rows(input: &str) -> Vec<RawRow> {
        parse_csv(input.as_bytes())
            .unwrap()
            .into_iter()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn maps_cells_by_header_name() {
        let rows = ok_rows("sku,name,brand\nA-1,Tee,BrandX\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field("sku"), Some("A-1"));
        assert_eq!(rows[0].field("name"), Some("Tee"));
        assert_eq!(rows[0].field("brand"), Some("BrandX"));
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let rows = ok_rows("sku,name\nA,One\nB,Two");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].field("sku"), Some("B"));
    }

    #[test]
    fn short_records_leave_columns_absent() {
        let rows = ok_rows("sku,name,brand,quantity\nA,Tee\n");
        assert_eq!(rows[0].field("name"), Some("Tee"));
        assert_eq!(rows[0].field("brand"), None);
        assert_eq!(rows[0].field("quantity"), None);
    }

    #[test]
    fn long_records_drop_surplus_cells() {
        let rows = ok_rows("sku,name\nA,Tee,extra,more\n");
        assert_eq!(rows[0].field("sku"), Some("A"));
        assert_eq!(rows[0].field("name"), Some("Tee"));
    }

    #[test]
    fn quoted_cells_may_contain_commas() {
        let rows = ok_rows("sku,name\nA,\"Tee, Cotton\"\n");
        assert_eq!(rows[0].field("name"), Some("Tee, Cotton"));
    }

    #[test]
    fn cells_are_trimmed() {
        let rows = ok_rows(" sku , name \n  A-1 ,  Tee  \n");
        assert_eq!(rows[0].field("sku"), Some("A-1"));
        assert_eq!(rows[0].field("name"), Some("Tee"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = ok_rows("sku,name\n\nA,One\n\n\nB,Two\n");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn leading_bom_is_ignored() {
        let rows = ok_rows("\u{feff}sku,name\nA,One\n");
        assert_eq!(rows[0].field("sku"), Some("A"));
    }

    #[test]
    fn crlf_line_endings_are_supported() {
        let rows = ok_rows("sku,name\r\nA,One\r\nB,Two\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].field("name"), Some("Two"));
    }

    #[test]
    fn empty_body_yields_no_rows() {
        assert!(parse_csv(b"").unwrap().is_empty());
        assert!(parse_csv(b"sku,name,brand\n").unwrap().is_empty());
    }

    #[test]
    fn invalid_utf8_is_rejected_outright() {
        let err = parse_csv(&[b's', b'k', b'u', b'\n', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, IngestError::InvalidInput(_)));
    }
}
