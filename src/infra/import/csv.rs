use crate::domain::entities::table::{CellValue, Table};
use crate::error::{IntakeError, IntakeResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses comma-separated text with a header row into a [`Table`].
/// Blank lines are skipped and short records are padded with `Empty`.
pub fn parse_csv_bytes(bytes: &[u8]) -> IntakeResult<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Ok(Table::default());
    }

    let header_len = headers.len();
    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|err| IntakeError::CsvParse(format!("{} 行目: {err}", row_idx + 2)))?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let row = (0..header_len)
            .map(|col_idx| CellValue::infer(record.get(col_idx).unwrap_or("")))
            .collect();
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}
