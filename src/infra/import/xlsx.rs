use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};

use crate::domain::entities::table::{format_f64, CellValue, Table};
use crate::error::{IntakeError, IntakeResult};

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => format_f64(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

fn cell_to_value(cell: &Data) -> CellValue {
    match cell {
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Empty => CellValue::Empty,
        Data::String(v) => CellValue::infer(v),
        other => CellValue::Text(cell_to_string(other)),
    }
}

/// Reads the first sheet of an xlsx workbook; its first row becomes the headers.
pub fn parse_xlsx_bytes(bytes: &[u8]) -> IntakeResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IntakeError::XlsxParse("ワークシートがありません".to_string()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Table::default());
    };
    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();
    let header_len = headers.len();

    let rows = sheet_rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| {
            (0..header_len)
                .map(|col_idx| row.get(col_idx).map(cell_to_value).unwrap_or(CellValue::Empty))
                .collect()
        })
        .collect();

    Ok(Table::new(headers, rows))
}
