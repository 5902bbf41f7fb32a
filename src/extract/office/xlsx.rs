//! Spreadsheets: every non-empty cell value, sheet by sheet, row-major.

use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use tracing::debug;

use crate::extract::ExtractResult;

/// Join all non-empty cell values with newlines.
///
/// Formula cells contribute their cached value. No sheet names or cell
/// addresses are emitted, so the output carries no structural markers.
pub fn extract_xlsx(bytes: &[u8]) -> ExtractResult<String> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

    let mut values = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet)?;
        debug!(sheet = %sheet, rows = range.height(), "Reading worksheet");
        for row in range.rows() {
            values.extend(row.iter().filter_map(cell_text));
        }
    }

    Ok(values.join("\n"))
}

/// Render a cell, or `None` for empty and falsy values (blank, `""`, zero, `false`).
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            (!s.is_empty()).then(|| s.clone())
        }
        Data::Int(0) => None,
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if *f == 0.0 => None,
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(false) => None,
        Data::Bool(true) => Some("True".to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if !dt.is_duration() => Some(value.format("%Y-%m-%d %H:%M:%S").to_string()),
            _ => Some(format_number(dt.as_f64())),
        },
        Data::Error(e) => Some(e.to_string()),
    }
}

/// Whole numbers print without a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
