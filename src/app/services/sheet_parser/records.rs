//! Row-level record extraction
//!
//! Walks the data rows below the located table header and emits one
//! normalized record per well-formed row. Extraction is best-effort per row:
//! a malformed row is skipped silently and never fails the sheet.

use super::grid::SheetGrid;
use crate::app::models::{DateOrigin, RateRecord};
use crate::constants::columns;
use chrono::NaiveDate;

/// Extract rate records from the data rows starting at `start_row`
///
/// The column offsets are fixed (currency, country, buy, sell at indices
/// 1, 2, 5, 6). Rows missing the currency or either rate, or whose rates do
/// not coerce to numbers, are skipped.
pub fn extract_records(
    grid: &SheetGrid,
    start_row: usize,
    date: NaiveDate,
    source_file: &str,
    date_origin: DateOrigin,
) -> Vec<RateRecord> {
    let mut records = Vec::new();

    for index in start_row..grid.row_count() {
        let Some(row) = grid.row(index) else {
            break;
        };
        if let Some(record) = parse_row(row, date, source_file, date_origin) {
            records.push(record);
        }
    }

    records
}

/// Parse one data row into a record, or `None` if the row is malformed
fn parse_row(
    row: &[super::grid::CellValue],
    date: NaiveDate,
    source_file: &str,
    date_origin: DateOrigin,
) -> Option<RateRecord> {
    let currency_cell = row.get(columns::CURRENCY).filter(|cell| !cell.is_empty())?;
    let currency = currency_cell.display().trim().to_string();
    if currency.is_empty() {
        return None;
    }

    let buy_rate = row.get(columns::BUY_RATE)?.as_number()?;
    let sell_rate = row.get(columns::SELL_RATE)?.as_number()?;

    let country = row
        .get(columns::COUNTRY)
        .map(|cell| cell.display().trim().to_string())
        .unwrap_or_default();

    Some(RateRecord {
        date,
        currency,
        country,
        buy_rate,
        sell_rate,
        source_file: source_file.to_string(),
        date_origin,
    })
}
