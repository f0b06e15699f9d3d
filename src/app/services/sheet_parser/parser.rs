//! Per-sheet extraction orchestration
//!
//! Composes date extraction, table location and record extraction for one
//! worksheet. Structural misses are reported as distinct outcomes so that
//! the workbook processor can log them with identifying context; they never
//! abort processing of sibling sheets.

use super::date::extract_date;
use super::grid::SheetGrid;
use super::records::extract_records;
use super::table::locate_table_start;
use crate::app::models::RateRecord;

/// Result of processing one worksheet
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome {
    /// The sheet was dated and its table located; holds the extracted rows
    /// (possibly zero when every data row was malformed)
    Extracted(Vec<RateRecord>),

    /// No strategy produced an observation date; the sheet must be skipped
    MissingDate,

    /// The sheet carries a date but no recognizable rate table header
    MissingTable,
}

impl SheetOutcome {
    /// Records extracted from the sheet, empty on a structural miss
    pub fn into_records(self) -> Vec<RateRecord> {
        match self {
            SheetOutcome::Extracted(records) => records,
            _ => Vec::new(),
        }
    }
}

/// Process one worksheet grid into rate records
pub fn parse_sheet(grid: &SheetGrid, sheet_name: &str, source_file: &str) -> SheetOutcome {
    let Some((date, date_origin)) = extract_date(grid, sheet_name) else {
        return SheetOutcome::MissingDate;
    };

    let Some(start_row) = locate_table_start(grid) else {
        return SheetOutcome::MissingTable;
    };

    SheetOutcome::Extracted(extract_records(
        grid,
        start_row,
        date,
        source_file,
        date_origin,
    ))
}
