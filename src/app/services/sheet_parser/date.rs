//! Observation date extraction
//!
//! The date of a sheet is resolved by an ordered set of strategies, first
//! success wins: an explicit "Fecha Valor:" header cell, a "Fecha Operacion:"
//! header cell, and finally a sheet name encoded as DDMMYYYY. Each strategy
//! returns an option rather than signalling misses through errors; a sheet
//! where all three fail carries no producible date and must be skipped by
//! the caller.

use super::grid::SheetGrid;
use crate::app::models::DateOrigin;
use crate::constants::{DATE_SCAN_ROWS, OPERATION_DATE_LABEL, VALUE_DATE_LABEL};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// DD/MM/YYYY pattern embedded in labelled date cells
static DMY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})/(\d{2})/(\d{4})").expect("valid date regex"));

/// Resolve the observation date of a sheet, tagging the winning strategy
pub fn extract_date(grid: &SheetGrid, sheet_name: &str) -> Option<(NaiveDate, DateOrigin)> {
    if let Some(date) = scan_label_date(grid, VALUE_DATE_LABEL) {
        return Some((date, DateOrigin::ValueDate));
    }
    if let Some(date) = scan_label_date(grid, OPERATION_DATE_LABEL) {
        return Some((date, DateOrigin::OperationDate));
    }
    date_from_sheet_name(sheet_name).map(|date| (date, DateOrigin::SheetName))
}

/// Scan the leading rows for a cell containing `label` and a DD/MM/YYYY date
///
/// A cell that carries the label but no parseable date is treated as a
/// non-match and scanning continues with the remaining cells.
fn scan_label_date(grid: &SheetGrid, label: &str) -> Option<NaiveDate> {
    for row in grid.rows().iter().take(DATE_SCAN_ROWS) {
        for cell in row {
            let Some(text) = cell.as_text() else {
                continue;
            };
            if !text.contains(label) {
                continue;
            }
            if let Some(date) = parse_embedded_dmy(text) {
                return Some(date);
            }
        }
    }
    None
}

/// Extract a calendar-valid DD/MM/YYYY date embedded in free text
fn parse_embedded_dmy(text: &str) -> Option<NaiveDate> {
    let caps = DMY_PATTERN.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Decode a sheet name of exactly 8 digits as DDMMYYYY
pub fn date_from_sheet_name(sheet_name: &str) -> Option<NaiveDate> {
    if sheet_name.len() != 8 || !sheet_name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day: u32 = sheet_name[..2].parse().ok()?;
    let month: u32 = sheet_name[2..4].parse().ok()?;
    let year: i32 = sheet_name[4..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
