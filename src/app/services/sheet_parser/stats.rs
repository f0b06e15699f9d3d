//! Extraction statistics for workbook processing
//!
//! Tracks per-sheet outcomes so that runs can report how much of each
//! workbook was usable.

use serde::{Deserialize, Serialize};

/// Per-workbook extraction statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of sheets enumerated in the workbook
    pub sheets_total: usize,

    /// Sheets that yielded at least one record
    pub sheets_extracted: usize,

    /// Sheets skipped because no observation date could be resolved
    pub sheets_missing_date: usize,

    /// Sheets skipped because the rate table header was not found
    pub sheets_missing_table: usize,

    /// Sheets whose range could not be read from the workbook
    pub sheets_failed: usize,

    /// Total records extracted from the workbook
    pub records_extracted: usize,
}

impl ExtractionStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Sheets skipped for any reason
    pub fn sheets_skipped(&self) -> usize {
        self.sheets_missing_date + self.sheets_missing_table + self.sheets_failed
    }

    /// Fold another workbook's statistics into this accumulator
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.sheets_total += other.sheets_total;
        self.sheets_extracted += other.sheets_extracted;
        self.sheets_missing_date += other.sheets_missing_date;
        self.sheets_missing_table += other.sheets_missing_table;
        self.sheets_failed += other.sheets_failed;
        self.records_extracted += other.records_extracted;
    }
}
