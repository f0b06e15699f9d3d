//! Per-workbook processing
//!
//! Opens one workbook file, runs every sheet through the extraction pipeline
//! in file-native order and aggregates records with per-sheet outcome
//! logging. Failures local to one sheet never abort its siblings; a workbook
//! that cannot be opened at all is an error for the caller to absorb.

use crate::app::models::RateRecord;
use crate::app::services::sheet_parser::{ExtractionStats, SheetGrid, SheetOutcome, parse_sheet};
use crate::{Error, Result};
use calamine::{Reader, open_workbook_auto};
use std::path::Path;
use tracing::{debug, info, warn};

/// Records and statistics extracted from one workbook
#[derive(Debug, Clone, Default)]
pub struct WorkbookResult {
    /// Records from all successfully processed sheets
    pub records: Vec<RateRecord>,

    /// Per-sheet outcome counts
    pub stats: ExtractionStats,
}

/// Process every sheet of one workbook file
pub fn process_workbook(path: &Path) -> Result<WorkbookResult> {
    let source_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    info!("Processing workbook: {}", source_file);

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::workbook(&source_file, format!("failed to open: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_owned();
    debug!("{}: {} sheets found", source_file, sheet_names.len());

    let mut result = WorkbookResult::default();

    for sheet_name in &sheet_names {
        result.stats.sheets_total += 1;

        let range = match workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(e) => {
                warn!("{} / {}: failed to read sheet: {}", source_file, sheet_name, e);
                result.stats.sheets_failed += 1;
                continue;
            }
        };

        let grid = SheetGrid::from_range(&range);

        match parse_sheet(&grid, sheet_name, &source_file) {
            SheetOutcome::Extracted(records) => {
                if records.is_empty() {
                    debug!("{} / {}: no valid rate rows", source_file, sheet_name);
                } else {
                    info!(
                        "{} / {}: {} rates extracted",
                        source_file,
                        sheet_name,
                        records.len()
                    );
                }
                result.stats.sheets_extracted += 1;
                result.stats.records_extracted += records.len();
                result.records.extend(records);
            }
            SheetOutcome::MissingDate => {
                warn!(
                    "{} / {}: could not extract date, sheet skipped",
                    source_file, sheet_name
                );
                result.stats.sheets_missing_date += 1;
            }
            SheetOutcome::MissingTable => {
                warn!(
                    "{} / {}: could not find table structure, sheet skipped",
                    source_file, sheet_name
                );
                result.stats.sheets_missing_table += 1;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = process_workbook(Path::new("/nonexistent/Q1_2025.xls"));
        assert!(result.is_err());
    }

    #[test]
    fn test_unreadable_workbook_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.xls");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"this is not a spreadsheet").unwrap();

        let result = process_workbook(&path);
        assert!(matches!(result, Err(Error::Workbook { .. })));
    }
}
