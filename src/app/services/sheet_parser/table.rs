//! Rate table location
//!
//! The currency table floats within the leading rows of each sheet. Its
//! header row is recognized by carrying both the buy and sell column labels;
//! the data rows start immediately below it.

use super::grid::SheetGrid;
use crate::constants::{BUY_HEADER_LABEL, HEADER_SCAN_ROWS, SELL_HEADER_LABEL};

/// Find the first data row of the rate table
///
/// Scans the leading rows, joining the stringified non-empty cells of each
/// row; the first row containing both header labels is the header, and the
/// returned index is the row immediately following it. `None` means the
/// sheet holds no recognizable table.
pub fn locate_table_start(grid: &SheetGrid) -> Option<usize> {
    for (index, row) in grid.rows().iter().enumerate().take(HEADER_SCAN_ROWS) {
        let joined = row
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.display())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.contains(BUY_HEADER_LABEL) && joined.contains(SELL_HEADER_LABEL) {
            return Some(index + 1);
        }
    }
    None
}
