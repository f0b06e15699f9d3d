//! Worksheet extraction pipeline for BCV rate sheets
//!
//! This module turns one loosely structured worksheet into normalized rate
//! records. The published workbooks vary in header position and date
//! placement, so extraction is built from small fallible strategies rather
//! than a fixed template.
//!
//! ## Architecture
//!
//! - [`grid`] - Materialized cell grid decoupled from the spreadsheet reader
//! - [`date`] - Ordered date-resolution strategies (labelled cells, sheet name)
//! - [`table`] - Rate table header location within the leading rows
//! - [`records`] - Row walking, validation and type coercion
//! - [`parser`] - Per-sheet orchestration with structural-miss outcomes
//! - [`stats`] - Per-workbook extraction statistics

pub mod date;
pub mod grid;
pub mod parser;
pub mod records;
pub mod stats;
pub mod table;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use grid::{CellValue, SheetGrid};
pub use parser::{SheetOutcome, parse_sheet};
pub use stats::ExtractionStats;
