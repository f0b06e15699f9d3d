//! Application constants for the BCV extractor
//!
//! This module contains the structural assumptions about the published BCV
//! workbooks (labels, scan limits, column offsets) together with default
//! paths and the month-name table used for date normalization.

// =============================================================================
// Sheet Structure
// =============================================================================

/// Header-cell label announcing the value date ("Fecha Valor: DD/MM/YYYY")
pub const VALUE_DATE_LABEL: &str = "Fecha Valor:";

/// Header-cell label announcing the operation date, used as a fallback
pub const OPERATION_DATE_LABEL: &str = "Fecha Operacion:";

/// Column header marking the buy-rate column of the rate table
pub const BUY_HEADER_LABEL: &str = "Compra (BID)";

/// Column header marking the sell-rate column of the rate table
pub const SELL_HEADER_LABEL: &str = "Venta (ASK)";

/// Number of leading rows scanned for a labelled date cell
pub const DATE_SCAN_ROWS: usize = 10;

/// Number of leading rows scanned for the rate table header
pub const HEADER_SCAN_ROWS: usize = 15;

/// Fixed column offsets of the BCV rate table
///
/// These are a structural coupling to the published workbook layout and are
/// deliberately not inferred: a sheet shaped differently yields wrong or empty
/// rows rather than triggering heuristics.
pub mod columns {
    /// Currency code (column B)
    pub const CURRENCY: usize = 1;

    /// Country name (column C)
    pub const COUNTRY: usize = 2;

    /// Buy rate in Bs. per unit of foreign currency (column F)
    pub const BUY_RATE: usize = 5;

    /// Sell rate in Bs. per unit of foreign currency (column G)
    pub const SELL_RATE: usize = 6;
}

// =============================================================================
// File Discovery and Default Paths
// =============================================================================

/// Workbook file extensions discovered in the input directory
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xls", "xlsx"];

/// Default directory holding the quarterly workbooks
pub const DEFAULT_INPUT_DIR: &str = "Data_xls";

/// Default path of the consolidated CSV dataset
pub const DEFAULT_DATASET_FILE: &str = "exchange_rates.csv";

/// Default directory for JSON exports
pub const DEFAULT_EXPORT_DIR: &str = "exports";

// =============================================================================
// Date Normalization
// =============================================================================

/// Spanish month names accepted in free-text date input ("marzo 8 2025")
pub const SPANISH_MONTHS: &[(&str, u32)] = &[
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

/// Structured date formats tried, in order, before the free-text fallback
pub const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

/// Number of nearby dates suggested when a queried date has no data
pub const NEAREST_DATE_SUGGESTIONS: usize = 5;
