//! In-memory worksheet grid
//!
//! A `SheetGrid` is the rectangular cell matrix of one worksheet, fully
//! materialized and discarded after record extraction. Calamine's cell types
//! are folded into the three shapes the pipeline cares about at this boundary
//! so that extraction logic never deals with spreadsheet internals.

use calamine::{Data, Range};

/// One worksheet cell, reduced to the shapes relevant for extraction
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Textual content
    Text(String),

    /// Numeric content (integers, floats and serial date/times)
    Number(f64),

    /// Empty or unreadable cell
    Empty,
}

impl CellValue {
    /// Whether the cell holds no usable content
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Textual content, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric coercion: native numbers, or text that parses as a real number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => text.trim().parse::<f64>().ok(),
            CellValue::Empty => None,
        }
    }

    /// Stringified content, used for header matching and code/country fields
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => value.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(text) => CellValue::Text(text.clone()),
            Data::Int(value) => CellValue::Number(*value as f64),
            Data::Float(value) => CellValue::Number(*value),
            Data::Bool(value) => CellValue::Text(value.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(text) => CellValue::Text(text.clone()),
            Data::DurationIso(text) => CellValue::Text(text.clone()),
            // Formula error cells carry no usable value
            Data::Error(_) => CellValue::Empty,
            Data::Empty => CellValue::Empty,
        }
    }
}

/// Rectangular grid of cell values with zero-based row/column indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Build a grid directly from rows of cells
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Materialize a calamine worksheet range into a grid
    pub fn from_range(range: &Range<Data>) -> Self {
        let rows = range
            .rows()
            .map(|row| row.iter().map(CellValue::from).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows in the grid
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows of the grid
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// One row of the grid, if present
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_emptiness() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Text("USD".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::Number(64.58).as_number(), Some(64.58));
        assert_eq!(CellValue::Text(" 64.58 ".to_string()).as_number(), Some(64.58));
        assert_eq!(CellValue::Text("N/A".to_string()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(
            CellValue::from(&Data::String("Fecha Valor:".to_string())),
            CellValue::Text("Fecha Valor:".to_string())
        );
        assert_eq!(CellValue::from(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(CellValue::from(&Data::Float(64.58)), CellValue::Number(64.58));
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
        assert_eq!(
            CellValue::from(&Data::Bool(true)),
            CellValue::Text("true".to_string())
        );
    }

    #[test]
    fn test_from_range() {
        let mut range = Range::new((0, 0), (1, 1));
        range.set_value((0, 0), Data::String("USD".to_string()));
        range.set_value((1, 1), Data::Float(64.58));

        let grid = SheetGrid::from_range(&range);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row(0).unwrap()[0], CellValue::Text("USD".to_string()));
        assert_eq!(grid.row(1).unwrap()[1], CellValue::Number(64.58));
    }

    #[test]
    fn test_row_out_of_bounds() {
        let grid = SheetGrid::new(vec![vec![CellValue::Empty]]);
        assert!(grid.row(5).is_none());
    }
}
