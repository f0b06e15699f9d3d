//! Shared grid builders for sheet parser tests
//!
//! The published BCV sheets put the currency code in column B, the country in
//! column C and the buy/sell rates in columns F and G; these helpers build
//! synthetic grids with that shape.

use crate::app::services::sheet_parser::grid::{CellValue, SheetGrid};

mod parser_tests;

pub fn text(content: &str) -> CellValue {
    CellValue::Text(content.to_string())
}

pub fn num(value: f64) -> CellValue {
    CellValue::Number(value)
}

pub fn empty_row() -> Vec<CellValue> {
    vec![CellValue::Empty; 7]
}

/// A data row in the published column layout (B=currency, C=country, F/G=rates)
pub fn data_row(currency: CellValue, country: CellValue, buy: CellValue, sell: CellValue) -> Vec<CellValue> {
    vec![
        CellValue::Empty,
        currency,
        country,
        CellValue::Empty,
        CellValue::Empty,
        buy,
        sell,
    ]
}

/// The table header row carrying both rate column labels
pub fn header_row() -> Vec<CellValue> {
    vec![
        CellValue::Empty,
        text("Moneda"),
        text("Pais"),
        CellValue::Empty,
        CellValue::Empty,
        text("Compra (BID)"),
        text("Venta (ASK)"),
    ]
}

/// A row whose first cell announces the value date
pub fn value_date_row(date_text: &str) -> Vec<CellValue> {
    let mut row = empty_row();
    row[0] = text(&format!("Fecha Valor: {}", date_text));
    row
}

/// A well-formed synthetic sheet: date label at the top, header row at
/// index 5, three data rows beneath it
pub fn well_formed_sheet() -> SheetGrid {
    SheetGrid::new(vec![
        value_date_row("07/03/2025"),
        empty_row(),
        empty_row(),
        empty_row(),
        empty_row(),
        header_row(),
        data_row(text("USD"), text("E.U.A."), num(64.58), num(64.75)),
        data_row(text("EUR"), text("Union Europea"), num(69.12), num(69.40)),
        data_row(text("CNY"), text("China"), num(8.88), num(8.92)),
    ])
}
