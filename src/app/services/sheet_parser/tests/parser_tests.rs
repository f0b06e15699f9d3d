//! Tests for per-sheet orchestration

use super::{data_row, empty_row, header_row, num, text, value_date_row, well_formed_sheet};
use crate::app::models::DateOrigin;
use crate::app::services::sheet_parser::grid::SheetGrid;
use crate::app::services::sheet_parser::parser::{SheetOutcome, parse_sheet};

#[test]
fn test_well_formed_sheet_round_trip() {
    let grid = well_formed_sheet();

    let outcome = parse_sheet(&grid, "Hoja1", "Q1_2025.xls");
    let SheetOutcome::Extracted(records) = outcome else {
        panic!("expected extraction, got {:?}", outcome);
    };

    assert_eq!(records.len(), 3);
    let codes: Vec<&str> = records.iter().map(|r| r.currency.as_str()).collect();
    assert_eq!(codes, vec!["USD", "EUR", "CNY"]);

    for record in &records {
        assert_eq!(record.date.to_string(), "2025-03-07");
        assert_eq!(record.source_file, "Q1_2025.xls");
        assert_eq!(record.date_origin, DateOrigin::ValueDate);
    }

    assert_eq!(records[0].country, "E.U.A.");
    assert_eq!(records[0].buy_rate, 64.58);
    assert_eq!(records[0].sell_rate, 64.75);
}

#[test]
fn test_undateable_sheet_is_a_missing_date_outcome() {
    let grid = SheetGrid::new(vec![
        empty_row(),
        header_row(),
        data_row(text("USD"), text("E.U.A."), num(64.58), num(64.75)),
    ]);

    let outcome = parse_sheet(&grid, "Resumen", "Q1_2025.xls");
    assert_eq!(outcome, SheetOutcome::MissingDate);
    assert!(outcome.into_records().is_empty());
}

#[test]
fn test_dated_sheet_without_table_is_a_missing_table_outcome() {
    let grid = SheetGrid::new(vec![value_date_row("07/03/2025"), empty_row()]);

    assert_eq!(
        parse_sheet(&grid, "Hoja1", "Q1_2025.xls"),
        SheetOutcome::MissingTable
    );
}

#[test]
fn test_sheet_name_dates_an_unlabelled_sheet() {
    let grid = SheetGrid::new(vec![
        empty_row(),
        header_row(),
        data_row(text("USD"), text("E.U.A."), num(64.58), num(64.75)),
    ]);

    let outcome = parse_sheet(&grid, "02012025", "Q1_2025.xls");
    let SheetOutcome::Extracted(records) = outcome else {
        panic!("expected extraction");
    };

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date.to_string(), "2025-01-02");
    assert_eq!(records[0].date_origin, DateOrigin::SheetName);
}

#[test]
fn test_extraction_with_zero_valid_rows_is_still_extracted() {
    let grid = SheetGrid::new(vec![
        value_date_row("07/03/2025"),
        header_row(),
        data_row(text("USD"), text("E.U.A."), text("N/D"), text("N/D")),
    ]);

    assert_eq!(
        parse_sheet(&grid, "Hoja1", "Q1_2025.xls"),
        SheetOutcome::Extracted(Vec::new())
    );
}
