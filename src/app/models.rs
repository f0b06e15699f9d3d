//! Data models for BCV exchange rate processing
//!
//! This module contains the normalized record shape emitted by the extraction
//! pipeline and the consolidated corpus that downstream persistence, export
//! and query components consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Rate Record
// =============================================================================

/// Provenance of the observation date stamped on a record
///
/// The date of a sheet is resolved by trying strategies in strict order:
/// an explicit "Fecha Valor:" cell, then a "Fecha Operacion:" cell, then a
/// sheet name encoded as DDMMYYYY. The winning strategy is recorded so that
/// downstream consumers can weigh the reliability of each observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateOrigin {
    /// Date taken from a "Fecha Valor:" header cell
    #[serde(rename = "value-date-label")]
    ValueDate,

    /// Date taken from a "Fecha Operacion:" header cell
    #[serde(rename = "operation-date-label")]
    OperationDate,

    /// Date decoded from an 8-digit DDMMYYYY sheet name
    #[serde(rename = "sheet-name")]
    SheetName,
}

impl fmt::Display for DateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DateOrigin::ValueDate => "value-date-label",
            DateOrigin::OperationDate => "operation-date-label",
            DateOrigin::SheetName => "sheet-name",
        };
        write!(f, "{}", tag)
    }
}

/// One normalized exchange rate observation
///
/// Field order is the serialization contract of the consolidated dataset and
/// must not be reordered. Rates are expressed in Bs. per unit of foreign
/// currency. Duplicate (date, currency) pairs across sheets are possible and
/// are not deduplicated by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Observation date (value date where available)
    pub date: NaiveDate,

    /// Short uppercase currency identifier, e.g. "USD"
    pub currency: String,

    /// Issuing country name, may be empty
    pub country: String,

    /// Rate at which the authority buys the foreign currency
    pub buy_rate: f64,

    /// Rate at which the authority sells the foreign currency
    pub sell_rate: f64,

    /// File name of the originating workbook
    pub source_file: String,

    /// Strategy that produced the observation date
    pub date_origin: DateOrigin,
}

impl RateRecord {
    /// Midpoint of the buy and sell rates
    pub fn mid_rate(&self) -> f64 {
        (self.buy_rate + self.sell_rate) / 2.0
    }
}

// =============================================================================
// Corpus
// =============================================================================

/// The consolidated, ordered set of rate records across all workbooks
///
/// Records are stable-sorted by (date ascending, currency ascending) at
/// construction time; ties keep their insertion order, which is deterministic
/// because workbooks are processed in sorted filename order. The corpus is
/// immutable after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<RateRecord>,
}

impl Corpus {
    /// Build a corpus from extracted records, applying the canonical sort
    pub fn from_records(mut records: Vec<RateRecord>) -> Self {
        records.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.currency.cmp(&b.currency))
        });
        Self { records }
    }

    /// The sorted record sequence
    pub fn records(&self) -> &[RateRecord] {
        &self.records
    }

    /// Number of records in the corpus
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the corpus holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest observation dates, if any records exist
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.date, last.date))
    }

    /// Number of distinct currency codes
    pub fn currency_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.currency.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, currency: &str, source: &str) -> RateRecord {
        RateRecord {
            date: date.parse().unwrap(),
            currency: currency.to_string(),
            country: String::new(),
            buy_rate: 10.0,
            sell_rate: 11.0,
            source_file: source.to_string(),
            date_origin: DateOrigin::ValueDate,
        }
    }

    #[test]
    fn test_corpus_sorts_by_date_then_currency() {
        let corpus = Corpus::from_records(vec![
            record("2025-03-07", "USD", "a.xls"),
            record("2025-01-02", "EUR", "a.xls"),
            record("2025-01-02", "CNY", "a.xls"),
            record("2025-02-14", "USD", "a.xls"),
        ]);

        let order: Vec<(String, String)> = corpus
            .records()
            .iter()
            .map(|r| (r.date.to_string(), r.currency.clone()))
            .collect();

        assert_eq!(
            order,
            vec![
                ("2025-01-02".to_string(), "CNY".to_string()),
                ("2025-01-02".to_string(), "EUR".to_string()),
                ("2025-02-14".to_string(), "USD".to_string()),
                ("2025-03-07".to_string(), "USD".to_string()),
            ]
        );
    }

    #[test]
    fn test_corpus_keeps_duplicate_date_currency_pairs() {
        let corpus = Corpus::from_records(vec![
            record("2025-03-07", "USD", "q1.xls"),
            record("2025-03-07", "USD", "q2.xls"),
        ]);

        assert_eq!(corpus.len(), 2);
        // Stable sort preserves the workbook processing order
        assert_eq!(corpus.records()[0].source_file, "q1.xls");
        assert_eq!(corpus.records()[1].source_file, "q2.xls");
    }

    #[test]
    fn test_corpus_date_range_and_currency_count() {
        let corpus = Corpus::from_records(vec![
            record("2025-01-02", "USD", "a.xls"),
            record("2025-03-07", "EUR", "a.xls"),
            record("2025-02-14", "USD", "a.xls"),
        ]);

        let (min, max) = corpus.date_range().unwrap();
        assert_eq!(min.to_string(), "2025-01-02");
        assert_eq!(max.to_string(), "2025-03-07");
        assert_eq!(corpus.currency_count(), 2);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_records(Vec::new());
        assert!(corpus.is_empty());
        assert_eq!(corpus.date_range(), None);
        assert_eq!(corpus.currency_count(), 0);
    }

    #[test]
    fn test_mid_rate() {
        let mut r = record("2025-01-02", "USD", "a.xls");
        r.buy_rate = 64.58;
        r.sell_rate = 64.75;
        assert!((r.mid_rate() - 64.665).abs() < 1e-9);
    }

    #[test]
    fn test_date_origin_serialization_tags() {
        assert_eq!(
            serde_json::to_string(&DateOrigin::ValueDate).unwrap(),
            "\"value-date-label\""
        );
        assert_eq!(
            serde_json::to_string(&DateOrigin::OperationDate).unwrap(),
            "\"operation-date-label\""
        );
        assert_eq!(
            serde_json::to_string(&DateOrigin::SheetName).unwrap(),
            "\"sheet-name\""
        );
    }
}
