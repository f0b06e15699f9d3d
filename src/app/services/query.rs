//! Query front-ends over the consolidated dataset
//!
//! Provides date normalization for human-entered date strings and lookup
//! operations (by date, by currency, latest-value, summary statistics) over
//! a loaded [`Corpus`]. Unparseable input is an error value, never a panic.

use crate::app::models::{Corpus, RateRecord};
use crate::constants::{DATE_INPUT_FORMATS, SPANISH_MONTHS};
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Normalize a user-supplied date string to a calendar date
///
/// Structured formats are tried in order (ISO first, then day-first forms,
/// then US month-first), followed by Spanish free text such as
/// "marzo 8 2025".
pub fn normalize_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();

    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    parse_spanish_date(trimmed).ok_or_else(|| Error::date_format(input))
}

/// Parse "<month name> <day> <year>" with Spanish month names
fn parse_spanish_date(input: &str) -> Option<NaiveDate> {
    let lowered = input.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }

    let month = SPANISH_MONTHS
        .iter()
        .find(|(name, _)| *name == parts[0])
        .map(|(_, number)| *number)?;
    let day: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Per-field summary over a series of observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl RateSummary {
    fn over(values: impl Iterator<Item = f64>) -> Option<Self> {
        let values: Vec<f64> = values.collect();
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { min, max, mean })
    }
}

/// Summary statistics for one currency
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyStats {
    pub currency: String,
    pub country: String,
    pub observations: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub buy: RateSummary,
    pub sell: RateSummary,
    pub mid: RateSummary,
}

/// Read-only lookup interface over a corpus
#[derive(Debug)]
pub struct QueryEngine<'a> {
    corpus: &'a Corpus,
}

impl<'a> QueryEngine<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// All records observed on `date`, in currency order
    pub fn rates_on(&self, date: NaiveDate) -> Vec<&'a RateRecord> {
        self.corpus
            .records()
            .iter()
            .filter(|r| r.date == date)
            .collect()
    }

    /// Distinct observation dates, ascending, optionally filtered by
    /// year and month
    pub fn available_dates(&self, year: Option<i32>, month: Option<u32>) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .corpus
            .records()
            .iter()
            .map(|r| r.date)
            .filter(|d| year.is_none_or(|y| d.year() == y))
            .filter(|d| month.is_none_or(|m| d.month() == m))
            .collect();
        dates.dedup();
        dates
    }

    /// Available dates closest to `target`, with their signed day offsets
    ///
    /// Used to suggest alternatives when a queried date has no data. Ties in
    /// distance are resolved toward the earlier date.
    pub fn nearest_dates(&self, target: NaiveDate, limit: usize) -> Vec<(NaiveDate, i64)> {
        let mut dated: Vec<(NaiveDate, i64)> = self
            .available_dates(None, None)
            .into_iter()
            .map(|date| (date, (date - target).num_days()))
            .collect();

        dated.sort_by_key(|(date, offset)| (offset.abs(), *date));
        dated.truncate(limit);
        dated
    }

    /// History of one currency (case-insensitive), newest first, optionally
    /// bounded by from/to dates inclusive
    pub fn currency_history(
        &self,
        code: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<&'a RateRecord> {
        let mut records: Vec<&RateRecord> = self
            .corpus
            .records()
            .iter()
            .filter(|r| r.currency.eq_ignore_ascii_case(code))
            .filter(|r| from.is_none_or(|d| r.date >= d))
            .filter(|r| to.is_none_or(|d| r.date <= d))
            .collect();
        records.reverse();
        records
    }

    /// All records carrying the most recent observation date
    pub fn latest(&self) -> Vec<&'a RateRecord> {
        let Some((_, last)) = self.corpus.date_range() else {
            return Vec::new();
        };
        self.rates_on(last)
    }

    /// Most recent record for one currency (case-insensitive)
    pub fn latest_for(&self, code: &str) -> Option<&'a RateRecord> {
        self.corpus
            .records()
            .iter()
            .rev()
            .find(|r| r.currency.eq_ignore_ascii_case(code))
    }

    /// Distinct currency codes with their most recently observed country name
    pub fn currencies(&self) -> Vec<(String, String)> {
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        // Later records overwrite earlier ones, keeping the newest country
        for record in self.corpus.records() {
            seen.insert(record.currency.clone(), record.country.clone());
        }
        seen.into_iter().collect()
    }

    /// Summary statistics for one currency, `None` if the code is unknown
    pub fn stats_for(&self, code: &str) -> Option<CurrencyStats> {
        let history = self.currency_history(code, None, None);
        let newest = history.first()?;

        Some(CurrencyStats {
            currency: newest.currency.clone(),
            country: newest.country.clone(),
            observations: history.len(),
            first_date: history.last().map(|r| r.date)?,
            last_date: newest.date,
            buy: RateSummary::over(history.iter().map(|r| r.buy_rate))?,
            sell: RateSummary::over(history.iter().map(|r| r.sell_rate))?,
            mid: RateSummary::over(history.iter().map(|r| r.mid_rate()))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::DateOrigin;

    fn date(iso: &str) -> NaiveDate {
        iso.parse().unwrap()
    }

    fn record(date_iso: &str, currency: &str, buy: f64, sell: f64) -> RateRecord {
        RateRecord {
            date: date(date_iso),
            currency: currency.to_string(),
            country: format!("{} country", currency),
            buy_rate: buy,
            sell_rate: sell,
            source_file: "Q1_2025.xls".to_string(),
            date_origin: DateOrigin::ValueDate,
        }
    }

    fn sample_corpus() -> Corpus {
        Corpus::from_records(vec![
            record("2025-01-02", "USD", 52.31, 52.55),
            record("2025-01-02", "EUR", 55.00, 55.20),
            record("2025-02-14", "USD", 58.10, 58.30),
            record("2025-03-07", "USD", 64.58, 64.75),
            record("2025-03-07", "EUR", 69.12, 69.40),
        ])
    }

    #[test]
    fn test_normalize_date_structured_formats() {
        assert_eq!(normalize_date("2025-03-08").unwrap(), date("2025-03-08"));
        assert_eq!(normalize_date("08/03/2025").unwrap(), date("2025-03-08"));
        assert_eq!(normalize_date("2025/03/08").unwrap(), date("2025-03-08"));
        assert_eq!(normalize_date("08-03-2025").unwrap(), date("2025-03-08"));
        assert_eq!(normalize_date(" 2025-03-08 ").unwrap(), date("2025-03-08"));
    }

    #[test]
    fn test_normalize_date_day_first_wins_over_month_first() {
        // Ambiguous input resolves day-first, matching the source data locale
        assert_eq!(normalize_date("05/03/2025").unwrap(), date("2025-03-05"));
    }

    #[test]
    fn test_normalize_date_month_first_fallback() {
        // Day-first cannot parse a day of 13+ in the month slot
        assert_eq!(normalize_date("03/25/2025").unwrap(), date("2025-03-25"));
    }

    #[test]
    fn test_normalize_date_spanish_text() {
        assert_eq!(normalize_date("marzo 8 2025").unwrap(), date("2025-03-08"));
        assert_eq!(normalize_date("Enero 2 2025").unwrap(), date("2025-01-02"));
        assert_eq!(
            normalize_date("diciembre 31 2024").unwrap(),
            date("2024-12-31")
        );
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert!(matches!(
            normalize_date("not a date"),
            Err(Error::DateFormat { .. })
        ));
        assert!(matches!(
            normalize_date("marzo 45 2025"),
            Err(Error::DateFormat { .. })
        ));
        assert!(matches!(normalize_date(""), Err(Error::DateFormat { .. })));
    }

    #[test]
    fn test_rates_on_date() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        let rates = engine.rates_on(date("2025-01-02"));
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].currency, "EUR");
        assert_eq!(rates[1].currency, "USD");

        assert!(engine.rates_on(date("2025-01-03")).is_empty());
    }

    #[test]
    fn test_nearest_dates_ordered_by_distance() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        let nearest = engine.nearest_dates(date("2025-02-16"), 3);
        assert_eq!(nearest[0], (date("2025-02-14"), -2));
        assert_eq!(nearest[1], (date("2025-03-07"), 19));
        assert_eq!(nearest[2], (date("2025-01-02"), -45));
    }

    #[test]
    fn test_currency_history_newest_first_with_bounds() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        let history = engine.currency_history("usd", None, None);
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].date, date("2025-03-07"));
        assert_eq!(history[2].date, date("2025-01-02"));

        let bounded =
            engine.currency_history("USD", Some(date("2025-01-15")), Some(date("2025-02-28")));
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].date, date("2025-02-14"));
    }

    #[test]
    fn test_latest_and_latest_for() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        let latest = engine.latest();
        assert_eq!(latest.len(), 2);
        assert!(latest.iter().all(|r| r.date == date("2025-03-07")));

        let usd = engine.latest_for("usd").unwrap();
        assert_eq!(usd.date, date("2025-03-07"));
        assert_eq!(usd.buy_rate, 64.58);

        assert!(engine.latest_for("XYZ").is_none());
    }

    #[test]
    fn test_available_dates_with_filters() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        assert_eq!(engine.available_dates(None, None).len(), 3);
        assert_eq!(engine.available_dates(Some(2025), Some(1)).len(), 1);
        assert_eq!(engine.available_dates(Some(2024), None).len(), 0);
    }

    #[test]
    fn test_currencies_listing() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        let currencies = engine.currencies();
        assert_eq!(currencies.len(), 2);
        assert_eq!(currencies[0].0, "EUR");
        assert_eq!(currencies[1].0, "USD");
    }

    #[test]
    fn test_stats_for_currency() {
        let corpus = sample_corpus();
        let engine = QueryEngine::new(&corpus);

        let stats = engine.stats_for("USD").unwrap();
        assert_eq!(stats.observations, 3);
        assert_eq!(stats.first_date, date("2025-01-02"));
        assert_eq!(stats.last_date, date("2025-03-07"));
        assert_eq!(stats.buy.min, 52.31);
        assert_eq!(stats.buy.max, 64.58);
        assert!((stats.buy.mean - (52.31 + 58.10 + 64.58) / 3.0).abs() < 1e-9);

        assert!(engine.stats_for("XYZ").is_none());
    }

    #[test]
    fn test_empty_corpus_queries() {
        let corpus = Corpus::default();
        let engine = QueryEngine::new(&corpus);

        assert!(engine.latest().is_empty());
        assert!(engine.nearest_dates(date("2025-01-01"), 5).is_empty());
        assert!(engine.currencies().is_empty());
    }
}
