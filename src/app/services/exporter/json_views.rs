//! Derived JSON projections of the consolidated dataset
//!
//! Each view targets one lookup pattern: a flat array mirroring the CSV, a
//! by-date index for date lookups, a by-currency index carrying the full
//! history per code, a minified flat array for transmission, a summary with
//! dataset metadata and per-currency statistics, and a latest-date snapshot
//! for API-style consumers. Optionally a single-currency by-date view is
//! produced for lightweight consumers. Map keys are `BTreeMap`-ordered and
//! no volatile fields (timestamps) are emitted, so repeated exports are
//! byte-identical.

use crate::app::models::{Corpus, RateRecord};
use crate::app::services::query::{CurrencyStats, QueryEngine};
use crate::constants::SPANISH_MONTHS;
use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::info;

/// One currency's quote within the by-date index
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyQuote {
    pub country: String,
    pub buy_rate: f64,
    pub sell_rate: f64,
    pub mid_rate: f64,
}

impl From<&RateRecord> for CurrencyQuote {
    fn from(record: &RateRecord) -> Self {
        Self {
            country: record.country.clone(),
            buy_rate: record.buy_rate,
            sell_rate: record.sell_rate,
            mid_rate: record.mid_rate(),
        }
    }
}

/// One observation within a currency's history (newest first)
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub buy_rate: f64,
    pub sell_rate: f64,
    pub mid_rate: f64,
    pub source_file: String,
}

/// Full per-currency history in the by-currency index
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyHistory {
    pub country: String,
    pub total_records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub history: Vec<HistoryEntry>,
}

/// Index the corpus by date, then currency
pub fn build_by_date(corpus: &Corpus) -> BTreeMap<NaiveDate, BTreeMap<String, CurrencyQuote>> {
    let mut index: BTreeMap<NaiveDate, BTreeMap<String, CurrencyQuote>> = BTreeMap::new();

    for record in corpus.records() {
        index
            .entry(record.date)
            .or_default()
            .insert(record.currency.clone(), CurrencyQuote::from(record));
    }

    index
}

/// Index the corpus by currency, with full history newest first
pub fn build_by_currency(corpus: &Corpus) -> BTreeMap<String, CurrencyHistory> {
    let mut grouped: BTreeMap<String, Vec<&RateRecord>> = BTreeMap::new();
    for record in corpus.records() {
        grouped.entry(record.currency.clone()).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(currency, mut records)| {
            // Corpus order is date-ascending; history is served newest first
            records.reverse();

            let first_date = records.last().map(|r| r.date).unwrap_or_default();
            let last_date = records.first().map(|r| r.date).unwrap_or_default();
            let country = records
                .first()
                .map(|r| r.country.clone())
                .unwrap_or_default();

            let history: Vec<HistoryEntry> = records
                .iter()
                .map(|r| HistoryEntry {
                    date: r.date,
                    buy_rate: r.buy_rate,
                    sell_rate: r.sell_rate,
                    mid_rate: r.mid_rate(),
                    source_file: r.source_file.clone(),
                })
                .collect();

            let entry = CurrencyHistory {
                country,
                total_records: history.len(),
                first_date,
                last_date,
                history,
            };
            (currency, entry)
        })
        .collect()
}

/// By-date view restricted to one currency code (case-insensitive)
pub fn build_single_currency(
    corpus: &Corpus,
    code: &str,
) -> BTreeMap<NaiveDate, CurrencyQuote> {
    let code_upper = code.to_uppercase();
    corpus
        .records()
        .iter()
        .filter(|r| r.currency.eq_ignore_ascii_case(&code_upper))
        .map(|r| (r.date, CurrencyQuote::from(r)))
        .collect()
}

/// Dataset-level metadata in the summary view
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetadata {
    pub total_records: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub total_currencies: usize,
    pub total_dates: usize,
    pub source_files: Vec<String>,
}

/// Summary view: metadata, per-currency statistics and the flat data
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub metadata: SummaryMetadata,
    pub currencies: Vec<String>,
    pub statistics: BTreeMap<String, CurrencyStats>,
    pub data: Vec<RateRecord>,
}

/// Snapshot of all rates at the most recent observation date
#[derive(Debug, Clone, Serialize)]
pub struct LatestRates {
    pub date: Option<NaiveDate>,
    pub date_display: Option<String>,
    pub total_currencies: usize,
    pub rates: BTreeMap<String, CurrencyQuote>,
}

/// Summary view with dataset metadata and per-currency statistics
pub fn build_summary(corpus: &Corpus) -> DatasetSummary {
    let engine = QueryEngine::new(corpus);
    let (first_date, last_date) = match corpus.date_range() {
        Some((first, last)) => (Some(first), Some(last)),
        None => (None, None),
    };

    let source_files: Vec<String> = corpus
        .records()
        .iter()
        .map(|r| r.source_file.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut statistics = BTreeMap::new();
    for (currency, _) in engine.currencies() {
        if let Some(stats) = engine.stats_for(&currency) {
            statistics.insert(currency, stats);
        }
    }

    DatasetSummary {
        metadata: SummaryMetadata {
            total_records: corpus.len(),
            first_date,
            last_date,
            total_currencies: corpus.currency_count(),
            total_dates: engine.available_dates(None, None).len(),
            source_files,
        },
        currencies: statistics.keys().cloned().collect(),
        statistics,
        data: corpus.records().to_vec(),
    }
}

/// Latest-date snapshot keyed by currency code
pub fn build_latest(corpus: &Corpus) -> LatestRates {
    let engine = QueryEngine::new(corpus);
    let records = engine.latest();

    let date = records.first().map(|r| r.date);
    let rates: BTreeMap<String, CurrencyQuote> = records
        .iter()
        .map(|r| (r.currency.clone(), CurrencyQuote::from(*r)))
        .collect();

    LatestRates {
        date,
        date_display: date.map(spanish_long_date),
        total_currencies: rates.len(),
        rates,
    }
}

/// Long-form Spanish date, e.g. "7 de marzo de 2025"
fn spanish_long_date(date: NaiveDate) -> String {
    let month = SPANISH_MONTHS[date.month0() as usize].0;
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Write all JSON views into `output_dir`, returning (file name, size) pairs
pub fn export_json_views(
    corpus: &Corpus,
    output_dir: &Path,
    currency_filter: Option<&str>,
) -> Result<Vec<(String, u64)>> {
    let mut outputs = Vec::new();

    write_view(
        output_dir,
        "rates_flat.json",
        &serde_json::to_vec_pretty(corpus.records())?,
        &mut outputs,
    )?;

    write_view(
        output_dir,
        "rates_by_date.json",
        &serde_json::to_vec_pretty(&build_by_date(corpus))?,
        &mut outputs,
    )?;

    write_view(
        output_dir,
        "rates_by_currency.json",
        &serde_json::to_vec_pretty(&build_by_currency(corpus))?,
        &mut outputs,
    )?;

    // Compact form for transmission, no indentation
    write_view(
        output_dir,
        "rates_compact.json",
        &serde_json::to_vec(corpus.records())?,
        &mut outputs,
    )?;

    write_view(
        output_dir,
        "rates_summary.json",
        &serde_json::to_vec_pretty(&build_summary(corpus))?,
        &mut outputs,
    )?;

    write_view(
        output_dir,
        "rates_latest.json",
        &serde_json::to_vec_pretty(&build_latest(corpus))?,
        &mut outputs,
    )?;

    if let Some(code) = currency_filter {
        let view = build_single_currency(corpus, code);
        if view.is_empty() {
            return Err(Error::currency_not_found(code.to_uppercase()));
        }
        let name = format!("rates_{}.json", code.to_lowercase());
        write_view(output_dir, &name, &serde_json::to_vec_pretty(&view)?, &mut outputs)?;
    }

    Ok(outputs)
}

fn write_view(
    output_dir: &Path,
    name: &str,
    content: &[u8],
    outputs: &mut Vec<(String, u64)>,
) -> Result<()> {
    let path: PathBuf = output_dir.join(name);
    std::fs::write(&path, content)
        .map_err(|e| Error::io(format!("failed to write '{}'", path.display()), e))?;

    info!("Exported {} ({} bytes)", path.display(), content.len());
    outputs.push((name.to_string(), content.len() as u64));
    Ok(())
}
