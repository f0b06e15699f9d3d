//! Command implementations for the BCV extractor CLI
//!
//! Contains the command execution logic, logging setup, progress reporting
//! and console output for extraction runs, JSON exports and rate queries.

use crate::app::models::{Corpus, RateRecord};
use crate::app::services::corpus::{CorpusReport, build_corpus, discover_workbooks};
use crate::app::services::exporter::{export_json_views, load_corpus, write_corpus};
use crate::app::services::query::{CurrencyStats, QueryEngine, normalize_date};
use crate::cli::args::{Args, Commands, ExportArgs, ExtractArgs, QueryArgs, QueryCommands};
use crate::config::Config;
use crate::constants::{DEFAULT_EXPORT_DIR, DEFAULT_INPUT_DIR, NEAREST_DATE_SUGGESTIONS};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

/// Main command dispatcher
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    match args.command.clone() {
        Some(Commands::Extract(extract_args)) => run_extract(&args, &extract_args),
        Some(Commands::Export(export_args)) => run_export(&export_args),
        Some(Commands::Query(query_args)) => run_query(&query_args),
        None => Ok(()),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bcv_rates={}", args.log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", args.log_level());
}

// =============================================================================
// Extract
// =============================================================================

fn run_extract(args: &Args, extract_args: &ExtractArgs) -> Result<()> {
    let config = Config::new(
        extract_args.input_dir.clone(),
        extract_args.dataset.clone(),
        DEFAULT_EXPORT_DIR.into(),
    );
    config.validate_input_dir()?;

    if extract_args.dry_run {
        return run_extract_dry_run(&config);
    }

    info!("Starting extraction from {}", config.input_dir.display());

    let workbooks = discover_workbooks(&config.input_dir)?;
    let progress_bar = if args.show_progress() && !workbooks.is_empty() {
        let pb = ProgressBar::new(workbooks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // The hook fires as each workbook completes, so the bar tracks
    // finished files against the list sized above
    let report = build_corpus(&workbooks, |path| {
        if let Some(pb) = &progress_bar {
            pb.inc(1);
            pb.set_message(path.file_name().unwrap_or_default().to_string_lossy().to_string());
        }
    });

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    if report.corpus.is_empty() {
        print_empty_run(&config, &report);
        return Err(Error::empty_corpus(format!(
            "no records extracted from '{}'",
            config.input_dir.display()
        )));
    }

    write_corpus(&report.corpus, &config.dataset_path)?;
    print_extract_summary(&config, &report);
    Ok(())
}

fn run_extract_dry_run(config: &Config) -> Result<()> {
    let workbooks = discover_workbooks(&config.input_dir)?;

    println!(
        "\n{} {} workbook files in {}",
        "[*]".cyan(),
        workbooks.len(),
        config.input_dir.display()
    );
    for path in &workbooks {
        println!("    {}", path.display());
    }
    println!("\nDry run: no files were processed.");
    Ok(())
}

fn print_empty_run(config: &Config, report: &CorpusReport) {
    if report.stats.workbooks_found == 0 {
        println!(
            "\n{} no workbook files found in {}",
            "[X]".red(),
            config.input_dir.display()
        );
    } else {
        println!(
            "\n{} {} workbooks processed but no records were extracted",
            "[X]".red(),
            report.stats.workbooks_found
        );
    }
}

fn print_extract_summary(config: &Config, report: &CorpusReport) {
    let corpus = &report.corpus;
    let stats = &report.stats;

    println!("\n{} Extraction complete", "[OK]".green());
    println!("{}", "─".repeat(60));
    println!("   Records consolidated: {}", corpus.len());
    if let Some((first, last)) = corpus.date_range() {
        println!("   Date range:           {} to {}", first, last);
    }
    println!("   Distinct currencies:  {}", corpus.currency_count());
    println!(
        "   Workbooks processed:  {} ({} unreadable)",
        stats.workbooks_found, stats.workbooks_failed
    );
    println!(
        "   Sheets extracted:     {}/{} ({} skipped)",
        stats.extraction.sheets_extracted,
        stats.extraction.sheets_total,
        stats.extraction.sheets_skipped()
    );

    let size = std::fs::metadata(&config.dataset_path)
        .map(|m| m.len())
        .unwrap_or(0);
    println!(
        "   Dataset:              {} ({})",
        config.dataset_path.display(),
        format_size(size)
    );
    println!();
}

// =============================================================================
// Export
// =============================================================================

fn run_export(export_args: &ExportArgs) -> Result<()> {
    let corpus = load_dataset(&export_args.dataset)?;

    let config = Config::new(
        DEFAULT_INPUT_DIR.into(),
        export_args.dataset.clone(),
        export_args.output_dir.clone(),
    );
    config.ensure_export_dir()?;

    let outputs = export_json_views(
        &corpus,
        &export_args.output_dir,
        export_args.currency.as_deref(),
    )?;

    println!(
        "\n{} {} JSON views exported to {}",
        "[OK]".green(),
        outputs.len(),
        export_args.output_dir.display()
    );
    for (name, size) in &outputs {
        println!("   {:<28} {}", name, format_size(*size));
    }
    println!();
    Ok(())
}

// =============================================================================
// Query
// =============================================================================

fn run_query(query_args: &QueryArgs) -> Result<()> {
    let corpus = load_dataset(&query_args.dataset)?;
    let engine = QueryEngine::new(&corpus);

    match &query_args.command {
        QueryCommands::Date { date } => query_date(&engine, date),
        QueryCommands::Currency { code, from, to } => query_currency(&engine, code, from, to),
        QueryCommands::Latest { currency } => query_latest(&engine, currency.as_deref()),
        QueryCommands::Stats { code } => query_stats(&engine, &corpus, code.as_deref()),
        QueryCommands::Dates { year, month } => {
            query_dates(&engine, *year, *month);
            Ok(())
        }
        QueryCommands::Currencies => {
            query_currencies(&engine);
            Ok(())
        }
    }
}

fn query_date(engine: &QueryEngine, input: &str) -> Result<()> {
    let date = match normalize_date(input) {
        Ok(date) => date,
        Err(e) => {
            println!("\n{} {}", "[X]".red(), e);
            println!("    Supported formats: 2025-03-08, 08/03/2025, marzo 8 2025");
            return Err(e);
        }
    };

    let rates = engine.rates_on(date);
    if rates.is_empty() {
        println!("\n{} no data for {}", "[!]".yellow(), date);
        let nearest = engine.nearest_dates(date, NEAREST_DATE_SUGGESTIONS);
        if !nearest.is_empty() {
            println!("\n    Nearest available dates:");
            for (candidate, offset) in nearest {
                let label = match offset {
                    0 => "same day".to_string(),
                    d if d > 0 => format!("+{} days", d),
                    d => format!("{} days", d),
                };
                println!("    - {} ({})", candidate, label);
            }
        }
        return Ok(());
    }

    println!("\nExchange rates for {}", date.to_string().bold());
    print_rate_table(&rates);
    Ok(())
}

fn query_currency(
    engine: &QueryEngine,
    code: &str,
    from: &Option<String>,
    to: &Option<String>,
) -> Result<()> {
    let from_date = from.as_deref().map(normalize_date).transpose()?;
    let to_date = to.as_deref().map(normalize_date).transpose()?;

    let history = engine.currency_history(code, from_date, to_date);
    if history.is_empty() {
        println!("\n{} no data for currency '{}'", "[X]".red(), code);
        let available: Vec<String> = engine.currencies().into_iter().map(|(c, _)| c).collect();
        if !available.is_empty() {
            println!("    Available currencies: {}", available.join(", "));
        }
        return Err(Error::currency_not_found(code.to_uppercase()));
    }

    println!(
        "\nHistory for {} ({} observations, newest first)",
        history[0].currency.bold(),
        history.len()
    );
    println!(
        "{:<12} {:>14} {:>14} {:>14}   {}",
        "Date", "Buy (Bs.)", "Sell (Bs.)", "Mid (Bs.)", "Source"
    );
    println!("{}", "─".repeat(76));
    for record in &history {
        println!(
            "{:<12} {:>14.4} {:>14.4} {:>14.4}   {}",
            record.date.to_string(),
            record.buy_rate,
            record.sell_rate,
            record.mid_rate(),
            record.source_file
        );
    }

    let mids: Vec<f64> = history.iter().map(|r| r.mid_rate()).collect();
    let min = mids.iter().copied().fold(f64::INFINITY, f64::min);
    let max = mids.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = mids.iter().sum::<f64>() / mids.len() as f64;
    println!("{}", "─".repeat(76));
    println!(
        "{:<12} {:>14.4} {:>14.4} {:>14.4}",
        "min/max/mean", min, max, mean
    );
    println!();
    Ok(())
}

fn query_latest(engine: &QueryEngine, currency: Option<&str>) -> Result<()> {
    match currency {
        Some(code) => {
            let Some(record) = engine.latest_for(code) else {
                println!("\n{} no data for currency '{}'", "[X]".red(), code);
                return Err(Error::currency_not_found(code.to_uppercase()));
            };
            println!("\nLatest rate for {} ({})", record.currency.bold(), record.date);
            println!("   Country:    {}", record.country);
            println!("   Buy (Bs.):  {:.4}", record.buy_rate);
            println!("   Sell (Bs.): {:.4}", record.sell_rate);
            println!("   Mid (Bs.):  {:.4}", record.mid_rate());
            println!();
        }
        None => {
            let rates = engine.latest();
            if rates.is_empty() {
                return Err(Error::empty_corpus("dataset holds no records".to_string()));
            }
            println!("\nLatest rates ({})", rates[0].date.to_string().bold());
            print_rate_table(&rates);
        }
    }
    Ok(())
}

fn query_stats(engine: &QueryEngine, corpus: &Corpus, code: Option<&str>) -> Result<()> {
    match code {
        Some(code) => {
            let Some(stats) = engine.stats_for(code) else {
                println!("\n{} no data for currency '{}'", "[X]".red(), code);
                return Err(Error::currency_not_found(code.to_uppercase()));
            };
            print_currency_stats(&stats);
        }
        None => {
            println!("\nDataset summary");
            println!("{}", "─".repeat(60));
            println!("   Records:     {}", corpus.len());
            if let Some((first, last)) = corpus.date_range() {
                println!("   Date range:  {} to {}", first, last);
            }
            println!("   Currencies:  {}", corpus.currency_count());
            println!();
            println!("{:<10} {:>6} {:>14} {:>14}", "Currency", "Obs", "First", "Last");
            println!("{}", "─".repeat(48));
            for (currency, _) in engine.currencies() {
                if let Some(stats) = engine.stats_for(&currency) {
                    println!(
                        "{:<10} {:>6} {:>14} {:>14}",
                        currency,
                        stats.observations,
                        stats.first_date.to_string(),
                        stats.last_date.to_string()
                    );
                }
            }
            println!();
        }
    }
    Ok(())
}

fn print_currency_stats(stats: &CurrencyStats) {
    println!("\nStatistics for {} ({})", stats.currency.bold(), stats.country);
    println!("{}", "─".repeat(60));
    println!("   Observations: {}", stats.observations);
    println!("   Date range:   {} to {}", stats.first_date, stats.last_date);
    println!();
    println!("{:<10} {:>14} {:>14} {:>14}", "", "Min", "Max", "Mean");
    println!(
        "{:<10} {:>14.4} {:>14.4} {:>14.4}",
        "Buy (Bs.)", stats.buy.min, stats.buy.max, stats.buy.mean
    );
    println!(
        "{:<10} {:>14.4} {:>14.4} {:>14.4}",
        "Sell (Bs.)", stats.sell.min, stats.sell.max, stats.sell.mean
    );
    println!(
        "{:<10} {:>14.4} {:>14.4} {:>14.4}",
        "Mid (Bs.)", stats.mid.min, stats.mid.max, stats.mid.mean
    );
    println!();
}

fn query_dates(engine: &QueryEngine, year: Option<i32>, month: Option<u32>) {
    let dates = engine.available_dates(year, month);
    if dates.is_empty() {
        println!("\n{} no dates match the filter", "[!]".yellow());
        return;
    }

    println!("\n{} observation dates (newest first):", dates.len());
    for date in dates.iter().rev() {
        println!("   {}", date);
    }
    println!();
}

fn query_currencies(engine: &QueryEngine) {
    let currencies = engine.currencies();
    println!("\n{} currencies in the dataset:", currencies.len());
    println!("{:<10} {}", "Code", "Country");
    println!("{}", "─".repeat(40));
    for (code, country) in &currencies {
        println!("{:<10} {}", code, country);
    }
    println!();
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Load the persisted dataset, with a hint when it is missing or empty
fn load_dataset(path: &Path) -> Result<Corpus> {
    let corpus = match load_corpus(path) {
        Ok(corpus) => corpus,
        Err(e @ Error::FileNotFound { .. }) => {
            println!("\n{} dataset not found: {}", "[X]".red(), path.display());
            println!("    Run 'bcv-rates extract' first to generate it.");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    if corpus.is_empty() {
        return Err(Error::empty_corpus(format!(
            "dataset '{}' holds no records",
            path.display()
        )));
    }
    Ok(corpus)
}

fn print_rate_table(rates: &[&RateRecord]) {
    println!(
        "{:<10} {:<24} {:>14} {:>14} {:>14}",
        "Currency", "Country", "Buy (Bs.)", "Sell (Bs.)", "Mid (Bs.)"
    );
    println!("{}", "─".repeat(80));
    for record in rates {
        println!(
            "{:<10} {:<24} {:>14.4} {:>14.4} {:>14.4}",
            record.currency,
            record.country,
            record.buy_rate,
            record.sell_rate,
            record.mid_rate()
        );
    }
    println!("\nTotal: {} records\n", rates.len());
}

/// Format a byte count in human-readable units
fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
