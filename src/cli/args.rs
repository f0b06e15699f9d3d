//! Command-line argument definitions for the BCV extractor
//!
//! Defines the complete CLI interface using the clap derive API: the
//! extraction run, the JSON export step and the query front-ends.

use crate::constants::{DEFAULT_DATASET_FILE, DEFAULT_EXPORT_DIR, DEFAULT_INPUT_DIR};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the BCV exchange rate extractor
///
/// Consolidates the official BCV exchange rate tables published as quarterly
/// spreadsheet workbooks into a single CSV dataset, exports JSON projections
/// and answers rate queries against the consolidated data.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bcv-rates",
    version,
    about = "Consolidate and query official BCV exchange rate workbooks",
    long_about = "Extracts the currency exchange rate tables published by the BCV as quarterly \
                  spreadsheet workbooks, consolidates them into a single CSV dataset, re-exports \
                  JSON projections optimized for different lookup patterns, and answers queries \
                  by date, by currency, latest-value and summary statistics."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Args {
    /// Map verbosity flags to a tracing level directive
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Whether the progress bar should be shown
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract rate tables from workbooks into the consolidated CSV dataset
    Extract(ExtractArgs),
    /// Export JSON projections derived from the consolidated dataset
    Export(ExportArgs),
    /// Query the consolidated dataset
    Query(QueryArgs),
}

/// Arguments for the extract command (main pipeline run)
#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
    /// Directory containing the quarterly .xls/.xlsx workbooks
    #[arg(
        short = 'i',
        long = "input",
        value_name = "DIR",
        default_value = DEFAULT_INPUT_DIR,
        help = "Directory containing the quarterly workbook files"
    )]
    pub input_dir: PathBuf,

    /// Path of the consolidated CSV dataset to write
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_DATASET_FILE,
        help = "Path of the consolidated CSV dataset"
    )]
    pub dataset: PathBuf,

    /// List the workbooks that would be processed without extracting
    #[arg(long = "dry-run", help = "List discovered workbooks without processing")]
    pub dry_run: bool,
}

/// Arguments for the export command (JSON projections)
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Consolidated CSV dataset produced by `extract`
    #[arg(
        short = 'd',
        long = "dataset",
        value_name = "FILE",
        default_value = DEFAULT_DATASET_FILE,
        help = "Consolidated CSV dataset to project"
    )]
    pub dataset: PathBuf,

    /// Directory receiving the JSON files
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_EXPORT_DIR,
        help = "Directory receiving the JSON exports"
    )]
    pub output_dir: PathBuf,

    /// Additionally export a single-currency by-date view (e.g. USD)
    #[arg(
        short = 'c',
        long = "currency",
        value_name = "CODE",
        help = "Also export a single-currency by-date view"
    )]
    pub currency: Option<String>,
}

/// Arguments for the query command group
#[derive(Debug, Clone, Parser)]
pub struct QueryArgs {
    /// Consolidated CSV dataset produced by `extract`
    #[arg(
        short = 'd',
        long = "dataset",
        value_name = "FILE",
        default_value = DEFAULT_DATASET_FILE,
        global = true,
        help = "Consolidated CSV dataset to query"
    )]
    pub dataset: PathBuf,

    #[command(subcommand)]
    pub command: QueryCommands,
}

/// Query front-ends over the consolidated dataset
#[derive(Debug, Clone, Subcommand)]
pub enum QueryCommands {
    /// Rates observed on a specific date
    ///
    /// Accepts ISO (2025-03-08), day-first (08/03/2025, 08-03-2025),
    /// month-first (03/08/2025), year-first (2025/03/08) or Spanish free
    /// text ("marzo 8 2025").
    Date {
        /// Date to look up, in any supported format
        date: String,
    },
    /// History of one currency, newest first
    Currency {
        /// Currency code, e.g. USD (case-insensitive)
        code: String,

        /// Lower date bound, inclusive
        #[arg(long = "from", value_name = "DATE")]
        from: Option<String>,

        /// Upper date bound, inclusive
        #[arg(long = "to", value_name = "DATE")]
        to: Option<String>,
    },
    /// Rates at the most recent observation date
    Latest {
        /// Restrict to one currency code
        #[arg(short = 'c', long = "currency", value_name = "CODE")]
        currency: Option<String>,
    },
    /// Summary statistics for one currency, or for the whole dataset
    Stats {
        /// Currency code; omit for a dataset-wide summary
        code: Option<String>,
    },
    /// List distinct observation dates
    Dates {
        /// Restrict to one year
        #[arg(long = "year", value_name = "YYYY")]
        year: Option<i32>,

        /// Restrict to one month (1-12)
        #[arg(long = "month", value_name = "MM")]
        month: Option<u32>,
    },
    /// List distinct currencies with their country names
    Currencies,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        let mut args = Args {
            command: None,
            verbose: 0,
            quiet: false,
        };
        assert_eq!(args.log_level(), "info");

        args.verbose = 1;
        assert_eq!(args.log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.log_level(), "trace");

        args.quiet = true;
        assert_eq!(args.log_level(), "warn");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_extract_defaults() {
        let args = Args::parse_from(["bcv-rates", "extract"]);
        let Some(Commands::Extract(extract)) = args.command else {
            panic!("expected extract command");
        };
        assert_eq!(extract.input_dir, PathBuf::from("Data_xls"));
        assert_eq!(extract.dataset, PathBuf::from("exchange_rates.csv"));
        assert!(!extract.dry_run);
    }

    #[test]
    fn test_query_date_parses() {
        let args = Args::parse_from(["bcv-rates", "query", "date", "marzo 8 2025"]);
        let Some(Commands::Query(query)) = args.command else {
            panic!("expected query command");
        };
        let QueryCommands::Date { date } = query.command else {
            panic!("expected date query");
        };
        assert_eq!(date, "marzo 8 2025");
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
