//! BCV Exchange Rate Extractor Library
//!
//! A Rust library for consolidating the official exchange rate tables published
//! by the BCV as quarterly spreadsheet workbooks into a single queryable dataset.
//!
//! This library provides tools for:
//! - Parsing loosely structured worksheet grids with variable header positions
//! - Resolving the observation date from labelled cells or the sheet name
//! - Normalizing rate rows into a uniform record shape with per-row validation
//! - Persisting the consolidated dataset as CSV and re-exporting JSON views
//! - Querying rates by date, by currency, latest-value and summary statistics

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod corpus;
        pub mod exporter;
        pub mod query;
        pub mod sheet_parser;
        pub mod workbook;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Corpus, DateOrigin, RateRecord};
pub use config::Config;

/// Result type alias for the BCV extractor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for extraction, persistence and query operations
///
/// Expected-miss conditions (undateable sheet, malformed row, missing table
/// header) are not represented here: they are ordinary control flow handled
/// with `Option` returns and logged outcomes inside the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Workbook could not be opened or read
    #[error("workbook error in '{file}': {message}")]
    Workbook { file: String, message: String },

    /// CSV dataset read/write error
    #[error("CSV error in '{file}': {message}")]
    CsvDataset {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON export error
    #[error("JSON export error: {message}")]
    JsonExport {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// User-supplied date string not recognized by any supported format
    #[error("unrecognized date format: '{input}'")]
    DateFormat { input: String },

    /// The extraction run produced no records, or the dataset is empty
    #[error("no exchange rate data: {message}")]
    EmptyCorpus { message: String },

    /// File not found
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Currency code not present in the dataset
    #[error("currency not found: {code}")]
    CurrencyNotFound { code: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a workbook error with file context
    pub fn workbook(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Workbook {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a CSV dataset error with file context
    pub fn csv_dataset(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvDataset {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON export error
    pub fn json_export(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonExport {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a date format error
    pub fn date_format(input: impl Into<String>) -> Self {
        Self::DateFormat {
            input: input.into(),
        }
    }

    /// Create an empty corpus error
    pub fn empty_corpus(message: impl Into<String>) -> Self {
        Self::EmptyCorpus {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a currency not found error
    pub fn currency_not_found(code: impl Into<String>) -> Self {
        Self::CurrencyNotFound { code: code.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvDataset {
            file: "unknown".to_string(),
            message: "CSV processing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonExport {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
