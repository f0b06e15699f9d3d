//! Corpus-level orchestration
//!
//! Discovers workbook files in a directory, processes each through the
//! workbook processor in deterministic (sorted filename) order and
//! consolidates the results into a sorted [`Corpus`]. An empty result is an
//! ordinary outcome reported through the returned report, never an error;
//! the caller decides whether it is fatal.

use crate::app::models::{Corpus, RateRecord};
use crate::app::services::sheet_parser::ExtractionStats;
use crate::app::services::workbook::process_workbook;
use crate::config::Config;
use crate::constants::WORKBOOK_EXTENSIONS;
use crate::{Error, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Aggregate statistics for one extraction run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Workbook files discovered in the input directory
    pub workbooks_found: usize,

    /// Workbooks that could not be opened at all
    pub workbooks_failed: usize,

    /// Per-sheet outcome counts merged across all workbooks
    pub extraction: ExtractionStats,
}

/// Result of a full extraction run
#[derive(Debug, Clone, Default)]
pub struct CorpusReport {
    /// The consolidated, sorted record set (possibly empty)
    pub corpus: Corpus,

    /// Aggregate run statistics
    pub stats: RunStats,
}

/// Discover workbook files in `directory`, sorted by filename for determinism
pub fn discover_workbooks(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for extension in WORKBOOK_EXTENSIONS {
        let pattern = format!("{}/*.{}", directory.display(), extension);
        let entries = glob(&pattern).map_err(|e| {
            Error::configuration(format!("invalid workbook pattern '{}': {}", pattern, e))
        })?;

        for entry in entries {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => warn!("skipping unreadable directory entry: {}", e),
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Consolidate a pre-discovered list of workbook files into a corpus
///
/// The caller discovers the files once (sizing any progress display from the
/// same list) and this function processes exactly those. `on_workbook` is
/// invoked after each workbook finishes processing, giving the CLI a
/// completion hook for progress reporting without coupling the pipeline to
/// a terminal.
pub fn build_corpus<F>(files: &[PathBuf], mut on_workbook: F) -> CorpusReport
where
    F: FnMut(&Path),
{
    let mut stats = RunStats {
        workbooks_found: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        return CorpusReport {
            corpus: Corpus::default(),
            stats,
        };
    }

    info!("Processing {} workbook files", files.len());

    let mut all_records: Vec<RateRecord> = Vec::new();

    for path in files {
        match process_workbook(path) {
            Ok(result) => {
                stats.extraction.merge(&result.stats);
                all_records.extend(result.records);
            }
            Err(e) => {
                // Fatal only for this file; the run continues
                error!("{}", e);
                stats.workbooks_failed += 1;
            }
        }

        on_workbook(path);
    }

    let corpus = Corpus::from_records(all_records);

    if corpus.is_empty() {
        warn!("extraction produced no records");
    } else if let Some((first, last)) = corpus.date_range() {
        info!(
            "Extraction complete: {} records consolidated, {} to {}",
            corpus.len(),
            first,
            last
        );
    }

    CorpusReport { corpus, stats }
}

/// Discover and consolidate every workbook under the configured input directory
pub fn run(config: &Config) -> Result<CorpusReport> {
    let files = discover_workbooks(&config.input_dir)?;
    if files.is_empty() {
        warn!("no workbook files found in {}", config.input_dir.display());
    }
    Ok(build_corpus(&files, |_| {}))
}
