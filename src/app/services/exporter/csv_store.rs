//! Canonical CSV persistence of the consolidated dataset
//!
//! Field order and names follow the record shape exactly and numeric values
//! round-trip at full f64 precision. Query and export commands read this file
//! back rather than re-running extraction.

use crate::app::models::{Corpus, RateRecord};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Write the corpus to `path` as a headed CSV table
pub fn write_corpus(corpus: &Corpus, path: &Path) -> Result<()> {
    let file_label = path.display().to_string();
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| Error::csv_dataset(&file_label, "failed to create dataset", Some(e)))?;

    for record in corpus.records() {
        writer
            .serialize(record)
            .map_err(|e| Error::csv_dataset(&file_label, "failed to write record", Some(e)))?;
    }

    writer
        .flush()
        .map_err(|e| Error::io(format!("failed to flush dataset '{}'", file_label), e))?;

    info!("Dataset saved: {} ({} records)", file_label, corpus.len());
    Ok(())
}

/// Load a previously persisted corpus from `path`
///
/// The records are re-sorted on load so the corpus invariant holds even if
/// the file was edited by hand.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let file_label = path.display().to_string();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::csv_dataset(&file_label, "failed to open dataset", Some(e)))?;

    let mut records: Vec<RateRecord> = Vec::new();
    for row in reader.deserialize() {
        let record: RateRecord = row
            .map_err(|e| Error::csv_dataset(&file_label, "malformed dataset row", Some(e)))?;
        records.push(record);
    }

    debug!("Loaded {} records from {}", records.len(), file_label);
    Ok(Corpus::from_records(records))
}
