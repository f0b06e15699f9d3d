//! Configuration for extraction and export runs
//!
//! All paths the pipeline touches are gathered here explicitly; there is no
//! hidden process-wide state.

use crate::constants::{DEFAULT_DATASET_FILE, DEFAULT_EXPORT_DIR, DEFAULT_INPUT_DIR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run configuration for the BCV extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the quarterly workbook files
    pub input_dir: PathBuf,

    /// Path of the consolidated CSV dataset
    pub dataset_path: PathBuf,

    /// Directory receiving JSON exports
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            dataset_path: PathBuf::from(DEFAULT_DATASET_FILE),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

impl Config {
    /// Create a configuration with explicit paths
    pub fn new(input_dir: PathBuf, dataset_path: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            input_dir,
            dataset_path,
            export_dir,
        }
    }

    /// Validate that the input directory exists and is a directory
    pub fn validate_input_dir(&self) -> Result<()> {
        if !self.input_dir.exists() {
            return Err(Error::configuration(format!(
                "input directory '{}' does not exist",
                self.input_dir.display()
            )));
        }
        if !self.input_dir.is_dir() {
            return Err(Error::configuration(format!(
                "input path '{}' is not a directory",
                self.input_dir.display()
            )));
        }
        Ok(())
    }

    /// Create the export directory if it does not exist yet
    pub fn ensure_export_dir(&self) -> Result<()> {
        if !self.export_dir.exists() {
            std::fs::create_dir_all(&self.export_dir).map_err(|e| {
                Error::configuration(format!(
                    "failed to create export directory '{}': {}",
                    self.export_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.input_dir, PathBuf::from("Data_xls"));
        assert_eq!(config.dataset_path, PathBuf::from("exchange_rates.csv"));
        assert_eq!(config.export_dir, PathBuf::from("exports"));
    }

    #[test]
    fn test_validate_input_dir() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::new(
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("rates.csv"),
            temp_dir.path().join("exports"),
        );
        assert!(config.validate_input_dir().is_ok());

        let missing = Config::new(
            temp_dir.path().join("missing"),
            temp_dir.path().join("rates.csv"),
            temp_dir.path().join("exports"),
        );
        assert!(missing.validate_input_dir().is_err());
    }

    #[test]
    fn test_ensure_export_dir_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(
            temp_dir.path().to_path_buf(),
            temp_dir.path().join("rates.csv"),
            temp_dir.path().join("nested").join("exports"),
        );

        config.ensure_export_dir().unwrap();
        assert!(config.export_dir.is_dir());
    }
}
