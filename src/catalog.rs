//! Trait and types for discovering which shows have rating data.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File-name suffix identifying a show's ratings table.
pub const RATINGS_SUFFIX: &str = "_ratings.csv";

/// Abstraction over a source of per-show ratings tables.
pub trait ShowCatalog {
    /// Returns all available show identifiers, sorted.
    fn list_shows(&self) -> Result<Vec<String>>;

    /// Returns the location of the ratings table for `show`.
    fn ratings_path(&self, show: &str) -> PathBuf;
}

/// A directory of `<show>_ratings.csv` files.
#[derive(Debug, Clone)]
pub struct DataDirCatalog {
    data_dir: PathBuf,
}

impl DataDirCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl ShowCatalog for DataDirCatalog {
    fn list_shows(&self) -> Result<Vec<String>> {
        let mut shows = Vec::new();

        let entries = fs::read_dir(&self.data_dir)
            .with_context(|| format!("failed to read data directory {}", self.data_dir.display()))?;

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if let Some(show) = file_name.strip_suffix(RATINGS_SUFFIX) {
                    if !show.is_empty() {
                        shows.push(show.to_string());
                    }
                }
            }
        }

        shows.sort();
        Ok(shows)
    }

    fn ratings_path(&self, show: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", show, RATINGS_SUFFIX))
    }
}
