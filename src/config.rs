//! Runtime configuration.
//!
//! Stored as an optional JSON object on disk, every field defaulted:
//! ```json
//! {
//!   "data_dir": "data",
//!   "graphs_dir": "graphs",
//!   "smoothing": { "frac": 0.8, "iterations": 3 },
//!   "dashboard": { "default_shows": ["succession", "westworld"] }
//! }
//! ```
//! Environment variables `DATA_DIR` and `GRAPHS_DIR` override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::timeline::types::SmoothingParams;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "tv_ratings_viz.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub data_dir: PathBuf,
    pub graphs_dir: PathBuf,
    pub smoothing: SmoothingParams,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Shows pre-selected when the dashboard opens.
    pub default_shows: Vec<String>,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            graphs_dir: PathBuf::from("graphs"),
            smoothing: SmoothingParams::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_shows: vec!["succession".to_string(), "westworld".to_string()],
        }
    }
}

impl VizConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: VizConfig = serde_json::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolves the config: an explicit path must exist, otherwise
    /// `TV_VIZ_CONFIG` or [`DEFAULT_CONFIG_FILE`] is used when present,
    /// falling back to defaults. Environment overrides are applied last.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = std::env::var("TV_VIZ_CONFIG")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
                if candidate.exists() {
                    Self::load(&candidate)?
                } else {
                    debug!(path = %candidate.display(), "No config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies `DATA_DIR` / `GRAPHS_DIR` overrides from `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("GRAPHS_DIR").filter(|v| !v.is_empty()) {
            self.graphs_dir = PathBuf::from(dir);
        }
    }

    pub fn heatmap_dir(&self) -> PathBuf {
        self.graphs_dir.join("heatmaps")
    }

    pub fn time_series_dir(&self) -> PathBuf {
        self.graphs_dir.join("time_series")
    }
}
