//! Chart rendering.
//!
//! Static SVG heatmaps and time series are drawn with `plotters`; the
//! comparison dashboard is a standalone HTML page charted client-side.

pub mod dashboard;
pub mod heatmap;
pub mod time_series;

use anyhow::{Context, Result};
use std::path::Path;

/// Creates the parent directory of `path` if it is missing.
pub(crate) fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory {}", parent.display()))?;
    }
    Ok(())
}
