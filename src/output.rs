//! Output formatting and persistence for augmented timelines.
//!
//! Supports logging a preview of the table, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::render::prepare_output;
use crate::timeline::types::ShowTimeline;
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Number of rows shown by [`print_head`].
pub const HEAD_ROWS: usize = 20;

/// Logs the first `rows` augmented records of a timeline.
pub fn print_head(timeline: &ShowTimeline, rows: usize) {
    info!(
        show = %timeline.show,
        rows = timeline.records.len(),
        max_season = timeline.max_season(),
        "Timeline preview"
    );
    for r in timeline.records.iter().take(rows) {
        info!(
            season = r.season,
            episode = r.episode,
            rating = r.rating,
            episode_norm = r.episode_norm,
            rating_smoothed = r.rating_smoothed,
            "Row"
        );
    }
}

/// Logs the timeline as pretty-printed JSON.
pub fn print_json(timeline: &ShowTimeline) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(&timeline.records)?);
    Ok(())
}

/// Writes the augmented table to a CSV file, replacing any existing file.
pub fn write_records(path: impl AsRef<Path>, timeline: &ShowTimeline) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), rows = timeline.records.len(), "Writing augmented CSV");

    prepare_output(path)?;

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in &timeline.records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
