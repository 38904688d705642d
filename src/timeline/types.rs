//! Data types produced by the timeline pipeline.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ratings::display_name;

/// Tuning knobs for the season-local LOWESS smoother.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Fraction of a season's points used for each local fit.
    pub frac: f64,
    /// Number of robustness reweighting passes after the initial fit.
    pub iterations: usize,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            frac: 0.8,
            iterations: 3,
        }
    }
}

impl SmoothingParams {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.frac.is_finite() && self.frac > 0.0 && self.frac <= 1.0,
            "smoothing fraction must be in (0, 1], got {}",
            self.frac
        );
        Ok(())
    }
}

/// A rating record with its timeline position and smoothed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AugmentedRecord {
    pub season: u32,
    pub episode: u32,
    pub rating: f64,
    pub episode_norm: f64,
    pub rating_smoothed: f64,
}

/// The augmented table for one show, rows in the same order as the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowTimeline {
    pub show: String,
    pub records: Vec<AugmentedRecord>,
}

impl ShowTimeline {
    pub fn display_name(&self) -> String {
        display_name(&self.show)
    }

    pub fn max_season(&self) -> u32 {
        self.records.iter().map(|r| r.season).max().unwrap_or(0)
    }

    /// Groups records by season (ascending), each group ordered by episode.
    pub fn seasons(&self) -> BTreeMap<u32, Vec<&AugmentedRecord>> {
        let mut groups: BTreeMap<u32, Vec<&AugmentedRecord>> = BTreeMap::new();
        for r in &self.records {
            groups.entry(r.season).or_default().push(r);
        }
        for group in groups.values_mut() {
            group.sort_by_key(|r| r.episode);
        }
        groups
    }

    /// Smallest and largest value across raw and smoothed ratings.
    pub fn rating_range(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .flat_map(|r| [r.rating, r.rating_smoothed])
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Timeline x-positions where one season ends and the next begins.
pub fn season_boundaries(max_season: u32) -> Vec<f64> {
    (2..=max_season).map(f64::from).collect()
}

/// Season-midpoint tick positions paired with their season labels.
pub fn season_ticks(max_season: u32) -> Vec<(f64, u32)> {
    (1..=max_season).map(|s| (f64::from(s) + 0.5, s)).collect()
}
