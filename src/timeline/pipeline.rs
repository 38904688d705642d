use anyhow::{Result, bail};
use std::collections::BTreeMap;
use tracing::debug;

use crate::ratings::ShowRatings;
use crate::timeline::lowess::lowess;
use crate::timeline::normalize::normalize_season;
use crate::timeline::types::{AugmentedRecord, ShowTimeline, SmoothingParams};

/// Places every episode of a show on the season timeline and smooths its
/// ratings within each season.
///
/// Rows come back in the same order as in `ratings`; seasons never share
/// data during smoothing. Two rows with the same season and episode are an
/// error.
#[tracing::instrument(skip(ratings, params), fields(show = %ratings.show, rows = ratings.len()))]
pub fn augment(ratings: &ShowRatings, params: &SmoothingParams) -> Result<ShowTimeline> {
    params.validate()?;

    let records = &ratings.records;
    let mut episode_norm = vec![0.0; records.len()];
    let mut smoothed = vec![0.0; records.len()];

    for (season, mut rows) in partition_by_season(ratings) {
        rows.sort_by_key(|&i| records[i].episode);
        if let Some(pair) = rows
            .windows(2)
            .find(|w| records[w[0]].episode == records[w[1]].episode)
        {
            bail!(
                "show '{}': duplicate rows for S{}E{} (lines {} and {})",
                ratings.show,
                season,
                records[pair[0]].episode,
                pair[0] + 2,
                pair[1] + 2
            );
        }

        let positions = normalize_season(season, rows.len());
        let xs: Vec<f64> = rows.iter().map(|&i| f64::from(records[i].episode)).collect();
        let ys: Vec<f64> = rows.iter().map(|&i| records[i].rating).collect();
        let fitted = lowess(&xs, &ys, params)?;

        for (k, &i) in rows.iter().enumerate() {
            episode_norm[i] = positions[k];
            smoothed[i] = fitted[k];
        }

        debug!(season, episodes = rows.len(), "Season smoothed");
    }

    let records = records
        .iter()
        .enumerate()
        .map(|(i, r)| AugmentedRecord {
            season: r.season,
            episode: r.episode,
            rating: r.rating,
            episode_norm: episode_norm[i],
            rating_smoothed: smoothed[i],
        })
        .collect();

    Ok(ShowTimeline {
        show: ratings.show.clone(),
        records,
    })
}

/// Row indices of `ratings` grouped by season, in file order within each group.
fn partition_by_season(ratings: &ShowRatings) -> BTreeMap<u32, Vec<usize>> {
    let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, r) in ratings.records.iter().enumerate() {
        groups.entry(r.season).or_default().push(i);
    }
    groups
}
