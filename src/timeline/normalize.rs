//! Maps episodes onto a continuous, season-contiguous timeline.
//!
//! Season `s` occupies `[s, s + 1]`: its first episode sits at `s` and its
//! last at `s + 1`, with the rest spaced evenly by rank. A season with a
//! single episode is pinned to `s`.

/// Position of the episode at `rank` (0-based) among `count` episodes, in `[1.0, 2.0]`.
pub fn season_fraction(rank: usize, count: usize) -> f64 {
    if count <= 1 {
        return 1.0;
    }
    1.0 + rank as f64 / (count - 1) as f64
}

/// Timeline positions for one season's episodes, already ordered by episode number.
pub fn normalize_season(season: u32, count: usize) -> Vec<f64> {
    let offset = f64::from(season) - 1.0;
    (0..count)
        .map(|rank| offset + season_fraction(rank, count))
        .collect()
}
