//! Raw episode-rating records for a single show.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};

/// One row of a `<show>_ratings.csv` file.
///
/// Extra columns in the source file are ignored by the CSV reader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub season: u32,
    pub episode: u32,
    pub rating: f64,
}

/// All rating records of one show, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowRatings {
    pub show: String,
    pub records: Vec<RatingRecord>,
}

impl ShowRatings {
    /// Builds a validated table.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty, if a season or episode number is zero,
    /// or if any rating is not a finite number.
    pub fn new(show: &str, records: Vec<RatingRecord>) -> Result<Self> {
        ensure!(!records.is_empty(), "show '{}' has no rating rows", show);

        for (row, r) in records.iter().enumerate() {
            // header is line 1
            let line = row + 2;
            if r.season == 0 || r.episode == 0 {
                bail!(
                    "show '{}' line {}: season and episode must be positive (got season={}, episode={})",
                    show,
                    line,
                    r.season,
                    r.episode
                );
            }
            if !r.rating.is_finite() {
                bail!(
                    "show '{}' line {}: rating for S{}E{} is not a finite number",
                    show,
                    line,
                    r.season,
                    r.episode
                );
            }
        }

        Ok(Self {
            show: show.to_string(),
            records,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_season(&self) -> u32 {
        self.records.iter().map(|r| r.season).max().unwrap_or(0)
    }

    pub fn display_name(&self) -> String {
        display_name(&self.show)
    }
}

/// Turns a show identifier into a human-readable title.
///
/// | Identifier        | Display name       |
/// |-------------------|--------------------|
/// | `queens_gambit`   | `Queens Gambit`    |
/// | `_the_undoing_`   | `The Undoing`      |
/// | `1883`            | `1883`             |
pub fn display_name(show: &str) -> String {
    let mut out = String::with_capacity(show.len());
    let mut prev_is_letter = false;

    for c in show.trim_matches('_').chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
