//! CSV loader for per-show rating tables.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::ratings::{RatingRecord, ShowRatings};

/// Parses a ratings CSV (header row required) from any reader.
///
/// # Errors
///
/// Returns an error on CSV syntax errors, missing `season`/`episode`/`rating`
/// columns, non-numeric values, or any validation failure of [`ShowRatings::new`].
pub fn parse_ratings<R: Read>(show: &str, reader: R) -> Result<ShowRatings> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();

    for result in rdr.deserialize() {
        let record: RatingRecord =
            result.with_context(|| format!("malformed ratings row for show '{}'", show))?;
        records.push(record);
    }

    ShowRatings::new(show, records)
}

/// Loads and validates the ratings table at `path`.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_ratings(show: &str, path: impl AsRef<Path>) -> Result<ShowRatings> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open ratings file {}", path.display()))?;

    let ratings = parse_ratings(show, file)?;
    debug!(rows = ratings.len(), max_season = ratings.max_season(), "Ratings loaded");

    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let csv = "season,episode,rating\n1,1,8.0\n1,2,8.5\n2,1,7.0\n";
        let ratings = parse_ratings("demo", csv.as_bytes()).unwrap();

        assert_eq!(ratings.show, "demo");
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings.records[2].season, 2);
        assert_eq!(ratings.records[1].rating, 8.5);
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let csv = "season,episode,title,rating,votes\n1,1,Pilot,8.1,1200\n";
        let ratings = parse_ratings("demo", csv.as_bytes()).unwrap();

        assert_eq!(ratings.records[0].rating, 8.1);
    }

    #[test]
    fn test_parse_non_numeric_rating_fails() {
        let csv = "season,episode,rating\n1,1,great\n";
        let err = parse_ratings("demo", csv.as_bytes()).unwrap_err();

        assert!(err.to_string().contains("demo"));
    }

    #[test]
    fn test_parse_missing_rating_fails() {
        let csv = "season,episode,rating\n1,1,\n";
        assert!(parse_ratings("demo", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_nan_rating_fails() {
        let csv = "season,episode,rating\n1,1,NaN\n";
        assert!(parse_ratings("demo", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_missing_column_fails() {
        let csv = "season,episode\n1,1\n";
        assert!(parse_ratings("demo", csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_ratings("ghost", "/definitely/not/here_ratings.csv").unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
