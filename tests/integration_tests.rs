use std::fs;
use std::path::{Path, PathBuf};

use tv_ratings_viz::catalog::{DataDirCatalog, ShowCatalog};
use tv_ratings_viz::loader::load_ratings;
use tv_ratings_viz::output::write_records;
use tv_ratings_viz::render::dashboard::{build_payload, render_dashboard};
use tv_ratings_viz::render::heatmap::{HeatmapGrid, Orientation, render_heatmap};
use tv_ratings_viz::render::time_series::render_time_series;
use tv_ratings_viz::timeline::pipeline::augment;
use tv_ratings_viz::timeline::types::{ShowTimeline, SmoothingParams};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_timeline(show: &str) -> ShowTimeline {
    let catalog = DataDirCatalog::new(fixtures().join("data"));
    let ratings = load_ratings(show, catalog.ratings_path(show)).expect("Failed to load fixture");
    augment(&ratings, &SmoothingParams::default()).expect("Failed to augment fixture")
}

#[test]
fn test_catalog_lists_fixture_shows() {
    let catalog = DataDirCatalog::new(fixtures().join("data"));
    let shows = catalog.list_shows().unwrap();

    assert_eq!(shows, vec!["long_runner".to_string(), "mini_series".to_string()]);
}

#[test]
fn test_full_pipeline() {
    let timeline = load_timeline("mini_series");

    let identity: Vec<(u32, u32)> = timeline.records.iter().map(|r| (r.season, r.episode)).collect();
    assert_eq!(identity, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (3, 1)]);

    let norms: Vec<f64> = timeline.records.iter().map(|r| r.episode_norm).collect();
    assert_eq!(norms, vec![1.0, 1.5, 2.0, 2.0, 3.0, 3.0]);

    for r in &timeline.records[..3] {
        assert!(r.rating_smoothed >= 8.0 - 1e-9 && r.rating_smoothed <= 9.0 + 1e-9);
    }
    assert_eq!(timeline.records[5].rating_smoothed, 9.0);
}

#[test]
fn test_outlier_episode_is_smoothed_within_its_season() {
    let timeline = load_timeline("long_runner");

    let dip = timeline
        .records
        .iter()
        .find(|r| r.season == 2 && r.episode == 3)
        .unwrap();
    assert_eq!(dip.rating, 4.2);
    assert!(dip.rating_smoothed > 7.5);

    for (season, group) in timeline.seasons() {
        let offset = f64::from(season) - 1.0;
        assert_eq!(group.first().unwrap().episode_norm, offset + 1.0);
        assert_eq!(group.last().unwrap().episode_norm, offset + 2.0);
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    assert_eq!(load_timeline("long_runner"), load_timeline("long_runner"));
}

#[test]
fn test_broken_table_is_fatal() {
    let result = load_ratings("broken", fixtures().join("broken_ratings.csv"));
    assert!(result.is_err());
}

#[test]
fn test_render_all_outputs() {
    let out = std::env::temp_dir().join("tv_ratings_viz_integration_outputs");
    let _ = fs::remove_dir_all(&out);

    let catalog = DataDirCatalog::new(fixtures().join("data"));
    let mut timelines = Vec::new();

    for show in catalog.list_shows().unwrap() {
        let ratings = load_ratings(&show, catalog.ratings_path(&show)).unwrap();

        let grid = HeatmapGrid::from_ratings(&ratings, Orientation::SeasonRows).unwrap();
        render_heatmap(&grid, "Heatmap", out.join(format!("heatmaps/{}_heatmap.svg", show)))
            .unwrap();

        let timeline = augment(&ratings, &SmoothingParams::default()).unwrap();
        render_time_series(
            &timeline,
            "Time Series",
            out.join(format!("time_series/{}_time_series.svg", show)),
        )
        .unwrap();
        write_records(out.join(format!("{}_augmented.csv", show)), &timeline).unwrap();

        timelines.push(timeline);
    }

    let payload = build_payload(&timelines, &["mini_series".to_string()]);
    render_dashboard(&payload, out.join("dashboard.html")).unwrap();

    assert!(out.join("heatmaps/long_runner_heatmap.svg").exists());
    assert!(out.join("time_series/mini_series_time_series.svg").exists());
    assert!(out.join("mini_series_augmented.csv").exists());

    let html = fs::read_to_string(out.join("dashboard.html")).unwrap();
    assert!(html.contains("Long Runner"));
    assert!(html.contains(r#""default_selection":["mini_series"]"#));

    fs::remove_dir_all(&out).unwrap();
}
