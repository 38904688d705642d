//! CLI entry point for the TV ratings visualizer.
//!
//! Provides subcommands for listing the shows with rating data, smoothing a
//! single show's ratings, and rendering heatmaps, smoothed time-series charts
//! and the multi-show comparison dashboard.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use tv_ratings_viz::{
    catalog::{DataDirCatalog, ShowCatalog},
    config::VizConfig,
    loader::load_ratings,
    output::{HEAD_ROWS, print_head, print_json, write_records},
    ratings::display_name,
    render::{
        dashboard::{build_payload, render_dashboard},
        heatmap::{HeatmapGrid, Orientation, render_heatmap},
        time_series::render_time_series,
    },
    timeline::{
        pipeline::augment,
        types::{ShowTimeline, SmoothingParams, season_boundaries},
    },
};

#[derive(Parser)]
#[command(name = "tv_ratings_viz")]
#[command(about = "Heatmaps and smoothed rating curves for TV series", long_about = None)]
struct Cli {
    /// Directory containing <show>_ratings.csv files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory charts are written under
    #[arg(long, global = true)]
    graphs_dir: Option<PathBuf>,

    /// JSON config file (default: tv_ratings_viz.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// LOWESS neighbourhood fraction, in (0, 1]
    #[arg(long, global = true)]
    frac: Option<f64>,

    /// LOWESS robustness iterations
    #[arg(long, global = true)]
    iterations: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shows that have rating data
    List,
    /// Smooth one show's ratings and print or export the augmented table
    Smooth {
        /// Show identifier (file name without `_ratings.csv`)
        show: String,

        /// CSV file to write the augmented table to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also log the full table as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Number of rows to preview
        #[arg(long, default_value_t = HEAD_ROWS)]
        head: usize,
    },
    /// Render season x episode heatmaps (all shows if none given)
    Heatmap {
        shows: Vec<String>,

        /// Put episodes on the rows and seasons on the columns
        #[arg(long, default_value_t = false)]
        transpose: bool,
    },
    /// Render smoothed time-series charts (all shows if none given)
    TimeSeries { shows: Vec<String> },
    /// Build the interactive multi-show comparison dashboard
    Dashboard {
        /// Shows selected when the page opens (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// HTML file to write (default: <graphs_dir>/dashboard.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_logging()?;

    let cli = Cli::parse();

    let mut config = VizConfig::resolve(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.graphs_dir {
        config.graphs_dir = dir;
    }
    if let Some(frac) = cli.frac {
        config.smoothing.frac = frac;
    }
    if let Some(iterations) = cli.iterations {
        config.smoothing.iterations = iterations;
    }
    config.smoothing.validate()?;

    let catalog = DataDirCatalog::new(&config.data_dir);

    match cli.command {
        Commands::List => {
            let shows = catalog.list_shows()?;
            if shows.is_empty() {
                warn!(data_dir = %config.data_dir.display(), "No *_ratings.csv files found");
            }
            for show in &shows {
                info!(show = %show, name = %display_name(show), "Show");
            }
            info!(total = shows.len(), "Show list complete");
        }
        Commands::Smooth {
            show,
            output,
            json,
            head,
        } => {
            let timeline = load_timeline(&catalog, &show, &config.smoothing)?;

            info!(boundaries = ?season_boundaries(timeline.max_season()), "Season boundaries");
            print_head(&timeline, head);

            if json {
                print_json(&timeline)?;
            }
            if let Some(path) = output {
                write_records(&path, &timeline)?;
                info!(path = %path.display(), "Augmented table written");
            }
        }
        Commands::Heatmap { shows, transpose } => {
            let orientation = if transpose {
                Orientation::EpisodeRows
            } else {
                Orientation::SeasonRows
            };
            let out_dir = config.heatmap_dir();

            for show in resolve_shows(&catalog, shows)? {
                let ratings = load_ratings(&show, catalog.ratings_path(&show))?;
                let grid = HeatmapGrid::from_ratings(&ratings, orientation)?;
                let path = out_dir.join(format!("{}_heatmap.svg", show));

                render_heatmap(&grid, &format!("{} Ratings Heatmap", ratings.display_name()), &path)?;
                info!(show = %show, path = %path.display(), "Saved heatmap");
            }
        }
        Commands::TimeSeries { shows } => {
            let out_dir = config.time_series_dir();

            for show in resolve_shows(&catalog, shows)? {
                let timeline = load_timeline(&catalog, &show, &config.smoothing)?;
                let path = out_dir.join(format!("{}_time_series.svg", show));

                render_time_series(&timeline, &format!("{} Ratings", timeline.display_name()), &path)?;
                info!(show = %show, path = %path.display(), "Saved time series");
            }
        }
        Commands::Dashboard { select, output } => {
            let shows = catalog.list_shows()?;
            if shows.is_empty() {
                bail!("no shows found in {}", config.data_dir.display());
            }

            let timelines = shows
                .iter()
                .map(|show| load_timeline(&catalog, show, &config.smoothing))
                .collect::<Result<Vec<_>>>()?;

            let preferred = if select.is_empty() {
                config.dashboard.default_shows.clone()
            } else {
                select
            };
            let payload = build_payload(&timelines, &preferred);
            let path = output.unwrap_or_else(|| config.graphs_dir.join("dashboard.html"));

            render_dashboard(&payload, &path)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/tv_ratings_viz.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("tv_ratings_viz.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Returns `requested`, or every show in the catalog when none were named.
fn resolve_shows(catalog: &impl ShowCatalog, requested: Vec<String>) -> Result<Vec<String>> {
    if !requested.is_empty() {
        return Ok(requested);
    }
    let shows = catalog.list_shows()?;
    info!(count = shows.len(), "Processing all shows");
    Ok(shows)
}

/// Loads a show's ratings and runs the timeline pipeline on them.
#[tracing::instrument(skip(catalog, params))]
fn load_timeline(
    catalog: &impl ShowCatalog,
    show: &str,
    params: &SmoothingParams,
) -> Result<ShowTimeline> {
    let ratings = load_ratings(show, catalog.ratings_path(show))
        .with_context(|| format!("failed to load ratings for '{}'", show))?;
    augment(&ratings, params)
}
