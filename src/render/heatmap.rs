//! Season × episode rating heatmaps.

use anyhow::{Context, Result, bail};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

use crate::ratings::ShowRatings;
use crate::render::prepare_output;

const CELL_PX: u32 = 48;

// coolwarm endpoints and midpoint
const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Which key runs down the rows of the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    SeasonRows,
    EpisodeRows,
}

/// A pivoted ratings table.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    pub row_label: &'static str,
    pub col_label: &'static str,
    pub rows: Vec<u32>,
    pub cols: Vec<u32>,
    /// `cells[row][col]`, `None` where the combination does not exist.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    /// Pivots `ratings` into a grid.
    ///
    /// # Errors
    ///
    /// Fails if the same season/episode pair appears more than once.
    pub fn from_ratings(ratings: &ShowRatings, orientation: Orientation) -> Result<Self> {
        let (row_label, col_label) = match orientation {
            Orientation::SeasonRows => ("Season", "Episode"),
            Orientation::EpisodeRows => ("Episode", "Season"),
        };

        let mut values: BTreeMap<(u32, u32), f64> = BTreeMap::new();
        let mut row_keys = BTreeSet::new();
        let mut col_keys = BTreeSet::new();

        for r in &ratings.records {
            let (row, col) = match orientation {
                Orientation::SeasonRows => (r.season, r.episode),
                Orientation::EpisodeRows => (r.episode, r.season),
            };
            if values.insert((row, col), r.rating).is_some() {
                bail!(
                    "show '{}' has duplicate entries for S{}E{}",
                    ratings.show,
                    r.season,
                    r.episode
                );
            }
            row_keys.insert(row);
            col_keys.insert(col);
        }

        let rows: Vec<u32> = row_keys.into_iter().collect();
        let cols: Vec<u32> = col_keys.into_iter().collect();
        let cells = rows
            .iter()
            .map(|row| cols.iter().map(|col| values.get(&(*row, *col)).copied()).collect())
            .collect();

        Ok(Self {
            row_label,
            col_label,
            rows,
            cols,
            cells,
        })
    }

    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        let r = self.rows.iter().position(|&k| k == row)?;
        let c = self.cols.iter().position(|&k| k == col)?;
        self.cells[r][c]
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Maps `t` in `[0, 1]` onto a diverging blue → grey → red scale.
pub fn coolwarm(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let (from, to, local) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * local).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

/// Draws `grid` as an annotated SVG heatmap at `path`.
#[tracing::instrument(skip(grid, path), fields(path = %path.as_ref().display()))]
pub fn render_heatmap(grid: &HeatmapGrid, title: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let (lo, hi) = grid.value_range().context("heatmap has no cells")?;
    prepare_output(path)?;

    let n_rows = grid.rows.len() as f64;
    let n_cols = grid.cols.len() as f64;
    let width = grid.cols.len() as u32 * CELL_PX + 140;
    let height = grid.rows.len() as u32 * CELL_PX + 150;

    let root = SVGBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..n_cols, 0.0..n_rows)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc(grid.col_label)
        .y_desc(grid.row_label)
        .x_labels(0)
        .y_labels(0)
        .draw()?;

    // keys are labelled at cell centres; row 0 sits at the top of the chart
    let col_style = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (c, key) in grid.cols.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(c as f64 + 0.5, 0.0));
        root.draw(&Text::new(key.to_string(), (px, py + 6), col_style.clone()))?;
    }
    let row_style = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    for (r, key) in grid.rows.iter().enumerate() {
        let (px, py) = chart.backend_coord(&(0.0, n_rows - r as f64 - 0.5));
        root.draw(&Text::new(key.to_string(), (px - 6, py), row_style.clone()))?;
    }

    let cells: Vec<(f64, f64, f64)> = grid
        .cells
        .iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, v)| {
                v.map(|v| (c as f64, n_rows - r as f64 - 1.0, v))
            })
        })
        .collect();

    let span = hi - lo;
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        let t = if span > 0.0 { (v - lo) / span } else { 0.5 };
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], coolwarm(t).filled())
    }))?;

    let annotation = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().map(|&(x, y, v)| {
        Text::new(format!("{:.1}", v), (x + 0.5, y + 0.5), annotation.clone())
    }))?;

    root.present()?;
    debug!(rows = grid.rows.len(), cols = grid.cols.len(), "Heatmap written");
    Ok(())
}
