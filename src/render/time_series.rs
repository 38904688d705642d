//! Continuous smoothed rating curves across seasons.

use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

use crate::render::prepare_output;
use crate::timeline::types::{ShowTimeline, season_boundaries, season_ticks};

const SIZE: (u32, u32) = (1200, 600);
const LINE: RGBColor = RGBColor(0, 0, 139);

/// Draws one smoothed line per season plus season boundary markers.
#[tracing::instrument(skip(timeline, path), fields(show = %timeline.show, path = %path.as_ref().display()))]
pub fn render_time_series(
    timeline: &ShowTimeline,
    title: &str,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let (lo, hi) = timeline
        .rating_range()
        .with_context(|| format!("show '{}' has no episodes to plot", timeline.show))?;
    prepare_output(path)?;

    let max_season = timeline.max_season();
    let pad = ((hi - lo) * 0.1).max(0.1);
    let (y_min, y_max) = (lo - pad, hi + pad);
    let x_max = f64::from(max_season) + 1.0;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(1.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Season")
        .y_desc("IMDB Rating")
        .x_labels(0)
        .y_label_formatter(&|v: &f64| format!("{:.1}", v))
        .draw()?;

    // season labels sit under the middle of each season at k + 0.5
    let label_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (x, season) in season_ticks(max_season) {
        let (px, py) = chart.backend_coord(&(x, y_min));
        root.draw(&Text::new(season.to_string(), (px, py + 6), label_style.clone()))?;
    }

    chart.draw_series(season_boundaries(max_season).into_iter().map(|b| {
        PathElement::new(vec![(b, y_min), (b, y_max)], RED.mix(0.7).stroke_width(1))
    }))?;

    for group in timeline.seasons().values() {
        let points: Vec<(f64, f64)> = group
            .iter()
            .map(|r| (r.episode_norm, r.rating_smoothed))
            .collect();
        chart.draw_series(LineSeries::new(points, LINE.mix(0.9).stroke_width(3)))?;
    }

    root.present()?;
    debug!(seasons = max_season, "Time series written");
    Ok(())
}
