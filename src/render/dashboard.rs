//! Interactive multi-show comparison dashboard.
//!
//! The page embeds every show's smoothed timeline as JSON and charts the
//! selected shows in the browser with Plotly.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::render::prepare_output;
use crate::timeline::types::ShowTimeline;

/// Qualitative palette that stays readable on a dark background.
pub const PALETTE: &[&str] = &[
    "rgb(127, 60, 141)",
    "rgb(17, 165, 121)",
    "rgb(57, 105, 172)",
    "rgb(242, 183, 1)",
    "rgb(231, 63, 116)",
    "rgb(128, 186, 90)",
    "rgb(230, 131, 16)",
    "rgb(0, 134, 149)",
    "rgb(207, 28, 144)",
    "rgb(249, 123, 114)",
    "rgb(165, 170, 153)",
];

/// Everything the dashboard page needs, serialized into the HTML.
#[derive(Debug, Serialize)]
pub struct DashboardPayload {
    pub generated_at: DateTime<Utc>,
    pub palette: Vec<String>,
    pub default_selection: Vec<String>,
    pub shows: Vec<ShowSeries>,
}

/// One show's curves, one entry per season.
#[derive(Debug, Serialize)]
pub struct ShowSeries {
    pub id: String,
    pub name: String,
    pub max_season: u32,
    pub seasons: Vec<SeasonSeries>,
}

#[derive(Debug, Serialize)]
pub struct SeasonSeries {
    pub season: u32,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl From<&ShowTimeline> for ShowSeries {
    fn from(timeline: &ShowTimeline) -> Self {
        let seasons = timeline
            .seasons()
            .into_iter()
            .map(|(season, group)| SeasonSeries {
                season,
                x: group.iter().map(|r| r.episode_norm).collect(),
                y: group.iter().map(|r| r.rating_smoothed).collect(),
            })
            .collect();

        Self {
            id: timeline.show.clone(),
            name: timeline.display_name(),
            max_season: timeline.max_season(),
            seasons,
        }
    }
}

/// Picks the shows selected when the page opens: the `preferred` ones that
/// exist, otherwise the first two available.
pub fn default_selection(available: &[String], preferred: &[String]) -> Vec<String> {
    let chosen: Vec<String> = preferred
        .iter()
        .filter(|p| available.contains(p))
        .cloned()
        .collect();

    if chosen.is_empty() {
        available.iter().take(2).cloned().collect()
    } else {
        chosen
    }
}

pub fn build_payload(timelines: &[ShowTimeline], preferred: &[String]) -> DashboardPayload {
    let available: Vec<String> = timelines.iter().map(|t| t.show.clone()).collect();

    DashboardPayload {
        generated_at: Utc::now(),
        palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        default_selection: default_selection(&available, preferred),
        shows: timelines.iter().map(ShowSeries::from).collect(),
    }
}

/// Renders the dashboard page as a string.
pub fn render_html(payload: &DashboardPayload) -> Result<String> {
    // keep "</script>" inside string data from closing the tag
    let json = serde_json::to_string(payload)?.replace("</", "<\\/");
    let generated = payload.generated_at.format("%Y-%m-%d %H:%M UTC").to_string();

    Ok(TEMPLATE
        .replace("__GENERATED__", &generated)
        .replace("__PAYLOAD__", &json))
}

/// Writes the dashboard page to `path`.
pub fn render_dashboard(payload: &DashboardPayload, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    prepare_output(path)?;
    std::fs::write(path, render_html(payload)?)?;

    info!(
        path = %path.display(),
        shows = payload.shows.len(),
        selected = ?payload.default_selection,
        "Dashboard written"
    );
    Ok(())
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>TV Series IMDB Ratings</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { margin: 0; padding: 24px; background: #0E1117; color: #EAEAEA; font-family: sans-serif; }
  label { display: block; margin-bottom: 8px; }
  select { min-width: 320px; min-height: 160px; background: #1B2230; color: #EAEAEA; border: 1px solid rgba(255,255,255,0.15); border-radius: 6px; }
  #chart { margin-top: 16px; border-radius: 12px; overflow: hidden; border: 1px solid rgba(255,255,255,0.08); }
  #empty { display: none; margin-top: 16px; }
  footer { margin-top: 12px; font-size: 12px; color: #8A8F98; }
</style>
</head>
<body>
<label for="shows">Select shows to compare:</label>
<select id="shows" multiple></select>
<div id="empty">Please select at least one show to visualize.</div>
<div id="chart"></div>
<footer>Generated __GENERATED__</footer>
<script>
const DATA = __PAYLOAD__;
const select = document.getElementById("shows");

for (const show of DATA.shows) {
  const option = document.createElement("option");
  option.value = show.id;
  option.textContent = show.name;
  option.selected = DATA.default_selection.includes(show.id);
  select.appendChild(option);
}

function draw() {
  const chosen = Array.from(select.selectedOptions).map(o => o.value);
  const empty = document.getElementById("empty");
  if (chosen.length === 0) {
    Plotly.purge("chart");
    empty.style.display = "block";
    return;
  }
  empty.style.display = "none";

  const traces = [];
  let maxSeason = 0;
  chosen.forEach((id, i) => {
    const show = DATA.shows.find(s => s.id === id);
    const color = DATA.palette[i % DATA.palette.length];
    maxSeason = Math.max(maxSeason, show.max_season);
    show.seasons.forEach((season, k) => {
      traces.push({
        x: season.x,
        y: season.y,
        mode: "lines+markers",
        name: show.name,
        legendgroup: show.name,
        showlegend: k === 0,
        line: { color: color, width: 3 },
        marker: { size: 3 },
        hovertemplate: show.name + ": %{y:.2f}<extra></extra>",
      });
    });
  });

  const shapes = [];
  for (let b = 2; b <= maxSeason; b++) {
    shapes.push({
      type: "line", xref: "x", yref: "paper", x0: b, x1: b, y0: 0, y1: 1,
      line: { dash: "dash", color: "gray", width: 1 }, opacity: 0.7,
    });
  }
  const tickvals = [];
  const ticktext = [];
  for (let s = 1; s <= maxSeason; s++) {
    tickvals.push(s + 0.5);
    ticktext.push(String(s));
  }

  Plotly.react("chart", traces, {
    shapes: shapes,
    xaxis: {
      title: { text: "Season", font: { size: 20 } },
      tickmode: "array", tickvals: tickvals, ticktext: ticktext,
      tickfont: { size: 16 }, showgrid: false,
    },
    yaxis: {
      title: { text: "IMDB Rating", font: { size: 20 } },
      tickfont: { size: 16 }, showgrid: false,
    },
    height: 700,
    paper_bgcolor: "#1B2230",
    plot_bgcolor: "#1B2230",
    font: { color: "#EAEAEA" },
    hoverlabel: { font: { color: "white", size: 18 }, bgcolor: "#1B2230" },
    legend: { orientation: "v", yanchor: "top", y: 1, xanchor: "left", x: 1.02, font: { size: 18 } },
  }, { responsive: true });
}

select.addEventListener("change", draw);
draw();
</script>
</body>
</html>
"##;
