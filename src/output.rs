//! Leaderboard and series output: stdout table, CSV export, and JSON
//! payloads for the plotting collaborator.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::analysis::types::{BatterAggregate, DistributionView, RollingSeries};
use crate::metrics::Metric;

/// Chart palette handed to the plotting collaborator as plain data. Immutable
/// configuration, not process-wide state.
#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub text: &'static str,
    pub background: &'static str,
    pub accent: &'static str,
    pub line: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: "#FEFEFE",
            background: "#162B50",
            accent: "#72a3f7",
            line: "#293a6b",
        }
    }
}

/// One leaderboard row in display units, rounded for presentation.
#[derive(Debug, Serialize)]
struct DisplayRow {
    #[serde(rename = "Hitter")]
    hitter: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Swings")]
    swings: usize,
    #[serde(rename = "Speed (mph)")]
    speed: f64,
    #[serde(rename = "Length (ft)")]
    length: f64,
    #[serde(rename = "Time (ms)")]
    time: Option<f64>,
    #[serde(rename = "Acceleration (ft/s^2)")]
    acceleration: Option<f64>,
    #[serde(rename = "SU%")]
    squared_up: Option<f64>,
    #[serde(rename = "PB%")]
    blast: Option<f64>,
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn display_row(row: &BatterAggregate) -> DisplayRow {
    let scaled = |metric: Metric| {
        row.metric_mean(metric)
            .map(|v| round1(v * metric.display_scale()))
    };

    DisplayRow {
        hitter: row.hitter.clone(),
        team: row.team.clone(),
        swings: row.swings,
        speed: round1(row.bat_speed),
        length: round1(row.swing_length),
        time: scaled(Metric::SwingTime),
        acceleration: scaled(Metric::Acceleration),
        squared_up: scaled(Metric::SquaredUp),
        blast: scaled(Metric::BlastProb),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

/// Prints the leaderboard as an aligned text table on stdout.
pub fn print_leaderboard(rows: &[BatterAggregate]) {
    let name_width = rows
        .iter()
        .map(|r| r.hitter.len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "{:<name_width$}  {:<4} {:>6} {:>11} {:>11} {:>9} {:>21} {:>6} {:>6}",
        "Hitter", "Team", "Swings", "Speed (mph)", "Length (ft)", "Time (ms)",
        "Acceleration (ft/s^2)", "SU%", "PB%",
    );
    for row in rows {
        let d = display_row(row);
        println!(
            "{:<name_width$}  {:<4} {:>6} {:>11.1} {:>11.1} {:>9} {:>21} {:>6} {:>6}",
            d.hitter,
            d.team,
            d.swings,
            d.speed,
            d.length,
            fmt_opt(d.time),
            fmt_opt(d.acceleration),
            fmt_opt(d.squared_up),
            fmt_opt(d.blast),
        );
    }
}

/// Writes the leaderboard to a CSV file in display units, headers first.
pub fn write_leaderboard_csv(path: &str, rows: &[BatterAggregate]) -> Result<()> {
    debug!(path, rows = rows.len(), "Writing leaderboard CSV");

    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.serialize(display_row(row))?;
    }
    writer.flush()?;

    Ok(())
}

/// Prints the leaderboard as pretty JSON (internal units) on stdout.
pub fn print_leaderboard_json(rows: &[BatterAggregate]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

/// Envelope for a density-plot render: the series plus the palette.
#[derive(Debug, Serialize)]
pub struct DistributionPayload<'a> {
    pub theme: Theme,
    #[serde(flatten)]
    pub view: &'a DistributionView,
}

/// Prints a distribution view as pretty JSON for the plotting collaborator.
pub fn print_distribution_json(view: &DistributionView) -> Result<()> {
    let payload = DistributionPayload {
        theme: Theme::default(),
        view,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Envelope for a rolling-trend render.
#[derive(Debug, Serialize)]
pub struct RollingPayload<'a> {
    pub theme: Theme,
    #[serde(flatten)]
    pub series: &'a RollingSeries,
}

/// Prints a rolling series as pretty JSON for the plotting collaborator.
pub fn print_rolling_json(series: &RollingSeries) -> Result<()> {
    let payload = RollingPayload {
        theme: Theme::default(),
        series,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
