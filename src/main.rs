//! CLI entry point for the swing-metrics tool.
//!
//! Provides subcommands for the batter leaderboard, batter-vs-league
//! distribution series, and rolling trend series over MLB bat-tracking data.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use swing_metrics::{
    analysis::{
        distribution::distribution,
        leaderboard::leaderboard,
        rolling::{default_window, rolling},
        types::{DistributionOptions, LeaderboardOptions, RollingOptions},
    },
    loader::SwingLoader,
    metrics::{Metric, SquaredUpPolicy, derive_all},
    output,
    source::source_for,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_SOURCE: &str =
    "https://github.com/Blandalytics/baseball_snippets/blob/main/swing_speed_data.csv?raw=true";

#[derive(Parser)]
#[command(name = "swing_metrics")]
#[command(about = "Leaderboards and distributions from MLB bat-tracking data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-batter leaderboard of swing metrics
    Leaderboard {
        /// CSV source: URL or local file path
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Restrict to one team (short code, e.g. NYY)
        #[arg(short, long)]
        team: Option<String>,

        /// Minimum swings for a hitter to qualify
        #[arg(short, long, default_value_t = 100)]
        min_swings: usize,

        /// Metric to rank by
        #[arg(long, value_enum, default_value_t = Metric::Acceleration)]
        sort: Metric,

        /// Include non-competitive swings (skip the quality filter)
        #[arg(long, default_value_t = false)]
        all_swings: bool,

        /// Optional CSV file to write the leaderboard to
        #[arg(short, long)]
        output: Option<String>,

        /// Print JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Batter-vs-league value series for one metric, for density plotting
    Distribution {
        /// CSV source: URL or local file path
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Hitter name as it appears in the data
        #[arg(long)]
        hitter: String,

        /// Metric to plot
        #[arg(long, value_enum, default_value_t = Metric::SwingTime)]
        metric: Metric,

        /// Range start (YYYY-MM-DD); defaults to the hitter's first game
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Range end (YYYY-MM-DD); defaults to the hitter's last game
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Minimum swings for league qualification
        #[arg(short, long, default_value_t = 100)]
        min_swings: usize,

        /// Include non-competitive swings (skip the quality filter)
        #[arg(long, default_value_t = false)]
        all_swings: bool,
    },
    /// Rolling swing-window trend for one hitter and metric
    Rolling {
        /// CSV source: URL or local file path
        #[arg(short, long, default_value = DEFAULT_SOURCE)]
        source: String,

        /// Hitter name as it appears in the data
        #[arg(long)]
        hitter: String,

        /// Metric to trend
        #[arg(long, value_enum, default_value_t = Metric::BatSpeed)]
        metric: Metric,

        /// Rolling window in swings; defaults to a quarter of min-swings,
        /// rounded to fives
        #[arg(short, long)]
        window: Option<usize>,

        /// Threshold the default window is derived from
        #[arg(short, long, default_value_t = 100)]
        min_swings: usize,

        /// Include non-competitive swings (skip the quality filter)
        #[arg(long, default_value_t = false)]
        all_swings: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/swing_metrics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("swing_metrics.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard {
            source,
            team,
            min_swings,
            sort,
            all_swings,
            output: output_path,
            json,
        } => {
            let swings = load_derived(&source, all_swings).await?;
            let rows = leaderboard(
                &swings,
                &LeaderboardOptions {
                    team,
                    min_swings,
                    sort,
                },
            );

            if rows.is_empty() {
                info!(min_swings, "No hitters match the current selection");
                println!("no data");
                return Ok(());
            }

            if let Some(path) = output_path {
                output::write_leaderboard_csv(&path, &rows)?;
                info!(path, rows = rows.len(), "Leaderboard written");
            } else if json {
                output::print_leaderboard_json(&rows)?;
            } else {
                output::print_leaderboard(&rows);
            }
        }
        Commands::Distribution {
            source,
            hitter,
            metric,
            start,
            end,
            min_swings,
            all_swings,
        } => {
            let swings = load_derived(&source, all_swings).await?;
            let view = distribution(
                &swings,
                &DistributionOptions {
                    hitter,
                    metric,
                    start,
                    end,
                    min_swings,
                },
            )?;

            output::print_distribution_json(&view)?;
        }
        Commands::Rolling {
            source,
            hitter,
            metric,
            window,
            min_swings,
            all_swings,
        } => {
            let swings = load_derived(&source, all_swings).await?;
            let series = rolling(
                &swings,
                &RollingOptions {
                    hitter,
                    metric,
                    window: window.unwrap_or_else(|| default_window(min_swings)),
                },
            )?;

            output::print_rolling_json(&series)?;
        }
    }

    Ok(())
}

/// Loads the table from a URL or local path and derives the metric columns.
#[tracing::instrument(fields(source = %source, all_swings))]
async fn load_derived(
    source: &str,
    all_swings: bool,
) -> Result<Vec<swing_metrics::metrics::DerivedSwing>> {
    let loader = SwingLoader::new(source_for(source));
    let records = loader.load_swings(!all_swings).await?;

    info!(rows = records.len(), "Swing table loaded");
    Ok(derive_all(records, SquaredUpPolicy::default()))
}
