//! Result types produced by the aggregation pipeline.

use chrono::NaiveDate;
use serde::Serialize;

use crate::metrics::{DerivedSwing, Metric};

/// Per-hitter summary after grouping. Metric fields are arithmetic means over
/// that hitter's non-null values; the derived four can be `None` when no row
/// had the inputs (e.g. a hitter with no tracked batted balls).
#[derive(Debug, Clone, Serialize)]
pub struct BatterAggregate {
    pub hitter: String,
    /// Most recently observed team for the hitter (trades happen mid-season).
    pub team: String,
    pub swings: usize,
    pub bat_speed: f64,
    pub swing_length: f64,
    pub swing_time: Option<f64>,
    pub acceleration: Option<f64>,
    pub squared_up_frac: Option<f64>,
    pub blast_prob: Option<f64>,
}

impl BatterAggregate {
    /// Mean for the given metric, in internal units.
    pub fn metric_mean(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::BatSpeed => Some(self.bat_speed),
            Metric::SwingLength => Some(self.swing_length),
            Metric::SwingTime => self.swing_time,
            Metric::Acceleration => self.acceleration,
            Metric::SquaredUp => self.squared_up_frac,
            Metric::BlastProb => self.blast_prob,
        }
    }
}

/// Parameters for the leaderboard view.
#[derive(Debug, Clone)]
pub struct LeaderboardOptions {
    /// `None` (or the sentinel "All") means every team.
    pub team: Option<String>,
    pub min_swings: usize,
    pub sort: Metric,
}

impl Default for LeaderboardOptions {
    fn default() -> Self {
        Self {
            team: None,
            min_swings: 100,
            sort: Metric::Acceleration,
        }
    }
}

/// Parameters for the batter-vs-league distribution view.
#[derive(Debug, Clone)]
pub struct DistributionOptions {
    pub hitter: String,
    pub metric: Metric,
    /// Defaults to the hitter's first game date; clamped into season bounds.
    pub start: Option<NaiveDate>,
    /// Defaults to the hitter's last game date; clamped into season bounds.
    pub end: Option<NaiveDate>,
    pub min_swings: usize,
}

/// Numeric series for an external density estimator, plus point estimates.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionView {
    pub hitter: String,
    pub metric: Metric,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// The hitter's in-range values, internal units.
    pub hitter_series: Vec<f64>,
    /// In-range values for every qualifying hitter.
    pub league_series: Vec<f64>,
    pub hitter_mean: f64,
    pub league_mean: f64,
    /// 1-based rank of the hitter among qualifiers for this metric, best
    /// first (direction-aware).
    pub hitter_rank: usize,
    pub qualifier_count: usize,
    /// True when a smaller value is the better one; presenters must invert
    /// any value-judgment color scale.
    pub lower_is_better: bool,
}

/// Parameters for the rolling trend view.
#[derive(Debug, Clone)]
pub struct RollingOptions {
    pub hitter: String,
    pub metric: Metric,
    /// Swing-count window for the rolling mean.
    pub window: usize,
}

/// One point on the rolling trend: the rolling mean as of the last swing of a
/// game date.
#[derive(Debug, Clone, Serialize)]
pub struct RollingPoint {
    pub game_date: NaiveDate,
    pub value: f64,
}

/// League context lines drawn behind a rolling trend.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueBands {
    pub mean: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RollingSeries {
    pub hitter: String,
    pub metric: Metric,
    pub window: usize,
    pub season_mean: f64,
    pub points: Vec<RollingPoint>,
    /// Bands over per-hitter means of hitters with at least `window` swings.
    pub league: Option<LeagueBands>,
}

/// Restricts swings to one hitter, in ascending date order, with a defined
/// value for the metric. Shared by the distribution and rolling views.
pub(crate) fn hitter_values(
    swings: &[DerivedSwing],
    hitter: &str,
    metric: Metric,
) -> Vec<(NaiveDate, f64)> {
    let mut values: Vec<(NaiveDate, f64)> = swings
        .iter()
        .filter(|s| s.record.hitter == hitter)
        .filter_map(|s| metric.value(s).map(|v| (s.record.game_date, v)))
        .collect();
    values.sort_by_key(|(date, _)| *date);
    values
}
