//! Per-hitter aggregation and ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::analysis::types::{BatterAggregate, LeaderboardOptions};
use crate::analysis::utility::mean;
use crate::metrics::{DerivedSwing, Metric};

/// Sentinel team value meaning "no filter", mirroring the team selector's
/// first entry.
pub const ALL_TEAMS: &str = "All";

/// Groups derived swings by hitter and produces the ranked leaderboard.
///
/// Pure and stateless: identical inputs give identical output. An empty
/// result is valid (threshold or filter excluded everyone); the caller turns
/// it into a "no data" message.
pub fn leaderboard(swings: &[DerivedSwing], opts: &LeaderboardOptions) -> Vec<BatterAggregate> {
    let team_filter = opts
        .team
        .as_deref()
        .filter(|t| !t.is_empty() && *t != ALL_TEAMS);

    let mut by_hitter: HashMap<&str, Vec<&DerivedSwing>> = HashMap::new();
    for swing in swings {
        if let Some(team) = team_filter {
            if swing.record.team != team {
                continue;
            }
        }
        by_hitter
            .entry(swing.record.hitter.as_str())
            .or_default()
            .push(swing);
    }

    let mut rows: Vec<BatterAggregate> = by_hitter
        .into_iter()
        .filter(|(_, rows)| rows.len() >= opts.min_swings.max(1))
        .map(|(hitter, rows)| aggregate_hitter(hitter, &rows))
        .collect();

    sort_rows(&mut rows, opts.sort);
    rows
}

fn aggregate_hitter(hitter: &str, rows: &[&DerivedSwing]) -> BatterAggregate {
    let series = |metric: Metric| -> Vec<f64> {
        rows.iter().filter_map(|s| metric.value(s)).collect()
    };

    // Most recently observed team; `max_by_key` keeps the last of equal
    // maxima, so ties on the date resolve to the last row.
    let team = rows
        .iter()
        .max_by_key(|s| s.record.game_date)
        .map(|s| s.record.team.clone())
        .unwrap_or_default();

    BatterAggregate {
        hitter: hitter.to_string(),
        team,
        swings: rows.len(),
        bat_speed: mean(&series(Metric::BatSpeed)).unwrap_or(0.0),
        swing_length: mean(&series(Metric::SwingLength)).unwrap_or(0.0),
        swing_time: mean(&series(Metric::SwingTime)),
        acceleration: mean(&series(Metric::Acceleration)),
        squared_up_frac: mean(&series(Metric::SquaredUp)),
        blast_prob: mean(&series(Metric::BlastProb)),
    }
}

/// Descending by the metric's mean; hitters with an undefined mean sort last,
/// ties break by name so the ordering is total.
fn sort_rows(rows: &mut [BatterAggregate], metric: Metric) {
    rows.sort_by(|a, b| {
        match (a.metric_mean(metric), b.metric_mean(metric)) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.hitter.cmp(&b.hitter))
    });
}

/// Hitters ordered best-to-worst for `metric` among qualifiers; direction
/// aware, for selectors and value color scales.
pub fn rank_hitters(
    swings: &[DerivedSwing],
    metric: Metric,
    min_swings: usize,
) -> Vec<String> {
    let mut rows = leaderboard(
        swings,
        &LeaderboardOptions {
            team: None,
            min_swings,
            sort: metric,
        },
    );
    if metric.lower_is_better() {
        // Undefined means stay last either way.
        let defined = rows.iter().filter(|r| r.metric_mean(metric).is_some()).count();
        rows[..defined].reverse();
    }
    rows.into_iter().map(|r| r.hitter).collect()
}
