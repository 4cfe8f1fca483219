//! Rolling swing-window trend for one hitter, with league context bands.

use std::collections::HashMap;

use crate::analysis::types::{LeagueBands, RollingOptions, RollingPoint, RollingSeries, hitter_values};
use crate::analysis::utility::{mean, quantile};
use crate::error::SwingError;
use crate::metrics::{DerivedSwing, Metric};

/// Default rolling window for a given leaderboard threshold: a quarter of the
/// threshold, rounded to the nearest multiple of five swings.
pub fn default_window(min_swings: usize) -> usize {
    let window = ((min_swings as f64 / 20.0).round() as usize) * 5;
    window.max(1)
}

/// Computes the rolling mean of the metric over the hitter's swings in date
/// order, sampled at the last swing of each game date.
///
/// # Errors
///
/// [`SwingError::EmptySelection`] if the hitter has no swing with a defined
/// value, or fewer than one full window.
pub fn rolling(swings: &[DerivedSwing], opts: &RollingOptions) -> Result<RollingSeries, SwingError> {
    let window = opts.window.max(1);
    let values = hitter_values(swings, &opts.hitter, opts.metric);
    if values.len() < window {
        return Err(SwingError::EmptySelection);
    }

    let series: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
    let season_mean = mean(&series).ok_or(SwingError::EmptySelection)?;

    // Rolling mean is defined from the window'th swing onward; each game date
    // keeps only its final sample.
    let mut points: Vec<RollingPoint> = Vec::new();
    for (i, (date, _)) in values.iter().enumerate().skip(window - 1) {
        let value = mean(&series[i + 1 - window..=i]).unwrap_or(season_mean);
        match points.last_mut() {
            Some(last) if last.game_date == *date => last.value = value,
            _ => points.push(RollingPoint {
                game_date: *date,
                value,
            }),
        }
    }

    Ok(RollingSeries {
        hitter: opts.hitter.clone(),
        metric: opts.metric,
        window,
        season_mean,
        points,
        league: league_bands(swings, opts.metric, window),
    })
}

/// Distribution of per-hitter means among hitters with at least `window`
/// defined values, for context lines behind the trend.
fn league_bands(swings: &[DerivedSwing], metric: Metric, window: usize) -> Option<LeagueBands> {
    let mut by_hitter: HashMap<&str, Vec<f64>> = HashMap::new();
    for s in swings {
        if let Some(v) = metric.value(s) {
            by_hitter.entry(s.record.hitter.as_str()).or_default().push(v);
        }
    }

    let mut hitter_means: Vec<f64> = by_hitter
        .values()
        .filter(|vs| vs.len() >= window)
        .filter_map(|vs| mean(vs))
        .collect();
    hitter_means.sort_by(|a, b| a.total_cmp(b));

    Some(LeagueBands {
        mean: mean(&hitter_means)?,
        p10: quantile(&hitter_means, 0.10)?,
        p25: quantile(&hitter_means, 0.25)?,
        p75: quantile(&hitter_means, 0.75)?,
        p90: quantile(&hitter_means, 0.90)?,
    })
}
