//! Batter-vs-league distribution series over a date range.

use std::collections::HashSet;

use crate::analysis::leaderboard::rank_hitters;
use crate::analysis::types::{DistributionOptions, DistributionView, hitter_values};
use crate::analysis::utility::mean;
use crate::error::SwingError;
use crate::metrics::DerivedSwing;

/// Builds the value series for one hitter against the qualifying league,
/// restricted to an inclusive date range.
///
/// The range defaults to, and is clamped into, the hitter's own earliest and
/// latest game dates. Qualification (`min_swings`) is measured over the full
/// dataset so the comparison population matches the leaderboard, while the
/// series themselves contain only in-range values.
///
/// # Errors
///
/// [`SwingError::EmptySelection`] if the hitter has no rows at all, or none
/// with a defined value inside the range.
pub fn distribution(
    swings: &[DerivedSwing],
    opts: &DistributionOptions,
) -> Result<DistributionView, SwingError> {
    let hitter_all = hitter_values(swings, &opts.hitter, opts.metric);
    let (season_start, season_end) = match (hitter_all.first(), hitter_all.last()) {
        (Some((start, _)), Some((end, _))) => (*start, *end),
        _ => return Err(SwingError::EmptySelection),
    };

    let start = opts
        .start
        .unwrap_or(season_start)
        .clamp(season_start, season_end);
    let end = opts.end.unwrap_or(season_end).clamp(start, season_end);

    let hitter_series: Vec<f64> = hitter_all
        .iter()
        .filter(|(date, _)| (start..=end).contains(date))
        .map(|(_, v)| v)
        .copied()
        .collect();
    let Some(hitter_mean) = mean(&hitter_series) else {
        return Err(SwingError::EmptySelection);
    };

    let ranked = rank_hitters(swings, opts.metric, opts.min_swings);
    let qualifiers: HashSet<&str> = ranked.iter().map(String::as_str).collect();
    let hitter_rank = ranked
        .iter()
        .position(|h| h == &opts.hitter)
        .map(|i| i + 1)
        .unwrap_or(ranked.len() + 1);

    let league_series: Vec<f64> = swings
        .iter()
        .filter(|s| qualifiers.contains(s.record.hitter.as_str()))
        .filter(|s| (start..=end).contains(&s.record.game_date))
        .filter_map(|s| opts.metric.value(s))
        .collect();
    let league_mean = mean(&league_series).ok_or(SwingError::EmptySelection)?;

    Ok(DistributionView {
        hitter: opts.hitter.clone(),
        metric: opts.metric,
        start,
        end,
        hitter_series,
        league_series,
        hitter_mean,
        league_mean,
        hitter_rank,
        qualifier_count: ranked.len(),
        lower_is_better: opts.metric.lower_is_better(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Metric, SquaredUpPolicy, derive_swing};
    use crate::parser::SwingRecord;
    use chrono::NaiveDate;

    fn swing(hitter: &str, day: u32, bat_speed: f64) -> DerivedSwing {
        derive_swing(
            SwingRecord {
                hitter: hitter.to_string(),
                team: "NYY".to_string(),
                game_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
                bat_speed,
                swing_length: 7.0,
                exit_velocity: None,
                pitch_release_speed: None,
            },
            SquaredUpPolicy::default(),
        )
    }

    fn sample() -> Vec<DerivedSwing> {
        let mut swings = Vec::new();
        for day in 1..=10 {
            swings.push(swing("Regular", day, 70.0 + day as f64 * 0.1));
            swings.push(swing("Other Regular", day, 74.0));
        }
        swings.push(swing("Cup Of Coffee", 5, 68.0));
        swings
    }

    fn opts(hitter: &str) -> DistributionOptions {
        DistributionOptions {
            hitter: hitter.to_string(),
            metric: Metric::BatSpeed,
            start: None,
            end: None,
            min_swings: 5,
        }
    }

    #[test]
    fn test_full_season_by_default() {
        let view = distribution(&sample(), &opts("Regular")).unwrap();

        assert_eq!(view.start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(view.end, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
        assert_eq!(view.hitter_series.len(), 10);
    }

    #[test]
    fn test_range_restricts_series_and_means() {
        let mut o = opts("Regular");
        o.start = Some(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        o.end = Some(NaiveDate::from_ymd_opt(2024, 5, 4).unwrap());

        let view = distribution(&sample(), &o).unwrap();

        assert_eq!(view.hitter_series.len(), 2);
        assert!((view.hitter_mean - 70.35).abs() < 1e-9);
        // League series covers both qualifying hitters in range.
        assert_eq!(view.league_series.len(), 4);
    }

    #[test]
    fn test_range_clamped_to_season_bounds() {
        let mut o = opts("Regular");
        o.start = Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        o.end = Some(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap());

        let view = distribution(&sample(), &o).unwrap();

        assert_eq!(view.start, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(view.end, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    }

    #[test]
    fn test_league_excludes_non_qualifiers() {
        let view = distribution(&sample(), &opts("Regular")).unwrap();

        // Cup Of Coffee has one swing, under the threshold of five; the
        // league series holds only the two regulars.
        assert_eq!(view.league_series.len(), 20);
        assert_eq!(view.qualifier_count, 2);
    }

    #[test]
    fn test_unknown_hitter_is_empty_selection() {
        let err = distribution(&sample(), &opts("Nobody")).unwrap_err();
        assert!(matches!(err, SwingError::EmptySelection));
    }

    #[test]
    fn test_rank_reflects_metric_direction() {
        let fast = distribution(&sample(), &opts("Other Regular")).unwrap();
        assert_eq!(fast.hitter_rank, 1);

        let slow = distribution(&sample(), &opts("Regular")).unwrap();
        assert_eq!(slow.hitter_rank, 2);
    }
}
