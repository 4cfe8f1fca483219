//! Physics-derived per-swing metrics.
//!
//! All derivations are pure and row-wise. A metric whose inputs are missing
//! (or whose denominator is zero) is `None` for that row; the row stays in
//! the dataset for every other metric.

use serde::{Deserialize, Serialize};

use crate::parser::SwingRecord;

/// Fraction of bat kinetic energy transferred to the ball in the collision.
pub const COLLISION_EFFICIENCY: f64 = 0.23;

/// A pitch loses roughly 8% of its release speed by the time it crosses the
/// plate.
pub const PLATE_SPEED_FACTOR: f64 = 0.92;

/// Savant reports speeds in mph; the kinematics work in ft/s.
pub const MPH_TO_FPS: f64 = 1.46667;

/// Threshold below which a swing is treated as non-competitive (check swing,
/// bunt attempt) by the quality filter.
pub const COMPETITIVE_BAT_SPEED_MPH: f64 = 40.0;

// Logistic model for "partial blast" probability. The squared-up coefficient
// applies to the 0..=1 fraction, not a percentage.
const BLAST_INTERCEPT: f64 = -90.6;
const BLAST_BAT_SPEED_COEF: f64 = 0.57;
const BLAST_SQUARED_UP_COEF: f64 = 53.52;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// How to handle physically implausible squared-up ratios.
///
/// Above 1.0 the ratio is always capped (a ball cannot leave the bat faster
/// than the collision model allows). Whether to also floor negative ratios at
/// zero varies across consumers, so it is an explicit policy choice rather
/// than a baked-in behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SquaredUpPolicy {
    /// Cap at 1.0 only.
    #[default]
    CapOnly,
    /// Cap at 1.0 and floor at 0.0.
    Clamp,
}

impl SquaredUpPolicy {
    fn apply(self, frac: f64) -> f64 {
        match self {
            SquaredUpPolicy::CapOnly => frac.min(1.0),
            SquaredUpPolicy::Clamp => frac.clamp(0.0, 1.0),
        }
    }
}

/// A swing record plus its derived columns.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedSwing {
    #[serde(flatten)]
    pub record: SwingRecord,
    /// Seconds from swing start to contact point.
    pub swing_time: Option<f64>,
    /// ft/s^2, assuming constant acceleration from rest.
    pub acceleration: Option<f64>,
    /// Exit velocity as a fraction of the maximum possible, 0..=1 under
    /// [`SquaredUpPolicy::Clamp`], capped at 1 under both policies.
    pub squared_up_frac: Option<f64>,
    /// Logistic estimate that the swing qualifies as a partial blast.
    pub blast_prob: Option<f64>,
}

/// Derives the computed columns for a single swing.
///
/// Kinematics assume the bat starts at rest and accelerates uniformly, so the
/// average speed over the swing is half the measured (final) speed.
pub fn derive_swing(record: SwingRecord, policy: SquaredUpPolicy) -> DerivedSwing {
    let v_f = record.bat_speed * MPH_TO_FPS;
    let v_avg = v_f / 2.0;

    let swing_time = (v_avg > 0.0 && record.swing_length > 0.0)
        .then(|| record.swing_length / v_avg);
    let acceleration = swing_time.map(|t| v_f / t);

    let squared_up_frac = match (record.exit_velocity, record.pitch_release_speed) {
        (Some(ev), Some(release)) => {
            let plate_speed = release * PLATE_SPEED_FACTOR;
            // Max EV mixes plate speed and bat speed in mph, per the
            // collision model.
            let max_ev = plate_speed * COLLISION_EFFICIENCY
                + record.bat_speed * (1.0 + COLLISION_EFFICIENCY);
            (max_ev > 0.0).then(|| policy.apply(ev / max_ev))
        }
        _ => None,
    };

    let blast_prob = squared_up_frac.map(|su| {
        sigmoid(BLAST_INTERCEPT + record.bat_speed * BLAST_BAT_SPEED_COEF + su * BLAST_SQUARED_UP_COEF)
    });

    DerivedSwing {
        record,
        swing_time,
        acceleration,
        squared_up_frac,
        blast_prob,
    }
}

/// Derives metrics for a whole table.
pub fn derive_all(records: Vec<SwingRecord>, policy: SquaredUpPolicy) -> Vec<DerivedSwing> {
    records
        .into_iter()
        .map(|r| derive_swing(r, policy))
        .collect()
}

/// The metrics a leaderboard can rank by and a distribution can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BatSpeed,
    SwingLength,
    SwingTime,
    Acceleration,
    SquaredUp,
    BlastProb,
}

impl Metric {
    /// Extracts this metric's raw (unscaled) value from a derived swing.
    pub fn value(&self, swing: &DerivedSwing) -> Option<f64> {
        match self {
            Metric::BatSpeed => Some(swing.record.bat_speed),
            Metric::SwingLength => Some(swing.record.swing_length),
            Metric::SwingTime => swing.swing_time,
            Metric::Acceleration => swing.acceleration,
            Metric::SquaredUp => swing.squared_up_frac,
            Metric::BlastProb => swing.blast_prob,
        }
    }

    /// Short swings and quick swings are the good ones; any color or ranking
    /// scale that conveys a value judgment must invert for these.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Metric::SwingLength | Metric::SwingTime)
    }

    /// Axis label with display unit.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::BatSpeed => "Swing Speed (mph)",
            Metric::SwingLength => "Swing Length (ft)",
            Metric::SwingTime => "Swing Time (ms)",
            Metric::Acceleration => "Swing Acceleration (ft/s^2)",
            Metric::SquaredUp => "Squared Up%",
            Metric::BlastProb => "Partial Blasts / Swing",
        }
    }

    /// Multiplier from internal units to display units (seconds to
    /// milliseconds, fractions to percent).
    pub fn display_scale(&self) -> f64 {
        match self {
            Metric::SwingTime => 1000.0,
            Metric::SquaredUp | Metric::BlastProb => 100.0,
            _ => 1.0,
        }
    }
}

// clap re-parses `default_value_t` through Display, so this must print the
// argument token, not the axis label.
impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Metric::BatSpeed => "bat-speed",
            Metric::SwingLength => "swing-length",
            Metric::SwingTime => "swing-time",
            Metric::Acceleration => "acceleration",
            Metric::SquaredUp => "squared-up",
            Metric::BlastProb => "blast-prob",
        };
        f.write_str(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(bat_speed: f64, swing_length: f64) -> SwingRecord {
        SwingRecord {
            hitter: "Test Hitter".to_string(),
            team: "NYY".to_string(),
            game_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            bat_speed,
            swing_length,
            exit_velocity: None,
            pitch_release_speed: None,
        }
    }

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_kinematics_reference_values() {
        // 70 mph over 7 ft: v_f = 102.67 ft/s, t ~ 0.1364 s, a ~ 752.8 ft/s^2.
        let swing = derive_swing(record(70.0, 7.0), SquaredUpPolicy::default());

        assert_close(swing.swing_time.unwrap(), 0.1364, 0.0005);
        assert_close(swing.acceleration.unwrap(), 752.8, 0.5);
    }

    #[test]
    fn test_positive_inputs_give_positive_kinematics() {
        for &(speed, length) in &[(40.0, 5.5), (65.3, 6.8), (88.1, 9.2), (0.1, 0.1)] {
            let swing = derive_swing(record(speed, length), SquaredUpPolicy::default());
            assert!(swing.swing_time.unwrap() > 0.0);
            assert!(swing.acceleration.unwrap() > 0.0);
        }
    }

    #[test]
    fn test_zero_bat_speed_leaves_kinematics_undefined() {
        let swing = derive_swing(record(0.0, 7.0), SquaredUpPolicy::default());
        assert_eq!(swing.swing_time, None);
        assert_eq!(swing.acceleration, None);
    }

    #[test]
    fn test_zero_swing_length_leaves_kinematics_undefined() {
        let swing = derive_swing(record(70.0, 0.0), SquaredUpPolicy::default());
        assert_eq!(swing.swing_time, None);
        assert_eq!(swing.acceleration, None);
    }

    #[test]
    fn test_squared_up_reference_value_capped() {
        // 94 mph pitch, 70 mph bat, 110 mph EV: max EV = 105.99, raw ratio
        // 1.038, reported as exactly 1.0.
        let mut r = record(70.0, 7.0);
        r.pitch_release_speed = Some(94.0);
        r.exit_velocity = Some(110.0);

        let swing = derive_swing(r, SquaredUpPolicy::default());
        assert_eq!(swing.squared_up_frac, Some(1.0));
    }

    #[test]
    fn test_squared_up_uncapped_region() {
        let mut r = record(70.0, 7.0);
        r.pitch_release_speed = Some(94.0);
        r.exit_velocity = Some(95.0);

        let swing = derive_swing(r, SquaredUpPolicy::default());
        assert_close(swing.squared_up_frac.unwrap(), 95.0 / 105.9904, 1e-6);
    }

    #[test]
    fn test_squared_up_floor_is_policy_dependent() {
        let mut r = record(70.0, 7.0);
        r.pitch_release_speed = Some(94.0);
        r.exit_velocity = Some(-5.0);

        let cap_only = derive_swing(r.clone(), SquaredUpPolicy::CapOnly);
        assert!(cap_only.squared_up_frac.unwrap() < 0.0);

        let clamped = derive_swing(r, SquaredUpPolicy::Clamp);
        assert_eq!(clamped.squared_up_frac, Some(0.0));
    }

    #[test]
    fn test_squared_up_missing_inputs_undefined() {
        let mut with_ev_only = record(70.0, 7.0);
        with_ev_only.exit_velocity = Some(100.0);

        let swing = derive_swing(with_ev_only, SquaredUpPolicy::default());
        assert_eq!(swing.squared_up_frac, None);
        assert_eq!(swing.blast_prob, None);
    }

    #[test]
    fn test_blast_prob_scales_with_contact_quality() {
        let mut flush = record(75.0, 7.0);
        flush.pitch_release_speed = Some(94.0);
        flush.exit_velocity = Some(112.0);

        let mut mishit = record(75.0, 7.0);
        mishit.pitch_release_speed = Some(94.0);
        mishit.exit_velocity = Some(80.0);

        let flush = derive_swing(flush, SquaredUpPolicy::default());
        let mishit = derive_swing(mishit, SquaredUpPolicy::default());

        let p_flush = flush.blast_prob.unwrap();
        let p_mishit = mishit.blast_prob.unwrap();
        assert!(p_flush > p_mishit);
        assert!((0.0..=1.0).contains(&p_flush));
        assert!((0.0..=1.0).contains(&p_mishit));
        // A flush 75 mph swing should be a likely blast, a mishit should not.
        assert!(p_flush > 0.9);
        assert!(p_mishit < 0.01);
    }

    #[test]
    fn test_metric_direction_flags() {
        assert!(Metric::SwingLength.lower_is_better());
        assert!(Metric::SwingTime.lower_is_better());
        assert!(!Metric::Acceleration.lower_is_better());
        assert!(!Metric::BatSpeed.lower_is_better());
    }
}
