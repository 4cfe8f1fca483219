//! Aggregation and ranking over derived swings.
//!
//! Everything here is a pure function of its inputs; widget state (team
//! filter, swing threshold, date range) arrives as options on each call.

pub mod distribution;
pub mod leaderboard;
pub mod rolling;
pub mod types;
pub mod utility;
