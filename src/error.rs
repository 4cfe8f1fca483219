//! Error taxonomy for the swing-metrics pipeline.
//!
//! Per-row metric gaps are *not* errors: a missing input or zero denominator
//! yields a `None` field on the derived record and the row stays usable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwingError {
    /// The remote table (or local snapshot) could not be fetched. Aborts the
    /// current render pass; never retried automatically.
    #[error("swing data source unavailable: {0}")]
    SourceUnavailable(String),

    /// The fetched table does not match the expected schema. Fatal for the
    /// pass so that drifted data cannot corrupt downstream statistics.
    #[error("source table schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The current selection (team filter, swing threshold, date range)
    /// excludes every row. Callers report "no data" instead of crashing on
    /// an empty mean.
    #[error("no swings match the current selection")]
    EmptySelection,
}
