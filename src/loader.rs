//! Loads the swing table through a [`SwingSource`], with a short-lived cache
//! and the optional per-hitter quality filter.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::analysis::utility::quantile;
use crate::error::SwingError;
use crate::metrics::COMPETITIVE_BAT_SPEED_MPH;
use crate::parser::{SwingRecord, parse_swings};
use crate::source::SwingSource;

/// The remote table changes infrequently within a session; ten minutes keeps
/// widget interactions cheap without going stale.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

struct CacheEntry {
    fetched_at: Instant,
    records: Arc<Vec<SwingRecord>>,
}

/// Fetches, parses and caches the swing table.
///
/// The cache holds the *unfiltered* parse result so the quality filter can be
/// toggled per call without refetching. Invalidation is time-based only.
pub struct SwingLoader {
    source: Box<dyn SwingSource>,
    ttl: Duration,
    cache: Mutex<Option<CacheEntry>>,
}

impl SwingLoader {
    pub fn new(source: Box<dyn SwingSource>) -> Self {
        Self::with_ttl(source, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(source: Box<dyn SwingSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            cache: Mutex::new(None),
        }
    }

    /// Loads the full swing table, optionally dropping non-competitive
    /// swings.
    ///
    /// # Errors
    ///
    /// [`SwingError::SourceUnavailable`] if the fetch fails (propagated, not
    /// retried) and [`SwingError::SchemaMismatch`] if the table does not
    /// parse.
    pub async fn load_swings(
        &self,
        apply_quality_filter: bool,
    ) -> Result<Vec<SwingRecord>, SwingError> {
        let records = self.raw_table().await?;

        if apply_quality_filter {
            Ok(quality_filter(&records))
        } else {
            Ok(records.as_ref().clone())
        }
    }

    async fn raw_table(&self) -> Result<Arc<Vec<SwingRecord>>, SwingError> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                debug!(rows = entry.records.len(), "Serving swing table from cache");
                return Ok(Arc::clone(&entry.records));
            }
        }

        let bytes = self.source.fetch().await?;
        let records = Arc::new(parse_swings(&bytes)?);
        info!(rows = records.len(), "Swing table fetched and parsed");

        *cache = Some(CacheEntry {
            fetched_at: Instant::now(),
            records: Arc::clone(&records),
        });

        Ok(records)
    }
}

/// Drops low-effort swings: a row survives only if its bat speed is at least
/// the competitive floor AND strictly above that hitter's own 10th
/// percentile. The within-hitter cut keeps the comparison fair for hitters
/// whose swings are generally slower.
pub fn quality_filter(records: &[SwingRecord]) -> Vec<SwingRecord> {
    let mut speeds_by_hitter: HashMap<&str, Vec<f64>> = HashMap::new();
    for r in records {
        speeds_by_hitter
            .entry(r.hitter.as_str())
            .or_default()
            .push(r.bat_speed);
    }

    let cutoffs: HashMap<&str, f64> = speeds_by_hitter
        .into_iter()
        .filter_map(|(hitter, mut speeds)| {
            speeds.sort_by(|a, b| a.total_cmp(b));
            quantile(&speeds, 0.1).map(|q10| (hitter, q10))
        })
        .collect();

    records
        .iter()
        .filter(|r| {
            r.bat_speed >= COMPETITIVE_BAT_SPEED_MPH
                && cutoffs
                    .get(r.hitter.as_str())
                    .is_some_and(|q10| r.bat_speed > *q10)
        })
        .cloned()
        .collect()
}
