//! Time-gated refresh cache and the refreshing pair list built on it.
//!
//! Between refreshes the cached value is returned untouched, so repeated
//! calls within the window are byte-for-byte identical even if the
//! underlying data changed.

use crate::domain::catalog::CategoryCatalog;
use crate::domain::criteria::SelectionCriteria;
use crate::domain::metrics::MetricsSnapshot;
use crate::domain::select::scored::select_by_score;
use crate::ports::metrics_port::MetricsPort;
use chrono::{DateTime, Duration, Utc};

/// Caches a computed value until `refresh_period` has elapsed. The clock is
/// passed in by the caller, never read from the system.
#[derive(Debug)]
pub struct RefreshCache<T: Clone> {
    entry: Option<(T, DateTime<Utc>)>,
    refresh_period: Duration,
}

impl<T: Clone> RefreshCache<T> {
    pub fn new(refresh_period: Duration) -> Self {
        Self {
            entry: None,
            refresh_period,
        }
    }

    /// True when no value is cached or the refresh period has elapsed.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match &self.entry {
            Some((_, last)) => now - *last >= self.refresh_period,
            None => true,
        }
    }

    /// Return the cached value, recomputing it first when stale. The compute
    /// result is always cached, even when it is empty.
    pub fn get_or_refresh(&mut self, now: DateTime<Utc>, compute: impl FnOnce() -> T) -> T {
        match &self.entry {
            Some((value, last)) if now - *last < self.refresh_period => value.clone(),
            _ => {
                let value = compute();
                self.entry = Some((value.clone(), now));
                value
            }
        }
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|(_, last)| *last)
    }
}

/// A pair list that re-selects from live metrics at most once per refresh
/// period. Candidates outside the catalog are scored under the `unknown`
/// category rather than dropped.
pub struct RefreshingPairList {
    catalog: CategoryCatalog,
    criteria: SelectionCriteria,
    source: Box<dyn MetricsPort>,
    cache: RefreshCache<Vec<String>>,
}

impl RefreshingPairList {
    pub fn new(
        catalog: CategoryCatalog,
        criteria: SelectionCriteria,
        source: Box<dyn MetricsPort>,
    ) -> Self {
        let cache = RefreshCache::new(criteria.refresh_period);
        Self {
            catalog,
            criteria,
            source,
            cache,
        }
    }

    /// Filter `candidates` down to the current selection. Within a refresh
    /// window the previous selection is returned unchanged. A failed fetch
    /// is reported to stderr and scored against an empty snapshot, so the
    /// empty result is cached until the next window.
    pub fn filter_pairlist(&mut self, candidates: &[String], now: DateTime<Utc>) -> Vec<String> {
        let catalog = &self.catalog;
        let criteria = &self.criteria;
        let source = &self.source;
        self.cache.get_or_refresh(now, || {
            let snapshot = match source.fetch_metrics(candidates) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    eprintln!("Warning: metrics fetch failed, keeping empty selection: {}", e);
                    MetricsSnapshot::new()
                }
            };
            let report = select_by_score(candidates, catalog, &snapshot, criteria);
            report.selected.into_iter().map(|m| m.pair).collect()
        })
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.cache.last_refresh()
    }
}
