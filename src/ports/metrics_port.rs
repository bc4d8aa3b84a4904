//! Market metrics port trait.

use crate::domain::error::PairsiftError;
use crate::domain::metrics::MetricsSnapshot;

/// Supplies per-pair market metrics for a list of candidates.
///
/// A failed fetch for one candidate belongs in the snapshot as a per-pair
/// error; `Err` is reserved for failures that sink the whole request, such
/// as an unreachable provider.
pub trait MetricsPort {
    fn fetch_metrics(&self, pairs: &[String]) -> Result<MetricsSnapshot, PairsiftError>;
}
