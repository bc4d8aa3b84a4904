//! Per-pair market metrics and the per-candidate error taxonomy.
//!
//! Metric records are created fresh each scoring invocation and discarded
//! after ranking. A candidate that cannot produce a valid record is skipped
//! with an explicit reason rather than failing the whole run.

use std::collections::HashMap;

/// Why a single candidate produced no usable metrics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("no metrics data")]
    NoData,

    #[error("missing field {field}")]
    MissingField { field: &'static str },

    #[error("invalid price {price}")]
    InvalidPrice { price: f64 },

    #[error("invalid volume {volume}")]
    InvalidVolume { volume: f64 },
}

/// Adapter-validated metrics for one candidate. Volume and market cap are
/// non-negative; volatility is the adapter's notion of 24h price movement
/// (absolute price-change fraction, or range over last price).
#[derive(Debug, Clone, PartialEq)]
pub struct RawMetrics {
    pub volume_24h: f64,
    pub market_cap: f64,
    pub price_change_24h: f64,
    pub volatility: f64,
}

/// Per-pair fetch outcome keyed by canonical pair identifier. A missing key
/// means the source had no data for that candidate.
pub type MetricsSnapshot = HashMap<String, Result<RawMetrics, MetricError>>;

/// One scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct PairMetrics {
    pub pair: String,
    pub symbol: String,
    pub category: String,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub price_change_24h: f64,
    pub volatility: f64,
    pub score: f64,
}

/// A candidate dropped before scoring, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPair {
    pub pair: String,
    pub reason: MetricError,
}
