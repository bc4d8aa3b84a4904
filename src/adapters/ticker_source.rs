//! Metrics source backed by an exchange ticker dump.
//!
//! The input is a JSON object keyed by pair identifier, each value a ticker
//! record in the exchange's shape (`last`, `quoteVolume`, `high`, `low`,
//! `percentage`). Exchanges do not report market cap, so it is estimated as
//! quote volume times 100; the min_market_cap threshold then acts as a
//! second volume floor.

use crate::domain::error::PairsiftError;
use crate::domain::metrics::{MetricError, MetricsSnapshot, RawMetrics};
use crate::ports::metrics_port::MetricsPort;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Market cap estimate multiplier applied to 24h quote volume.
const MARKET_CAP_VOLUME_MULTIPLIER: f64 = 100.0;

#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    pub last: Option<f64>,
    #[serde(rename = "quoteVolume")]
    pub quote_volume: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    /// 24h change in percent, as exchanges report it.
    pub percentage: Option<f64>,
}

pub struct TickerSource {
    tickers: HashMap<String, Ticker>,
}

impl TickerSource {
    pub fn new(tickers: HashMap<String, Ticker>) -> Self {
        Self { tickers }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PairsiftError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| PairsiftError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let tickers: HashMap<String, Ticker> =
            serde_json::from_str(&content).map_err(|e| PairsiftError::Data {
                reason: format!("ticker parse error in {}: {}", path.display(), e),
            })?;
        Ok(Self::new(tickers))
    }
}

/// Convert one ticker into metrics, or the reason it cannot be used.
pub fn metrics_from_ticker(ticker: &Ticker) -> Result<RawMetrics, MetricError> {
    let last = ticker
        .last
        .ok_or(MetricError::MissingField { field: "last" })?;
    if !last.is_finite() || last <= 0.0 {
        return Err(MetricError::InvalidPrice { price: last });
    }
    let volume = ticker
        .quote_volume
        .ok_or(MetricError::MissingField {
            field: "quoteVolume",
        })?;
    if !volume.is_finite() || volume < 0.0 {
        return Err(MetricError::InvalidVolume { volume });
    }

    let high = ticker.high.unwrap_or(last);
    let low = ticker.low.unwrap_or(last);
    Ok(RawMetrics {
        volume_24h: volume,
        market_cap: volume * MARKET_CAP_VOLUME_MULTIPLIER,
        price_change_24h: ticker.percentage.unwrap_or(0.0) / 100.0,
        volatility: (high - low) / last,
    })
}

impl MetricsPort for TickerSource {
    fn fetch_metrics(&self, pairs: &[String]) -> Result<MetricsSnapshot, PairsiftError> {
        let mut snapshot = MetricsSnapshot::new();
        for pair in pairs {
            if let Some(ticker) = self.tickers.get(pair) {
                snapshot.insert(pair.clone(), metrics_from_ticker(ticker));
            }
        }
        Ok(snapshot)
    }
}
