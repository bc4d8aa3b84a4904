//! CoinGecko metrics source.
//!
//! Pulls `/coins/markets` for the USD quote and matches records to candidate
//! pairs by base symbol. CoinGecko reports real market caps, so unlike the
//! ticker source nothing is estimated here.

use crate::domain::error::PairsiftError;
use crate::domain::metrics::{MetricError, MetricsSnapshot, RawMetrics};
use crate::domain::pair::base_symbol;
use crate::ports::metrics_port::MetricsPort;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PER_PAGE: usize = 250;

#[derive(Debug, Clone, Deserialize)]
pub struct MarketRecord {
    pub symbol: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
}

pub struct CoinGeckoSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CoinGeckoSource {
    pub fn new() -> Result<Self, PairsiftError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, PairsiftError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PairsiftError::Provider {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch_markets(&self) -> Result<Vec<MarketRecord>, PairsiftError> {
        let url = format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1",
            self.base_url, PER_PAGE
        );
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PairsiftError::Provider {
                reason: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(PairsiftError::Provider {
                reason: format!("unexpected status {}", response.status()),
            });
        }
        response.json().map_err(|e| PairsiftError::Provider {
            reason: format!("malformed response: {}", e),
        })
    }
}

/// Build a snapshot for `pairs` from market records, matching on base
/// symbol. Pairs without a matching record are left absent.
pub fn snapshot_from_markets(pairs: &[String], records: &[MarketRecord]) -> MetricsSnapshot {
    let by_symbol: HashMap<String, &MarketRecord> = records
        .iter()
        .map(|r| (r.symbol.to_uppercase(), r))
        .collect();

    let mut snapshot = MetricsSnapshot::new();
    for pair in pairs {
        if let Some(record) = by_symbol.get(base_symbol(pair)) {
            snapshot.insert(pair.clone(), metrics_from_record(record));
        }
    }
    snapshot
}

fn metrics_from_record(record: &MarketRecord) -> Result<RawMetrics, MetricError> {
    let price = record.current_price.ok_or(MetricError::MissingField {
        field: "current_price",
    })?;
    if !price.is_finite() || price <= 0.0 {
        return Err(MetricError::InvalidPrice { price });
    }
    let volume = record.total_volume.ok_or(MetricError::MissingField {
        field: "total_volume",
    })?;
    if !volume.is_finite() || volume < 0.0 {
        return Err(MetricError::InvalidVolume { volume });
    }
    let market_cap = record.market_cap.ok_or(MetricError::MissingField {
        field: "market_cap",
    })?;

    let volatility = match (record.high_24h, record.low_24h) {
        (Some(high), Some(low)) => (high - low) / price,
        _ => record.price_change_percentage_24h.unwrap_or(0.0).abs() / 100.0,
    };
    Ok(RawMetrics {
        volume_24h: volume,
        market_cap,
        price_change_24h: record.price_change_percentage_24h.unwrap_or(0.0) / 100.0,
        volatility,
    })
}

impl MetricsPort for CoinGeckoSource {
    fn fetch_metrics(&self, pairs: &[String]) -> Result<MetricsSnapshot, PairsiftError> {
        let records = self.fetch_markets()?;
        Ok(snapshot_from_markets(pairs, &records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str) -> MarketRecord {
        MarketRecord {
            symbol: symbol.to_string(),
            current_price: Some(100.0),
            market_cap: Some(1_000_000_000.0),
            total_volume: Some(50_000_000.0),
            price_change_percentage_24h: Some(-3.0),
            high_24h: Some(104.0),
            low_24h: Some(98.0),
        }
    }

    #[test]
    fn matches_records_by_base_symbol() {
        let pairs = vec!["BTC/USDT:USDT".to_string(), "ETH/USDT:USDT".to_string()];
        let records = vec![record("btc")];
        let snapshot = snapshot_from_markets(&pairs, &records);

        let metrics = snapshot["BTC/USDT:USDT"].as_ref().unwrap();
        assert_eq!(metrics.market_cap, 1_000_000_000.0);
        assert!((metrics.volatility - 0.06).abs() < 1e-12);
        assert!((metrics.price_change_24h - -0.03).abs() < 1e-12);
        assert!(!snapshot.contains_key("ETH/USDT:USDT"));
    }

    #[test]
    fn falls_back_to_change_when_range_missing() {
        let mut r = record("btc");
        r.high_24h = None;
        r.low_24h = None;
        let snapshot = snapshot_from_markets(&["BTC/USDT:USDT".to_string()], &[r]);
        let metrics = snapshot["BTC/USDT:USDT"].as_ref().unwrap();
        assert!((metrics.volatility - 0.03).abs() < 1e-12);
    }

    #[test]
    fn missing_market_cap_is_a_per_pair_error() {
        let mut r = record("btc");
        r.market_cap = None;
        let snapshot = snapshot_from_markets(&["BTC/USDT:USDT".to_string()], &[r]);
        assert_eq!(
            snapshot["BTC/USDT:USDT"].as_ref().unwrap_err(),
            &MetricError::MissingField {
                field: "market_cap"
            }
        );
    }

    #[test]
    fn non_positive_price_is_invalid() {
        let mut r = record("btc");
        r.current_price = Some(0.0);
        let snapshot = snapshot_from_markets(&["BTC/USDT:USDT".to_string()], &[r]);
        assert_eq!(
            snapshot["BTC/USDT:USDT"].as_ref().unwrap_err(),
            &MetricError::InvalidPrice { price: 0.0 }
        );
    }

    #[test]
    fn parses_market_payload() {
        let json = r#"[{
            "symbol": "btc",
            "current_price": 60000.0,
            "market_cap": 1200000000000.0,
            "total_volume": 30000000000.0,
            "price_change_percentage_24h": 1.5,
            "high_24h": 61000.0,
            "low_24h": 59000.0
        }]"#;
        let records: Vec<MarketRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].symbol, "btc");
        assert_eq!(records[0].market_cap, Some(1_200_000_000_000.0));
    }
}
