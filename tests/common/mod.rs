#![allow(dead_code)]

use pairsift::domain::catalog::{Category, CategoryCatalog, CategoryWeights};
use pairsift::domain::criteria::SelectionCriteria;
use pairsift::domain::error::PairsiftError;
use pairsift::domain::metrics::{MetricError, MetricsSnapshot, RawMetrics};
use pairsift::ports::metrics_port::MetricsPort;
use std::collections::HashMap;

pub struct MockMetricsPort {
    pub metrics: HashMap<String, RawMetrics>,
    pub errors: HashMap<String, MetricError>,
    pub fail: Option<String>,
}

impl MockMetricsPort {
    pub fn new() -> Self {
        Self {
            metrics: HashMap::new(),
            errors: HashMap::new(),
            fail: None,
        }
    }

    pub fn with_metrics(mut self, pair: &str, metrics: RawMetrics) -> Self {
        self.metrics.insert(pair.to_string(), metrics);
        self
    }

    pub fn with_error(mut self, pair: &str, error: MetricError) -> Self {
        self.errors.insert(pair.to_string(), error);
        self
    }

    /// Make every fetch fail with a provider error.
    pub fn failing(mut self, reason: &str) -> Self {
        self.fail = Some(reason.to_string());
        self
    }
}

impl MetricsPort for MockMetricsPort {
    fn fetch_metrics(&self, pairs: &[String]) -> Result<MetricsSnapshot, PairsiftError> {
        if let Some(reason) = &self.fail {
            return Err(PairsiftError::Provider {
                reason: reason.clone(),
            });
        }
        let mut snapshot = MetricsSnapshot::new();
        for pair in pairs {
            if let Some(error) = self.errors.get(pair) {
                snapshot.insert(pair.clone(), Err(error.clone()));
            } else if let Some(metrics) = self.metrics.get(pair) {
                snapshot.insert(pair.clone(), Ok(metrics.clone()));
            }
        }
        Ok(snapshot)
    }
}

pub fn make_metrics(volume: f64, market_cap: f64, volatility: f64) -> RawMetrics {
    RawMetrics {
        volume_24h: volume,
        market_cap,
        price_change_24h: 0.01,
        volatility,
    }
}

pub fn make_catalog(entries: &[(&str, &[&str])]) -> CategoryCatalog {
    CategoryCatalog::new(
        entries
            .iter()
            .map(|(name, pairs)| Category {
                name: name.to_string(),
                pairs: pairs.iter().map(|p| p.to_string()).collect(),
            })
            .collect(),
    )
    .unwrap()
}

pub fn make_weights(entries: &[(&str, f64)]) -> CategoryWeights {
    entries
        .iter()
        .map(|(name, w)| (name.to_string(), *w))
        .collect()
}

/// Criteria that let any finite metric record through.
pub fn permissive_criteria() -> SelectionCriteria {
    SelectionCriteria {
        min_volume: 0.0,
        min_market_cap: 0.0,
        min_volatility: 0.0,
        max_volatility: 10.0,
        ..Default::default()
    }
}

pub fn pairs(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|p| p.to_string()).collect()
}
