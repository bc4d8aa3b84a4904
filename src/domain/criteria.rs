//! Selection criteria: typed thresholds with documented defaults.
//!
//! Precedence: built-in defaults, then the catalog file's
//! `selection_criteria` record, then an optional INI settings file, then CLI
//! flags (applied by the caller).

use crate::domain::error::PairsiftError;
use crate::ports::config_port::ConfigPort;
use chrono::Duration;
use serde::Deserialize;

/// Volatility considered optimal when no band is configured.
pub const DEFAULT_OPTIMAL_VOLATILITY: f64 = 0.05;

/// Composite score weights. Fixed policy constants; adjustable per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub volume: f64,
    pub market_cap: f64,
    pub volatility: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            volume: 0.4,
            market_cap: 0.3,
            volatility: 0.3,
        }
    }
}

/// Thresholds and policy for the score-based selector.
///
/// Defaults: 10 pairs, $10M minimum 24h volume, $100M minimum market cap,
/// volatility band [2%, 10%], 4 hour refresh period.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionCriteria {
    pub max_pairs: usize,
    pub min_volume: f64,
    pub min_market_cap: f64,
    pub min_volatility: f64,
    pub max_volatility: f64,
    pub refresh_period: Duration,
    pub weights: ScoreWeights,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            max_pairs: 10,
            min_volume: 10_000_000.0,
            min_market_cap: 100_000_000.0,
            min_volatility: 0.02,
            max_volatility: 0.10,
            refresh_period: Duration::hours(4),
            weights: ScoreWeights::default(),
        }
    }
}

/// Partial criteria as embedded in the catalog file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogCriteria {
    pub volume_min: Option<f64>,
    pub market_cap_min: Option<f64>,
    pub min_volatility: Option<f64>,
    pub max_volatility: Option<f64>,
}

impl SelectionCriteria {
    /// Midpoint of the configured volatility band; the target the volatility
    /// score rewards proximity to.
    pub fn optimal_volatility(&self) -> f64 {
        (self.min_volatility + self.max_volatility) / 2.0
    }

    pub fn apply_catalog(&mut self, overrides: &CatalogCriteria) {
        if let Some(v) = overrides.volume_min {
            self.min_volume = v;
        }
        if let Some(v) = overrides.market_cap_min {
            self.min_market_cap = v;
        }
        if let Some(v) = overrides.min_volatility {
            self.min_volatility = v;
        }
        if let Some(v) = overrides.max_volatility {
            self.max_volatility = v;
        }
    }

    /// Merge the `[selection]` section of an INI settings file. Missing keys
    /// keep their current values. `max_pairs` is range-checked as an i64
    /// before the usize cast so a negative setting cannot wrap.
    pub fn apply_config(&mut self, config: &dyn ConfigPort) -> Result<(), PairsiftError> {
        let max_pairs = config.get_int("selection", "max_pairs", self.max_pairs as i64);
        if max_pairs < 1 {
            return Err(invalid("max_pairs", "must be at least 1"));
        }
        self.max_pairs = max_pairs as usize;
        self.min_volume = config.get_double("selection", "min_volume", self.min_volume);
        self.min_market_cap =
            config.get_double("selection", "min_market_cap", self.min_market_cap);
        self.min_volatility =
            config.get_double("selection", "min_volatility", self.min_volatility);
        self.max_volatility =
            config.get_double("selection", "max_volatility", self.max_volatility);
        let hours = config.get_double(
            "selection",
            "refresh_period_hours",
            self.refresh_period.num_minutes() as f64 / 60.0,
        );
        self.refresh_period = Duration::minutes((hours * 60.0) as i64);
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PairsiftError> {
        if self.max_pairs < 1 {
            return Err(invalid("max_pairs", "must be at least 1"));
        }
        if !self.min_volume.is_finite() || self.min_volume < 0.0 {
            return Err(invalid("min_volume", "must be non-negative"));
        }
        if !self.min_market_cap.is_finite() || self.min_market_cap < 0.0 {
            return Err(invalid("min_market_cap", "must be non-negative"));
        }
        if !self.min_volatility.is_finite() || self.min_volatility < 0.0 {
            return Err(invalid("min_volatility", "must be non-negative"));
        }
        if !self.max_volatility.is_finite() || self.max_volatility <= self.min_volatility {
            return Err(invalid(
                "max_volatility",
                "must be greater than min_volatility",
            ));
        }
        if self.refresh_period < Duration::zero() {
            return Err(invalid("refresh_period_hours", "must be non-negative"));
        }
        let w = &self.weights;
        if [w.volume, w.market_cap, w.volatility]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(invalid("score_weights", "weights must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> PairsiftError {
    PairsiftError::ConfigInvalid {
        section: "selection".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
