//! Seeded synthetic metrics source for offline runs and demos.
//!
//! Draws per-pair metrics from fixed uniform ranges: volume in [5M, 500M],
//! market cap at 50x to 500x volume, 24h change in [-20%, +20%]. The same
//! seed and pair list always produce the same snapshot.

use crate::domain::error::PairsiftError;
use crate::domain::metrics::{MetricsSnapshot, RawMetrics};
use crate::ports::metrics_port::MetricsPort;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 42;

pub struct SyntheticSource {
    seed: u64,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MetricsPort for SyntheticSource {
    fn fetch_metrics(&self, pairs: &[String]) -> Result<MetricsSnapshot, PairsiftError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut snapshot = MetricsSnapshot::new();
        for pair in pairs {
            let volume: f64 = rng.gen_range(5_000_000.0..500_000_000.0);
            let cap_multiple: f64 = rng.gen_range(50.0..500.0);
            let change: f64 = rng.gen_range(-0.2..0.2);
            snapshot.insert(
                pair.clone(),
                Ok(RawMetrics {
                    volume_24h: volume,
                    market_cap: volume * cap_multiple,
                    price_change_24h: change,
                    volatility: change.abs(),
                }),
            );
        }
        Ok(snapshot)
    }
}
