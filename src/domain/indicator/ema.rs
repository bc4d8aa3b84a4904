//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Warmup: first (n-1) bars are invalid.

use crate::domain::bars::OhlcvBar;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut series = IndicatorSeries {
        indicator_type: IndicatorType::Ema(period),
        values: Vec::with_capacity(bars.len()),
    };
    if period == 0 {
        return series;
    }

    let weight = 2.0 / (period as f64 + 1.0);
    let mut ema: Option<f64> = None;
    let mut warmup_sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        ema = match ema {
            Some(prev) => Some(bar.close * weight + prev * (1.0 - weight)),
            None => {
                warmup_sum += bar.close;
                (i + 1 == period).then(|| warmup_sum / period as f64)
            }
        };
        series.values.push(IndicatorPoint {
            date: bar.date,
            valid: ema.is_some(),
            value: IndicatorValue::Simple(ema.unwrap_or(0.0)),
        });
    }

    series
}
