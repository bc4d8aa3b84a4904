//! Simple Moving Average.
//!
//! Warmup: first (n-1) bars are invalid. `rolling_mean` is the partial-window
//! variant used by the volume and volatility filters, valid from the first
//! element.

use crate::domain::bars::OhlcvBar;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Sma(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }
        if i < period - 1 {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
        } else {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(sum / period as f64),
            });
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}

/// Rolling mean over windows of up to `period` values. Early positions
/// average whatever is available so far.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![0.0; values.len()];
    }
    let mut means = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, v) in values.iter().enumerate() {
        sum += v;
        if i >= period {
            sum -= values[i - period];
        }
        let window = (i + 1).min(period);
        means.push(sum / window as f64);
    }
    means
}
