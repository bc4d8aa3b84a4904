//! Activity filters derived from bar history.
//!
//! Both filters compare a value to its own rolling mean, so they mark bars
//! that are more active than their recent history. Early bars compare
//! against partial windows.

use crate::domain::bars::OhlcvBar;
use crate::domain::indicator::sma::rolling_mean;
use crate::domain::indicator::{IndicatorValue, atr::calculate_atr, ema::calculate_ema};

pub const ATR_MEAN_PERIOD: usize = 20;
pub const VOLUME_MEAN_PERIOD: usize = 20;
pub const TREND_EMA_PERIOD: usize = 200;

/// True where the bar's ATR exceeds the rolling mean of ATR. Bars in the ATR
/// warmup are false.
pub fn volatility_filter(bars: &[OhlcvBar], atr_period: usize, mean_period: usize) -> Vec<bool> {
    let series = calculate_atr(bars, atr_period);
    if series.values.is_empty() {
        return vec![false; bars.len()];
    }
    let atrs: Vec<f64> = series
        .values
        .iter()
        .map(|p| match p.value {
            IndicatorValue::Simple(v) => v,
            _ => 0.0,
        })
        .collect();
    let means = rolling_mean(&atrs, mean_period);
    series
        .values
        .iter()
        .zip(atrs.iter().zip(means.iter()))
        .map(|(point, (atr, mean))| point.valid && atr > mean)
        .collect()
}

/// True where the bar's volume exceeds the rolling mean of volume.
pub fn volume_filter(bars: &[OhlcvBar], mean_period: usize) -> Vec<bool> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
    let means = rolling_mean(&volumes, mean_period);
    volumes
        .iter()
        .zip(means.iter())
        .map(|(volume, mean)| volume > mean)
        .collect()
}

/// True where the bar closes above its EMA. Bars in the EMA warmup are
/// false.
pub fn trend_filter(bars: &[OhlcvBar], ema_period: usize) -> Vec<bool> {
    let series = calculate_ema(bars, ema_period);
    if series.values.is_empty() {
        return vec![false; bars.len()];
    }
    bars.iter()
        .zip(series.values.iter())
        .map(|(bar, point)| {
            point.valid
                && match point.value {
                    IndicatorValue::Simple(ema) => bar.close > ema,
                    _ => false,
                }
        })
        .collect()
}
