//! Average True Range (Wilder smoothing) and the ATR-based stop helpers.
//!
//! Seed with the SMA of the first n true ranges, then
//! ATR[i] = (ATR[i-1]*(n-1) + TR[i]) / n. Warmup: first (n-1) bars invalid.

use crate::domain::bars::OhlcvBar;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

pub const ATR_PERIOD: usize = 14;
pub const ATR_STOPLOSS_MULTIPLIER: f64 = 1.5;
pub const ATR_ROI_MULTIPLIER: f64 = 2.0;

/// Floor when the ATR stop would be wider than this fraction of entry price.
pub const STATIC_STOPLOSS: f64 = -0.15;
/// Minimum take-profit fraction when the ATR target is tighter.
pub const STATIC_ROI: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Long,
    Short,
}

pub fn calculate_atr(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    if bars.len() < period || period == 0 {
        return IndicatorSeries {
            indicator_type: IndicatorType::Atr(period),
            values: Vec::new(),
        };
    }

    let mut tr_values: Vec<f64> = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let tr = if i == 0 {
            bar.high - bar.low
        } else {
            bar.true_range(bars[i - 1].close)
        };
        tr_values.push(tr);
    }

    let mut results: Vec<IndicatorPoint> = Vec::with_capacity(bars.len());
    let mut atr = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i < period - 1 {
            results.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
        } else if i == period - 1 {
            atr = tr_values[0..=i].iter().sum::<f64>() / period as f64;
            results.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(atr),
            });
        } else {
            atr = (atr * (period - 1) as f64 + tr_values[i]) / period as f64;
            results.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(atr),
            });
        }
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Atr(period),
        values: results,
    }
}

/// Absolute stop price at `multiplier` ATRs from entry, against the trade.
pub fn atr_stop_price(entry: f64, atr: f64, multiplier: f64, side: TradeSide) -> f64 {
    match side {
        TradeSide::Long => entry - multiplier * atr,
        TradeSide::Short => entry + multiplier * atr,
    }
}

/// Absolute target price at `multiplier` ATRs from entry, with the trade.
pub fn atr_target_price(entry: f64, atr: f64, multiplier: f64, side: TradeSide) -> f64 {
    match side {
        TradeSide::Long => entry + multiplier * atr,
        TradeSide::Short => entry - multiplier * atr,
    }
}

/// Distance from entry to `price` as a positive fraction of entry,
/// sign-normalized for the trade side.
pub fn relative_distance(entry: f64, price: f64, side: TradeSide) -> f64 {
    match side {
        TradeSide::Long => (entry - price) / entry,
        TradeSide::Short => (price - entry) / entry,
    }
}
