//! Camarilla support and resistance bands.
//!
//! Level k sits at close +/- range * multiplier(k) where range is the
//! previous bar's high minus low. Two published multiplier scales exist:
//!
//! - Classic: 1.1/12, 1.1/6, 1.1/4 for levels 1..3
//! - RangeDoubling: 1.1/2 * 2^(k-1), doubling per level
//!
//! Both are in circulation; the caller picks one explicitly. Like the floor
//! pivots, levels for bar i come from bar i-1 and the first bar is invalid.

use crate::domain::bars::OhlcvBar;
use crate::domain::indicator::{
    CamarillaScaling, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};

/// Band multiplier for level `k` (1-based, levels 1..3).
pub fn multiplier(scaling: CamarillaScaling, k: u32) -> f64 {
    match scaling {
        CamarillaScaling::Classic => match k {
            1 => 1.1 / 12.0,
            2 => 1.1 / 6.0,
            _ => 1.1 / 4.0,
        },
        CamarillaScaling::RangeDoubling => 1.1 / 2.0 * 2f64.powi(k as i32 - 1),
    }
}

/// Camarilla levels for a single bar's high, low, close.
pub fn camarilla_levels(high: f64, low: f64, close: f64, scaling: CamarillaScaling) -> IndicatorValue {
    let range = high - low;
    let m1 = range * multiplier(scaling, 1);
    let m2 = range * multiplier(scaling, 2);
    let m3 = range * multiplier(scaling, 3);
    IndicatorValue::Camarilla {
        r1: close + m1,
        r2: close + m2,
        r3: close + m3,
        s1: close - m1,
        s2: close - m2,
        s3: close - m3,
    }
}

pub fn calculate_camarilla(bars: &[OhlcvBar], scaling: CamarillaScaling) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: IndicatorValue::Simple(0.0),
            });
        } else {
            let prev = &bars[i - 1];
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: camarilla_levels(prev.high, prev.low, prev.close, scaling),
            });
        }
    }
    IndicatorSeries {
        indicator_type: IndicatorType::Camarilla(scaling),
        values,
    }
}
