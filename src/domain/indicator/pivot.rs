//! Floor-trader pivot points.
//!
//! Levels for bar i are computed from bar i-1's high, low, and close, so the
//! first bar is invalid. P = (H+L+C)/3, R1 = 2P-L, S1 = 2P-H, R2 = P+(H-L),
//! S2 = P-(H-L), R3 = H+2(P-L), S3 = L-2(H-P).
//!
//! The pivot-range variant adds the bottom and top central levels used for
//! narrow-range breakout setups: BC = (H+L)/2, TC = (P-BC)+P.

use crate::domain::bars::OhlcvBar;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};

/// Pivot and support/resistance levels for a single bar.
pub fn pivot_levels(bar: &OhlcvBar) -> IndicatorValue {
    let pivot = bar.typical_price();
    IndicatorValue::Pivot {
        pivot,
        r1: 2.0 * pivot - bar.low,
        r2: pivot + (bar.high - bar.low),
        r3: bar.high + 2.0 * (pivot - bar.low),
        s1: 2.0 * pivot - bar.high,
        s2: pivot - (bar.high - bar.low),
        s3: bar.low - 2.0 * (bar.high - pivot),
    }
}

/// Central pivot range for a single bar.
pub fn pivot_range_levels(bar: &OhlcvBar) -> IndicatorValue {
    let pivot = bar.typical_price();
    let bc = (bar.high + bar.low) / 2.0;
    let tc = (pivot - bc) + pivot;
    IndicatorValue::PivotRange { pivot, bc, tc }
}

pub fn calculate_pivot(bars: &[OhlcvBar]) -> IndicatorSeries {
    calculate_shifted(bars, IndicatorType::Pivot, pivot_levels)
}

pub fn calculate_pivot_range(bars: &[OhlcvBar]) -> IndicatorSeries {
    calculate_shifted(bars, IndicatorType::PivotRange, pivot_range_levels)
}

fn calculate_shifted(
    bars: &[OhlcvBar],
    indicator_type: IndicatorType,
    levels: fn(&OhlcvBar) -> IndicatorValue,
) -> IndicatorSeries {
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
                value: levels(prev),
            });
        }
    }
    IndicatorSeries {
        indicator_type,
        values,
    }
}
