//! Daily OHLCV bar for indicator calculations.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub pair: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// True range against the previous close.
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(high: f64, low: f64, close: f64) -> OhlcvBar {
        OhlcvBar {
            pair: "BTC/USDT:USDT".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            open: close,
            high,
            low,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn typical_price_is_hlc_mean() {
        let b = bar(120.0, 90.0, 105.0);
        assert!((b.typical_price() - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn true_range_uses_widest_span() {
        let b = bar(110.0, 100.0, 105.0);
        // gap down: previous close above the high
        assert!((b.true_range(120.0) - 20.0).abs() < f64::EPSILON);
        // gap up: previous close below the low
        assert!((b.true_range(95.0) - 15.0).abs() < f64::EPSILON);
        // no gap: plain high-low range
        assert!((b.true_range(105.0) - 10.0).abs() < f64::EPSILON);
    }
}
