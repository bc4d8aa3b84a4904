//! Score normalization and the weighted composite.

use crate::domain::criteria::ScoreWeights;

/// Fallback when a metric is degenerate over the filtered set (max == min):
/// every record gets a neutral score instead of a division by zero.
pub const DEGENERATE_SCORE: f64 = 0.5;

/// Min-max scale `values` to [0, 1]. All-equal input maps every entry to
/// [`DEGENERATE_SCORE`].
pub fn min_max_scores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        return vec![DEGENERATE_SCORE; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

/// Target-band volatility score: 1 at `optimal`, falling off linearly and
/// clamped to [0, 1]. Rewards volatility near the band midpoint, not simply
/// higher volatility. A non-positive `optimal` makes the band meaningless;
/// every record then scores neutral.
pub fn volatility_band_score(volatility: f64, optimal: f64) -> f64 {
    if optimal <= 0.0 || !optimal.is_finite() {
        return DEGENERATE_SCORE;
    }
    (1.0 - (volatility - optimal).abs() / optimal).clamp(0.0, 1.0)
}

pub fn composite_score(
    volume_score: f64,
    market_cap_score: f64,
    volatility_score: f64,
    weights: &ScoreWeights,
) -> f64 {
    volume_score * weights.volume
        + market_cap_score * weights.market_cap
        + volatility_score * weights.volatility
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn min_max_scales_to_unit_interval() {
        let scores = min_max_scores(&[100.0, 200.0, 150.0]);
        assert_relative_eq!(scores[0], 0.0);
        assert_relative_eq!(scores[1], 1.0);
        assert_relative_eq!(scores[2], 0.5);
    }

    #[test]
    fn min_max_degenerate_input_is_neutral() {
        let scores = min_max_scores(&[42.0, 42.0, 42.0]);
        assert_eq!(scores, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn min_max_single_value_is_neutral() {
        assert_eq!(min_max_scores(&[7.0]), vec![0.5]);
    }

    #[test]
    fn min_max_empty_input() {
        assert!(min_max_scores(&[]).is_empty());
    }

    #[test]
    fn volatility_score_peaks_at_optimal() {
        assert_relative_eq!(volatility_band_score(0.05, 0.05), 1.0);
        assert!(volatility_band_score(0.04, 0.05) < 1.0);
        assert!(volatility_band_score(0.06, 0.05) < 1.0);
    }

    #[test]
    fn volatility_score_is_symmetric_around_optimal() {
        let below = volatility_band_score(0.03, 0.05);
        let above = volatility_band_score(0.07, 0.05);
        assert_relative_eq!(below, above);
    }

    #[test]
    fn volatility_score_clamps_to_zero() {
        // |0.2 - 0.05| / 0.05 = 3, well past the linear falloff
        assert_eq!(volatility_band_score(0.2, 0.05), 0.0);
    }

    #[test]
    fn volatility_score_zero_optimal_is_neutral() {
        assert_eq!(volatility_band_score(0.05, 0.0), DEGENERATE_SCORE);
    }

    #[test]
    fn composite_uses_configured_weights() {
        let weights = ScoreWeights::default();
        let score = composite_score(1.0, 0.5, 0.25, &weights);
        assert_relative_eq!(score, 0.4 + 0.15 + 0.075);
    }

    #[test]
    fn composite_in_unit_interval_for_unit_inputs() {
        let weights = ScoreWeights::default();
        assert_relative_eq!(composite_score(1.0, 1.0, 1.0, &weights), 1.0);
        assert_relative_eq!(composite_score(0.0, 0.0, 0.0, &weights), 0.0);
    }

    #[test]
    fn composite_monotonic_in_volume_score() {
        let weights = ScoreWeights::default();
        let low = composite_score(0.2, 0.5, 0.5, &weights);
        let high = composite_score(0.8, 0.5, 0.5, &weights);
        assert!(high > low);
    }
}
