//! Score-based selector: filter candidates by thresholds, normalize each
//! metric over the survivors, combine into a weighted composite, rank
//! descending, truncate.
//!
//! Normalization is relative to the filtered set only, so a score is only
//! meaningful within one invocation.

use crate::domain::catalog::CategoryCatalog;
use crate::domain::criteria::SelectionCriteria;
use crate::domain::metrics::{MetricError, MetricsSnapshot, PairMetrics, RawMetrics, SkippedPair};
use crate::domain::pair::base_symbol;
use crate::domain::score::{composite_score, min_max_scores, volatility_band_score};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Outcome of one scoring run. `skipped` lists candidates with no usable
/// metrics; `filtered_out` counts candidates with valid metrics that failed
/// a threshold.
#[derive(Debug, Clone)]
pub struct SelectionReport {
    pub selected: Vec<PairMetrics>,
    pub skipped: Vec<SkippedPair>,
    pub filtered_out: usize,
}

/// Score `candidates` against `snapshot` and return the top pairs per
/// `criteria`. Duplicate candidates are collapsed to their first occurrence.
/// Ties in score keep candidate order; the sort is stable.
pub fn select_by_score(
    candidates: &[String],
    catalog: &CategoryCatalog,
    snapshot: &MetricsSnapshot,
    criteria: &SelectionCriteria,
) -> SelectionReport {
    let mut seen = HashSet::new();
    let mut survivors: Vec<(String, RawMetrics)> = Vec::new();
    let mut skipped = Vec::new();
    let mut filtered_out = 0;

    for pair in candidates {
        if !seen.insert(pair.as_str()) {
            continue;
        }
        let raw = match snapshot.get(pair) {
            Some(Ok(raw)) => raw,
            Some(Err(reason)) => {
                skipped.push(SkippedPair {
                    pair: pair.clone(),
                    reason: reason.clone(),
                });
                continue;
            }
            None => {
                skipped.push(SkippedPair {
                    pair: pair.clone(),
                    reason: MetricError::NoData,
                });
                continue;
            }
        };
        if raw.volume_24h < criteria.min_volume
            || raw.market_cap < criteria.min_market_cap
            || raw.volatility < criteria.min_volatility
            || raw.volatility > criteria.max_volatility
        {
            filtered_out += 1;
            continue;
        }
        survivors.push((pair.clone(), raw.clone()));
    }

    if survivors.is_empty() {
        if filtered_out > 0 {
            eprintln!(
                "Warning: no pairs passed the selection thresholds ({} filtered out)",
                filtered_out
            );
        }
        return SelectionReport {
            selected: Vec::new(),
            skipped,
            filtered_out,
        };
    }

    let volumes: Vec<f64> = survivors.iter().map(|(_, m)| m.volume_24h).collect();
    let caps: Vec<f64> = survivors.iter().map(|(_, m)| m.market_cap).collect();
    let volume_scores = min_max_scores(&volumes);
    let cap_scores = min_max_scores(&caps);
    let optimal = criteria.optimal_volatility();

    let mut selected: Vec<PairMetrics> = survivors
        .iter()
        .enumerate()
        .map(|(i, (pair, raw))| {
            let volatility_score = volatility_band_score(raw.volatility, optimal);
            let score = composite_score(
                volume_scores[i],
                cap_scores[i],
                volatility_score,
                &criteria.weights,
            );
            PairMetrics {
                pair: pair.clone(),
                symbol: base_symbol(pair).to_string(),
                category: catalog.category_of(pair).to_string(),
                volume_24h: raw.volume_24h,
                market_cap: raw.market_cap,
                price_change_24h: raw.price_change_24h,
                volatility: raw.volatility,
                score,
            }
        })
        .collect();

    selected.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    selected.truncate(criteria.max_pairs);

    SelectionReport {
        selected,
        skipped,
        filtered_out,
    }
}
