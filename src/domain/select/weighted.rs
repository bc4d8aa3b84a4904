//! Category-weighted selector.
//!
//! Iterates categories in catalog order; a category with weight `w`
//! contributes its first `floor(max_pairs * w)` pairs, capped by supply and
//! remaining output capacity. Slots left over after the weighted pass are
//! filled from the flattened catalog in order, skipping pairs already taken.

use crate::domain::catalog::{CategoryCatalog, CategoryWeights};
use std::collections::HashSet;

/// Select up to `max_pairs` pairs. The result has no duplicates and never
/// exceeds the catalog's distinct pair count. An empty catalog yields an
/// empty result.
pub fn select_weighted(
    catalog: &CategoryCatalog,
    weights: &CategoryWeights,
    max_pairs: usize,
) -> Vec<String> {
    let mut selected = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for category in catalog.categories() {
        if selected.len() >= max_pairs {
            break;
        }
        let weight = weights.get(&category.name);
        if weight <= 0.0 {
            continue;
        }
        let quota = (max_pairs as f64 * weight).floor() as usize;
        let take = quota
            .min(category.pairs.len())
            .min(max_pairs - selected.len());
        for pair in category.pairs.iter().take(take) {
            if seen.insert(pair.clone()) {
                selected.push(pair.clone());
            }
        }
    }

    if selected.len() < max_pairs {
        for pair in catalog.flatten() {
            if selected.len() >= max_pairs {
                break;
            }
            if seen.insert(pair.clone()) {
                selected.push(pair);
            }
        }
    }

    selected
}
