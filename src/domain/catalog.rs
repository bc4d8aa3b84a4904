//! Category catalog: ordered category → pair-list mapping.
//!
//! The catalog is loaded once from a JSON file and is read-only for the
//! lifetime of a scoring run. Category order and per-category pair order are
//! the file order; both selectors depend on that order for determinism.

use crate::domain::error::PairsiftError;
use crate::domain::pair::PairId;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Reverse-lookup result for pairs in no category.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub pairs: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Build a catalog, validating every pair identifier. Category and pair
    /// order are preserved as given.
    pub fn new(categories: Vec<Category>) -> Result<Self, PairsiftError> {
        let mut canonical = Vec::with_capacity(categories.len());
        for category in categories {
            if category.name.trim().is_empty() {
                return Err(PairsiftError::CatalogInvalid {
                    reason: "empty category name".to_string(),
                });
            }
            let mut pairs = Vec::with_capacity(category.pairs.len());
            for raw in &category.pairs {
                pairs.push(PairId::parse(raw)?.to_string());
            }
            canonical.push(Category {
                name: category.name,
                pairs,
            });
        }
        Ok(Self {
            categories: canonical,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.pairs.is_empty())
    }

    /// Total pair count across categories, duplicates included.
    pub fn pair_count(&self) -> usize {
        self.categories.iter().map(|c| c.pairs.len()).sum()
    }

    /// All pairs in catalog order, first occurrence wins on duplicates.
    pub fn flatten(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut all = Vec::new();
        for category in &self.categories {
            for pair in &category.pairs {
                if seen.insert(pair.as_str()) {
                    all.push(pair.clone());
                }
            }
        }
        all
    }

    /// Name of the first category containing `pair`, or [`UNKNOWN_CATEGORY`].
    pub fn category_of(&self, pair: &str) -> &str {
        for category in &self.categories {
            if category.pairs.iter().any(|p| p == pair) {
                return &category.name;
            }
        }
        UNKNOWN_CATEGORY
    }

    pub fn pairs_in(&self, name: &str) -> &[String] {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.pairs.as_slice())
            .unwrap_or(&[])
    }
}

/// Category weight mapping for the weighted selector. Categories without an
/// entry contribute zero to the weighted pass.
#[derive(Debug, Clone, Default)]
pub struct CategoryWeights {
    weights: HashMap<String, f64>,
}

impl CategoryWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, category: &str, weight: f64) {
        self.weights.insert(category.to_string(), weight);
    }

    pub fn get(&self, category: &str) -> f64 {
        self.weights.get(category).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn validate(&self) -> Result<(), PairsiftError> {
        for (category, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(PairsiftError::CatalogInvalid {
                    reason: format!("weight for category {} must be non-negative", category),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for CategoryWeights {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().collect(),
        }
    }
}

/// The catalog file's `selection_strategy` record. Weight fields map to the
/// canonical category names used by the catalog. `other_weight` is accepted
/// for compatibility but unnamed categories are only drawn in the fill pass.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionStrategy {
    #[serde(default)]
    pub blue_chips_weight: f64,
    #[serde(default)]
    pub defi_weight: f64,
    #[serde(default)]
    pub layer1_weight: f64,
    #[serde(default)]
    pub gaming_weight: f64,
    #[serde(default)]
    pub other_weight: Option<f64>,
}

impl SelectionStrategy {
    pub fn category_weights(&self) -> CategoryWeights {
        let mut weights = CategoryWeights::new();
        weights.set("blue_chips", self.blue_chips_weight);
        weights.set("defi_tokens", self.defi_weight);
        weights.set("layer1_blockchains", self.layer1_weight);
        weights.set("gaming_metaverse", self.gaming_weight);
        weights
    }
}
