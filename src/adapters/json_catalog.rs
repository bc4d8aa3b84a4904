//! JSON catalog file adapter.
//!
//! Format:
//!
//! ```json
//! {
//!   "categories": {
//!     "blue_chips": ["BTC/USDT:USDT", "ETH/USDT:USDT"],
//!     "defi_tokens": ["UNI/USDT:USDT"]
//!   },
//!   "selection_strategy": { "blue_chips_weight": 0.4, "defi_weight": 0.2 },
//!   "selection_criteria": { "volume_min": 10000000 }
//! }
//! ```
//!
//! Category order in the file is the catalog order, so the parse goes
//! through an order-preserving map.

use crate::domain::catalog::{Category, CategoryCatalog, SelectionStrategy};
use crate::domain::criteria::CatalogCriteria;
use crate::domain::error::PairsiftError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    selection_strategy: Option<SelectionStrategy>,
    #[serde(default)]
    selection_criteria: Option<CatalogCriteria>,
}

/// A parsed catalog file: the catalog plus its optional embedded strategy
/// and criteria records.
#[derive(Debug)]
pub struct CatalogFile {
    pub catalog: CategoryCatalog,
    pub strategy: Option<SelectionStrategy>,
    pub criteria: Option<CatalogCriteria>,
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogFile, PairsiftError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PairsiftError::CatalogLoad {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, &path.display().to_string())
}

pub fn parse_catalog(content: &str, file: &str) -> Result<CatalogFile, PairsiftError> {
    let raw: RawCatalog =
        serde_json::from_str(content).map_err(|e| PairsiftError::CatalogLoad {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    let mut categories = Vec::with_capacity(raw.categories.len());
    for (name, value) in raw.categories {
        let pairs: Vec<String> =
            serde_json::from_value(value).map_err(|e| PairsiftError::CatalogLoad {
                file: file.to_string(),
                reason: format!("category {} is not a list of pairs: {}", name, e),
            })?;
        categories.push(Category { name, pairs });
    }

    Ok(CatalogFile {
        catalog: CategoryCatalog::new(categories)?,
        strategy: raw.selection_strategy,
        criteria: raw.selection_criteria,
    })
}
