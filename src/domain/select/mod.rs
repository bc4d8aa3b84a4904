//! Pair selectors: category-weighted and score-based.

pub mod scored;
pub mod weighted;
