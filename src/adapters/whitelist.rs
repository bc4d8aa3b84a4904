//! Text rendering for selections: the copy-paste whitelist block, the
//! ranking table, and the per-category breakdown.

use crate::domain::catalog::{CategoryCatalog, UNKNOWN_CATEGORY};
use crate::domain::metrics::PairMetrics;

/// Render the selection as a JSON config fragment, ready to paste into a
/// bot's `pair_whitelist` setting.
pub fn render_pair_whitelist(pairs: &[String]) -> String {
    let mut out = String::from("\"pair_whitelist\": [\n");
    for (i, pair) in pairs.iter().enumerate() {
        let comma = if i + 1 < pairs.len() { "," } else { "" };
        out.push_str(&format!("    \"{}\"{}\n", pair, comma));
    }
    out.push_str("],\n");
    out
}

/// Render the ranked selection as an aligned table.
pub fn render_ranking_table(selected: &[PairMetrics]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<18} {:<20} {:>7} {:>14} {:>16} {:>8} {:>8}\n",
        "#", "Pair", "Category", "Score", "Volume 24h", "Market Cap", "Volat.", "Change"
    ));
    for (i, m) in selected.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<18} {:<20} {:>7.4} {:>14.0} {:>16.0} {:>7.2}% {:>+7.2}%\n",
            i + 1,
            m.pair,
            m.category,
            m.score,
            m.volume_24h,
            m.market_cap,
            m.volatility * 100.0,
            m.price_change_24h * 100.0,
        ));
    }
    out
}

/// Count selected pairs per category, in catalog order, with an `unknown`
/// row when any selection falls outside the catalog.
pub fn render_category_breakdown(selected: &[PairMetrics], catalog: &CategoryCatalog) -> String {
    let mut out = String::new();
    for category in catalog.categories() {
        let count = selected.iter().filter(|m| m.category == category.name).count();
        if count > 0 {
            out.push_str(&format!("  {}: {}\n", category.name, count));
        }
    }
    let unknown = selected
        .iter()
        .filter(|m| m.category == UNKNOWN_CATEGORY)
        .count();
    if unknown > 0 {
        out.push_str(&format!("  {}: {}\n", UNKNOWN_CATEGORY, unknown));
    }
    out
}
