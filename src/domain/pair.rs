//! Pair identifier parsing.
//!
//! Pairs are written `BASE/QUOTE:SETTLE` (e.g. `BTC/USDT:USDT`); the settle
//! symbol is optional on input. Symbols are trimmed and uppercased.

use crate::domain::error::PairParseError;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairId {
    pub base: String,
    pub quote: String,
    pub settle: Option<String>,
}

impl PairId {
    pub fn parse(input: &str) -> Result<Self, PairParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PairParseError {
                input: input.to_string(),
                reason: "empty identifier".to_string(),
            });
        }

        let (base, rest) = trimmed.split_once('/').ok_or_else(|| PairParseError {
            input: input.to_string(),
            reason: "missing quote symbol (expected BASE/QUOTE)".to_string(),
        })?;

        let (quote, settle) = match rest.split_once(':') {
            Some((q, s)) => (q, Some(s)),
            None => (rest, None),
        };

        let base = normalize_symbol(base, input, "base")?;
        let quote = normalize_symbol(quote, input, "quote")?;
        let settle = match settle {
            Some(s) => Some(normalize_symbol(s, input, "settle")?),
            None => None,
        };

        Ok(Self {
            base,
            quote,
            settle,
        })
    }

    /// The base symbol, as used for metric lookups against providers.
    pub fn symbol(&self) -> &str {
        &self.base
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.settle {
            Some(settle) => write!(f, "{}/{}:{}", self.base, self.quote, settle),
            None => write!(f, "{}/{}", self.base, self.quote),
        }
    }
}

fn normalize_symbol(raw: &str, input: &str, part: &str) -> Result<String, PairParseError> {
    let symbol = raw.trim();
    if symbol.is_empty() {
        return Err(PairParseError {
            input: input.to_string(),
            reason: format!("empty {} symbol", part),
        });
    }
    if symbol.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
        return Err(PairParseError {
            input: input.to_string(),
            reason: format!("invalid character in {} symbol", part),
        });
    }
    Ok(symbol.to_uppercase())
}

/// Parse a comma-separated list of pair identifiers, rejecting duplicates.
pub fn parse_pairs(input: &str) -> Result<Vec<String>, PairParseError> {
    let mut pairs = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let pair = PairId::parse(token)?;
        let canonical = pair.to_string();
        if !seen.insert(canonical.clone()) {
            return Err(PairParseError {
                input: input.to_string(),
                reason: format!("duplicate pair {}", canonical),
            });
        }
        pairs.push(canonical);
    }

    Ok(pairs)
}

/// Base symbol of a pair string, or the whole string when it has no `/`.
pub fn base_symbol(pair: &str) -> &str {
    pair.split('/').next().unwrap_or(pair)
}
