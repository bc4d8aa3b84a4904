//! CSV OHLCV data adapter.
//!
//! Expects a header of `date,open,high,low,close,volume` with ISO dates.
//! Rows are sorted by date after the read, so unordered files are accepted.

use crate::domain::bars::OhlcvBar;
use crate::domain::error::PairsiftError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub fn load_bars<P: AsRef<Path>>(path: P, pair: &str) -> Result<Vec<OhlcvBar>, PairsiftError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PairsiftError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    parse_bars(&content, pair)
}

pub fn parse_bars(content: &str, pair: &str) -> Result<Vec<OhlcvBar>, PairsiftError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut bars = Vec::new();

    for result in rdr.deserialize() {
        let row: CsvRow = result.map_err(|e| PairsiftError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;
        if row.high < row.low {
            return Err(PairsiftError::Data {
                reason: format!("bar on {} has high below low", row.date),
            });
        }
        bars.push(OhlcvBar {
            pair: pair.to_string(),
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}
