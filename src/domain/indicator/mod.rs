//! Technical indicator types and calculations.
//!
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorValue`: enum for different indicator output shapes
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: a time series of indicator values
//!
//! Indicators with a warmup period emit invalid points for the warmup bars
//! so the series stays aligned with the input bars.

pub mod atr;
pub mod camarilla;
pub mod ema;
pub mod filters;
pub mod pivot;
pub mod sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Pivot {
        pivot: f64,
        r1: f64,
        r2: f64,
        r3: f64,
        s1: f64,
        s2: f64,
        s3: f64,
    },
    PivotRange {
        pivot: f64,
        bc: f64,
        tc: f64,
    },
    Camarilla {
        r1: f64,
        r2: f64,
        r3: f64,
        s1: f64,
        s2: f64,
        s3: f64,
    },
}

/// Level-scaling variant for Camarilla bands. `Classic` uses the published
/// multipliers 1.1/12, 1.1/6, 1.1/4; `RangeDoubling` doubles the multiplier
/// per level starting from 1.1/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CamarillaScaling {
    Classic,
    RangeDoubling,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Atr(usize),
    Pivot,
    PivotRange,
    Camarilla(CamarillaScaling),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Atr(period) => write!(f, "ATR({})", period),
            IndicatorType::Pivot => write!(f, "PIVOT"),
            IndicatorType::PivotRange => write!(f, "PIVOT_RANGE"),
            IndicatorType::Camarilla(CamarillaScaling::Classic) => write!(f, "CAMARILLA(classic)"),
            IndicatorType::Camarilla(CamarillaScaling::RangeDoubling) => {
                write!(f, "CAMARILLA(range-doubling)")
            }
        }
    }
}
