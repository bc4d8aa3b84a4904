#[cfg(feature = "live")]
pub mod coingecko;
pub mod csv_bars;
pub mod file_config_adapter;
pub mod json_catalog;
pub mod synthetic_source;
pub mod ticker_source;
pub mod whitelist;
