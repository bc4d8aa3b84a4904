pub mod config_port;
pub mod metrics_port;
