pub mod bars;
pub mod catalog;
pub mod criteria;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod pair;
pub mod refresh;
pub mod score;
pub mod select;
