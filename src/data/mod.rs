//! Data module - CSV loading and per-state aggregation

mod loader;
mod processor;

pub use loader::{CovidDataset, DataLoader};
pub use processor::{DataProcessor, StateTotals, TemporalSeries};

#[cfg(test)]
pub(crate) use loader::tests::init_test_logging;
