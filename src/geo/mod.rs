//! Geo module - boundary loading and the state join

mod boundary;
mod join;

pub use boundary::{load_boundaries, Point};
pub use join::{join_totals, JoinOutcome, MapRegion};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Failed to read boundary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No boundary matches any state in the dataset")]
    NoMatchingRegions,
}
