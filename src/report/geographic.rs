//! Geographic view: choropleth of total cases.
//!
//! The only view that recovers locally: [`run`] logs any failure and lets the
//! report finish.

use crate::charts::StaticChartRenderer;
use crate::config::Config;
use crate::data::{CovidDataset, DataProcessor};
use crate::geo::{self, GeoError, JoinOutcome};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Totals joined to the boundary file. States and boundaries without a
/// counterpart are dropped and logged.
pub fn join(dataset: &CovidDataset, config: &Config) -> Result<JoinOutcome> {
    let totals = DataProcessor::aggregate_by_state(dataset)?;
    let boundaries =
        geo::load_boundaries(&config.boundary_path, &config.boundary_code_attribute)?;
    let outcome = geo::join_totals(boundaries, &totals);

    if !outcome.unmatched_states.is_empty() {
        warn!(
            count = outcome.unmatched_states.len(),
            states = ?outcome.unmatched_states,
            "states without a boundary are left off the map"
        );
    }
    if !outcome.unmatched_boundaries.is_empty() {
        warn!(
            count = outcome.unmatched_boundaries.len(),
            boundaries = ?outcome.unmatched_boundaries,
            "boundaries without data are left off the map"
        );
    }
    Ok(outcome)
}

pub fn render(dataset: &CovidDataset, config: &Config) -> Result<PathBuf> {
    info!("generating geographic view");

    let outcome = join(dataset, config)?;
    let Some((min, max)) = outcome.case_range() else {
        return Err(GeoError::NoMatchingRegions.into());
    };
    info!(
        regions = outcome.regions.len(),
        dropped = outcome.dropped(),
        min,
        max,
        "joined totals to boundaries"
    );

    let path = config.map_output();
    let title = format!("Casos de COVID-19 por Estado ({})", config.period_label);
    StaticChartRenderer::render_choropleth(&path, &outcome.regions, &title, config)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "map saved");
    Ok(path)
}

/// [`render`], with errors reported instead of returned.
pub fn run(dataset: &CovidDataset, config: &Config) -> Option<PathBuf> {
    match render(dataset, config) {
        Ok(path) => Some(path),
        Err(err) => {
            error!("failed to generate map: {err:#}");
            warn!(
                "make sure '{}' is in the working directory",
                config.boundary_path.display()
            );
            None
        }
    }
}
