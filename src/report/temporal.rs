//! Temporal view: evolution of cases and deaths in the target state.

use crate::charts::StaticChartRenderer;
use crate::config::Config;
use crate::data::{CovidDataset, DataProcessor};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

pub fn render(dataset: &CovidDataset, config: &Config) -> Result<PathBuf> {
    let state = config.target_state.as_str();
    info!(state, "generating temporal view");

    let series = DataProcessor::series_for_state(dataset, state)?;
    if series.is_empty() {
        warn!(state, "no rows for the target state, the chart will be empty");
    }

    let path = config.temporal_output();
    let title = format!("Evolução de COVID-19 em {state} ({})", config.period_label);
    StaticChartRenderer::render_temporal(&path, &series, &title, config)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), points = series.len(), "temporal chart saved");
    Ok(path)
}
