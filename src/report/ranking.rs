//! Ranking view: total cases per state.

use crate::charts::StaticChartRenderer;
use crate::config::Config;
use crate::data::{CovidDataset, DataProcessor};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

pub fn render(dataset: &CovidDataset, config: &Config) -> Result<PathBuf> {
    info!("generating ranking view");

    let totals = DataProcessor::aggregate_by_state(dataset)?;
    let path = config.ranking_output();
    let title = format!(
        "Total de Casos de COVID-19 por Estado ({})",
        config.period_label
    );
    StaticChartRenderer::render_ranking(&path, &totals, &title, config)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), states = totals.len(), "ranking chart saved");
    Ok(path)
}
