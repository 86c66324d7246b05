//! COVID-19 Brazil Charts
//!
//! Loads per-state case and death counts and writes three PNG charts: the
//! evolution in one state, a ranking of all states and a choropleth map.

mod charts;
mod config;
mod data;
mod geo;
mod report;

use anyhow::{Context, Result};
use config::Config;
use data::DataLoader;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const DATA_SOURCE: &str = "https://brasil.io/dataset/covid19/files/";

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = Config::default();
    info!("=== COVID-19 data visualization ({}) ===", config.period_label);
    info!(source = DATA_SOURCE, path = %config.data_path.display(), "loading dataset");

    let dataset = DataLoader::from_config(&config)
        .load_csv(&config.data_path)
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;
    if dataset.is_empty() {
        warn!("dataset has no rows, charts will be empty");
    }

    report::run_all(&dataset, &config)?;

    info!(
        rows = dataset.height(),
        output_dir = %config.output_dir.display(),
        "done, check the generated charts"
    );
    Ok(())
}
