//! Report module - the three views, run in order

pub mod geographic;
pub mod ranking;
pub mod temporal;

use crate::charts::StaticChartRenderer;
use crate::config::Config;
use crate::data::CovidDataset;
use anyhow::Result;
use std::path::Path;

/// Temporal and ranking failures are returned; the geographic view only
/// logs its own.
pub fn run_all(dataset: &CovidDataset, config: &Config) -> Result<()> {
    let temporal = temporal::render(dataset, config)?;
    show(config, &temporal);

    let ranking = ranking::render(dataset, config)?;
    show(config, &ranking);

    if let Some(map) = geographic::run(dataset, config) {
        show(config, &map);
    }
    Ok(())
}

fn show(config: &Config, path: &Path) {
    if config.show_outputs {
        StaticChartRenderer::show(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoader;
    use std::fs;

    const DATASET: &str = "\
estado,data,casos,mortes
SP,2022-01-01,100,3
RJ,2022-01-01,50,1
SP,2022-01-02,120,2
RJ,2022-01-02,40,0
";

    #[test]
    fn report_completes_without_boundary_file() {
        crate::data::init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("data.csv");
        fs::write(&data_path, DATASET).unwrap();
        let config = Config {
            data_path,
            boundary_path: dir.path().join("brasil.geojson"),
            output_dir: dir.path().to_path_buf(),
            dpi: 50,
            show_outputs: false,
            ..Config::default()
        };
        let dataset = DataLoader::from_config(&config)
            .load_csv(&config.data_path)
            .unwrap();

        run_all(&dataset, &config).unwrap();

        assert!(config.temporal_output().exists());
        assert!(config.ranking_output().exists());
        assert!(!config.map_output().exists());
    }
}
