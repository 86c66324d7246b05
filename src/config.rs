//! Report Configuration
//! File locations, column names and chart settings. Defaults reproduce the
//! January/February 2022 report for São Paulo.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Column names of the per-state dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Two-letter state code. Default: `estado`.
    pub state: String,
    /// Calendar date. Default: `data`.
    pub date: String,
    /// Case count. Default: `casos`.
    pub cases: String,
    /// Death count. Default: `mortes`.
    pub deaths: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            state: "estado".to_string(),
            date: "data".to_string(),
            cases: "casos".to_string(),
            deaths: "mortes".to_string(),
        }
    }
}

/// Everything the report needs to know about its inputs and outputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset path. Default: `covid_janeiro_fevereiro_2022_por_estado.csv`.
    pub data_path: PathBuf,
    /// GeoJSON boundary file. Default: `brasil.geojson`.
    pub boundary_path: PathBuf,
    /// Directory the PNG files are written to. Default: `.`.
    pub output_dir: PathBuf,
    /// State plotted by the temporal view. Default: `SP`.
    pub target_state: String,
    /// strptime format of the date column. Default: `%Y-%m-%d`.
    pub date_format: String,
    pub columns: ColumnNames,
    /// Boundary feature property holding the state code. Default: `sigla`.
    pub boundary_code_attribute: String,
    /// Period shown in chart titles. Default: `Jan-Fev/2022`.
    pub period_label: String,
    /// Output resolution. Default: 300.
    pub dpi: u32,
    /// Open each saved image with the system viewer. Default: `true`.
    pub show_outputs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("covid_janeiro_fevereiro_2022_por_estado.csv"),
            boundary_path: PathBuf::from("brasil.geojson"),
            output_dir: PathBuf::from("."),
            target_state: "SP".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            columns: ColumnNames::default(),
            boundary_code_attribute: "sigla".to_string(),
            period_label: "Jan-Fev/2022".to_string(),
            dpi: 300,
            show_outputs: true,
        }
    }
}

impl Config {
    /// `covid_{state}_linhas.png`
    pub fn temporal_output(&self) -> PathBuf {
        self.output_path(&format!("covid_{}_linhas.png", self.target_state))
    }

    pub fn ranking_output(&self) -> PathBuf {
        self.output_path("casos_por_estado_barras.png")
    }

    pub fn map_output(&self) -> PathBuf {
        self.output_path("mapa_covid_brasil.png")
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.output_dir).join(file_name)
    }

    /// Figure size in inches converted to pixels at the configured dpi.
    pub fn figure_px(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        ((width_in * dpi).round() as u32, (height_in * dpi).round() as u32)
    }

    /// Font size in points converted to pixels.
    pub fn font_px(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / 72.0).round().max(1.0) as u32
    }

    /// Line width in points converted to pixels.
    pub fn stroke_px(&self, points: f64) -> u32 {
        self.font_px(points)
    }
}
