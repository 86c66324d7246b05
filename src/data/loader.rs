//! CSV Data Loader Module
//! Loads the per-state dataset with Polars and parses the date column.

use crate::config::{ColumnNames, Config};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Rows shown in the load preview.
const PREVIEW_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing value in column '{column}' at row {row}")]
    MissingValue { column: String, row: usize },
}

/// One source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub state: String,
    pub date: NaiveDate,
    pub cases: i64,
    pub deaths: i64,
}

/// The loaded dataset: a DataFrame whose date column is a Polars `Date` and
/// whose count columns are `Int64`.
#[derive(Debug, Clone)]
pub struct CovidDataset {
    df: DataFrame,
    columns: ColumnNames,
}

impl CovidDataset {
    pub(crate) fn new(df: DataFrame, columns: ColumnNames) -> Self {
        Self { df, columns }
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub(crate) fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    /// Materialize every row, in source order.
    ///
    /// Null counts read as zero; a null state or date is an error.
    pub fn records(&self) -> Result<Vec<Record>, LoaderError> {
        let states = self.series(&self.columns.state)?.str()?;
        let dates = self.series(&self.columns.date)?.date()?;
        let cases = self.series(&self.columns.cases)?.i64()?;
        let deaths = self.series(&self.columns.deaths)?.i64()?;

        states
            .into_iter()
            .zip(dates.as_date_iter())
            .zip(cases.into_iter().zip(deaths.into_iter()))
            .enumerate()
            .map(|(row, ((state, date), (cases, deaths)))| {
                let state = state.ok_or_else(|| self.missing(&self.columns.state, row))?;
                let date = date.ok_or_else(|| self.missing(&self.columns.date, row))?;
                Ok(Record {
                    state: state.to_string(),
                    date,
                    cases: cases.unwrap_or(0),
                    deaths: deaths.unwrap_or(0),
                })
            })
            .collect()
    }

    fn series(&self, name: &str) -> Result<&Series, LoaderError> {
        Ok(self.df.column(name)?.as_materialized_series())
    }

    fn missing(&self, column: &str, row: usize) -> LoaderError {
        LoaderError::MissingValue {
            column: column.to_string(),
            row,
        }
    }
}

/// Reads the dataset with a fixed column layout and date format.
pub struct DataLoader {
    columns: ColumnNames,
    date_format: String,
}

impl DataLoader {
    pub fn new(columns: ColumnNames, date_format: impl Into<String>) -> Self {
        Self {
            columns,
            date_format: date_format.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.columns.clone(), config.date_format.clone())
    }

    /// Load a CSV file using Polars.
    ///
    /// The date column is parsed strictly: a cell that does not match the
    /// format, or an empty state or date cell, fails the whole load.
    pub fn load_csv(&self, file_path: impl AsRef<Path>) -> Result<CovidDataset, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let c = &self.columns;
        let date_options = StrptimeOptions {
            format: Some(self.date_format.as_str().into()),
            strict: true,
            exact: true,
            cache: true,
        };

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_separator(b',')
            .with_infer_schema_length(Some(10000))
            .finish()?
            .with_columns([
                col(c.state.as_str()).cast(DataType::String),
                col(c.date.as_str()).cast(DataType::String).str().to_date(date_options),
                col(c.cases.as_str()).cast(DataType::Int64),
                col(c.deaths.as_str()).cast(DataType::Int64),
            ])
            .collect()?;

        for name in [&c.state, &c.date] {
            if let Some(row) = first_null(&df, name)? {
                return Err(LoaderError::MissingValue {
                    column: name.clone(),
                    row,
                });
            }
        }

        info!(path = %file_path.display(), rows = df.height(), "dataset loaded");
        debug!("first rows:\n{}", df.head(Some(PREVIEW_ROWS)));

        Ok(CovidDataset::new(df, self.columns.clone()))
    }
}

fn first_null(df: &DataFrame, name: &str) -> Result<Option<usize>, LoaderError> {
    let series = df.column(name)?.as_materialized_series();
    if series.null_count() == 0 {
        return Ok(None);
    }
    Ok(series
        .is_null()
        .into_iter()
        .position(|is_null| is_null == Some(true)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    pub(crate) fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,covid_br_charts=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    pub(crate) const SAMPLE_CSV: &str = "\
estado,data,casos,mortes
SP,2022-01-01,100,3
RJ,2022-01-01,20,1
SP,2022-01-02,150,4
RJ,2022-01-02,30,0
MG,2022-01-01,40,2
SP,2022-01-03,90,5
";

    /// Writes `contents` to `name` inside a fresh temp dir.
    pub(crate) fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    pub(crate) fn load_sample(contents: &str) -> CovidDataset {
        init_test_logging();
        let (_dir, path) = write_temp("dataset.csv", contents);
        DataLoader::from_config(&Config::default())
            .load_csv(&path)
            .unwrap()
    }

    #[test]
    fn loads_every_row_with_parsed_dates() {
        let dataset = load_sample(SAMPLE_CSV);
        let records = dataset.records().unwrap();

        assert_eq!(dataset.height(), 6);
        assert_eq!(records.len(), 6);

        let expected_dates = [
            "2022-01-01",
            "2022-01-01",
            "2022-01-02",
            "2022-01-02",
            "2022-01-01",
            "2022-01-03",
        ];
        for (record, raw) in records.iter().zip(expected_dates) {
            assert_eq!(record.date, NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap());
        }
        assert_eq!(
            records[0],
            Record {
                state: "SP".to_string(),
                date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                cases: 100,
                deaths: 3,
            }
        );
    }

    #[test]
    fn custom_date_format() {
        let (_dir, path) = write_temp("br.csv", "estado,data,casos,mortes\nBA,31/01/2022,7,1\n");
        let loader = DataLoader::new(ColumnNames::default(), "%d/%m/%Y");
        let records = loader.load_csv(&path).unwrap().records().unwrap();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2022, 1, 31).unwrap());
    }

    #[test]
    fn empty_counts_read_as_zero() {
        let dataset = load_sample("estado,data,casos,mortes\nAC,2022-02-01,,\nAC,2022-02-02,5,1\n");
        let records = dataset.records().unwrap();
        assert_eq!((records[0].cases, records[0].deaths), (0, 0));
        assert_eq!(records[1].cases, 5);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::from_config(&Config::default())
            .load_csv(dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn unparseable_date_is_an_error() {
        let (_dir, path) = write_temp("bad.csv", "estado,data,casos,mortes\nSP,not-a-date,1,0\n");
        let result = DataLoader::from_config(&Config::default()).load_csv(&path);
        assert!(matches!(result, Err(LoaderError::CsvError(_))));
    }

    #[test]
    fn empty_date_fails_the_load() {
        init_test_logging();
        let (_dir, path) = write_temp(
            "gap.csv",
            "estado,data,casos,mortes\nSP,2022-01-01,100,3\nSP,,5,0\nRJ,2022-01-01,20,1\n",
        );
        let err = DataLoader::from_config(&Config::default())
            .load_csv(&path)
            .unwrap_err();
        match err {
            LoaderError::MissingValue { column, row } => {
                assert_eq!(column, "data");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_state_fails_the_load() {
        let (_dir, path) = write_temp(
            "nostate.csv",
            "estado,data,casos,mortes\nSP,2022-01-01,1,0\nRJ,2022-01-02,2,0\n,2022-01-03,5,0\n",
        );
        let err = DataLoader::from_config(&Config::default())
            .load_csv(&path)
            .unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { row: 2, .. }), "{err}");
    }

    #[test]
    fn missing_column_is_an_error() {
        let (_dir, path) = write_temp("cols.csv", "estado,data,casos\nSP,2022-01-01,1\n");
        let result = DataLoader::from_config(&Config::default()).load_csv(&path);
        assert!(matches!(result, Err(LoaderError::CsvError(_))));
    }
}
