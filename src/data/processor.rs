//! Data Processor Module
//! Per-state filtering and aggregation over the loaded dataset.

use crate::data::loader::{CovidDataset, LoaderError};
use chrono::{Days, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Loader(#[from] LoaderError),
}

/// Totals for one state over the whole period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTotals {
    pub state: String,
    pub cases: i64,
    pub deaths: i64,
}

/// Daily values of one state, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalSeries {
    pub state: String,
    pub dates: Vec<NaiveDate>,
    pub cases: Vec<i64>,
    pub deaths: Vec<i64>,
}

impl TemporalSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Half-open date span covering every point. Never empty: a single day
    /// (or no data at all) still spans one day.
    pub fn date_span(&self) -> (NaiveDate, NaiveDate) {
        let first = self.dates.iter().min().copied().unwrap_or_default();
        let last = self.dates.iter().max().copied().unwrap_or(first);
        let end = last.checked_add_days(Days::new(1)).unwrap_or(last);
        (first, end)
    }

    /// Largest value of either series, or 0.
    pub fn max_value(&self) -> i64 {
        self.cases
            .iter()
            .chain(&self.deaths)
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn min_value(&self) -> i64 {
        self.cases
            .iter()
            .chain(&self.deaths)
            .copied()
            .min()
            .unwrap_or(0)
    }
}

/// Stateless transforms from the dataset to the views' inputs.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows of one state, in source order.
    pub fn filter_state(
        dataset: &CovidDataset,
        state: &str,
    ) -> Result<CovidDataset, ProcessorError> {
        let columns = dataset.columns();
        let filtered = dataset
            .lazy()
            .filter(col(columns.state.as_str()).eq(lit(state)))
            .collect()?;
        Ok(CovidDataset::new(filtered, columns.clone()))
    }

    /// Case and death series of one state. An unknown state gives an empty
    /// series.
    pub fn series_for_state(
        dataset: &CovidDataset,
        state: &str,
    ) -> Result<TemporalSeries, ProcessorError> {
        let records = Self::filter_state(dataset, state)?.records()?;
        let mut series = TemporalSeries {
            state: state.to_string(),
            ..TemporalSeries::default()
        };
        for record in records {
            series.dates.push(record.date);
            series.cases.push(record.cases);
            series.deaths.push(record.deaths);
        }
        Ok(series)
    }

    /// Sum cases and deaths per state.
    ///
    /// Sorted ascending by total cases; equal totals are ordered by state code.
    /// Rows with a null state are left out.
    pub fn aggregate_by_state(dataset: &CovidDataset) -> Result<Vec<StateTotals>, ProcessorError> {
        let c = dataset.columns();
        let df = dataset
            .lazy()
            .filter(col(c.state.as_str()).is_not_null())
            .group_by([col(c.state.as_str())])
            .agg([col(c.cases.as_str()).sum(), col(c.deaths.as_str()).sum()])
            .sort_by_exprs(
                [col(c.cases.as_str()), col(c.state.as_str())],
                SortMultipleOptions::default(),
            )
            .collect()?;

        let states = df.column(c.state.as_str())?.as_materialized_series().str()?;
        let cases = df.column(c.cases.as_str())?.as_materialized_series().i64()?;
        let deaths = df.column(c.deaths.as_str())?.as_materialized_series().i64()?;

        let totals = states
            .into_iter()
            .zip(cases.into_iter().zip(deaths.into_iter()))
            .filter_map(|(state, (cases, deaths))| {
                Some(StateTotals {
                    state: state?.to_string(),
                    cases: cases.unwrap_or(0),
                    deaths: deaths.unwrap_or(0),
                })
            })
            .collect();

        Ok(totals)
    }
}
