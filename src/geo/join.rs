//! Joins state totals to boundaries by state code.

use super::boundary::{Boundary, Point};
use crate::data::StateTotals;
use std::collections::{BTreeSet, HashMap};

/// A boundary with the totals of its state.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRegion {
    pub code: String,
    pub cases: i64,
    pub deaths: i64,
    pub rings: Vec<Vec<Point>>,
}

#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub regions: Vec<MapRegion>,
    /// States with data but no boundary, sorted.
    pub unmatched_states: Vec<String>,
    /// Boundary codes with no data, sorted.
    pub unmatched_boundaries: Vec<String>,
}

impl JoinOutcome {
    pub fn dropped(&self) -> usize {
        self.unmatched_states.len() + self.unmatched_boundaries.len()
    }

    /// Smallest and largest case total over the joined regions.
    pub fn case_range(&self) -> Option<(i64, i64)> {
        let min = self.regions.iter().map(|r| r.cases).min()?;
        let max = self.regions.iter().map(|r| r.cases).max()?;
        Some((min, max))
    }
}

/// Inner join: keeps boundaries whose code has totals, in boundary order.
pub fn join_totals(boundaries: Vec<Boundary>, totals: &[StateTotals]) -> JoinOutcome {
    let by_state: HashMap<&str, &StateTotals> =
        totals.iter().map(|t| (t.state.as_str(), t)).collect();

    let mut matched: BTreeSet<String> = BTreeSet::new();
    let mut unmatched_boundaries: BTreeSet<String> = BTreeSet::new();
    let mut regions = Vec::new();

    for boundary in boundaries {
        match by_state.get(boundary.code.as_str()) {
            Some(t) => {
                matched.insert(boundary.code.clone());
                regions.push(MapRegion {
                    code: boundary.code,
                    cases: t.cases,
                    deaths: t.deaths,
                    rings: boundary.rings,
                });
            }
            None => {
                unmatched_boundaries.insert(boundary.code);
            }
        }
    }

    let unmatched_states: BTreeSet<String> = totals
        .iter()
        .filter(|t| !matched.contains(&t.state))
        .map(|t| t.state.clone())
        .collect();

    JoinOutcome {
        regions,
        unmatched_states: unmatched_states.into_iter().collect(),
        unmatched_boundaries: unmatched_boundaries.into_iter().collect(),
    }
}
