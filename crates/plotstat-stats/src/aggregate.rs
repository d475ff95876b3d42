//! Grouped aggregation
//!
//! Reduces observations to one value per category. Output follows the
//! domain's display order, and categories with no observations are left out
//! rather than reported as zero.

use plotstat_records::{CategoryDomain, CellObservation, Observation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reduction applied to each category group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    /// Arithmetic mean (sum / count)
    Mean,
    /// Floating-point sum
    Sum,
    /// Number of observations
    Count,
    /// Smallest value
    Min,
    /// Largest value
    Max,
}

impl Reducer {
    /// Lowercase name, as used in chart configuration
    pub fn name(&self) -> &'static str {
        match self {
            Reducer::Mean => "mean",
            Reducer::Sum => "sum",
            Reducer::Count => "count",
            Reducer::Min => "min",
            Reducer::Max => "max",
        }
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized reducer names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown reducer: {0}")]
pub struct UnknownReducer(pub String);

impl FromStr for Reducer {
    type Err = UnknownReducer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" | "avg" | "average" => Ok(Reducer::Mean),
            "sum" | "total" => Ok(Reducer::Sum),
            "count" => Ok(Reducer::Count),
            "min" => Ok(Reducer::Min),
            "max" => Ok(Reducer::Max),
            _ => Err(UnknownReducer(s.to_string())),
        }
    }
}

/// Running state for one group
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn finalize(&self, reducer: Reducer) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(match reducer {
            Reducer::Mean => self.sum / self.count as f64,
            Reducer::Sum => self.sum,
            Reducer::Count => self.count as f64,
            Reducer::Min => self.min,
            Reducer::Max => self.max,
        })
    }
}

/// One reduced value for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Position of the category in its domain
    pub category: usize,
    /// Category label
    pub label: String,
    /// Reduced value
    pub value: f64,
    /// Number of contributing observations
    pub count: usize,
}

/// One reduced value for a (row, column) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellAggregate {
    pub row: usize,
    pub row_label: String,
    pub column: usize,
    pub column_label: String,
    pub value: f64,
    pub count: usize,
}

/// Group observations by category and reduce each group
///
/// Observations whose category lies outside the domain are ignored.
pub fn aggregate(
    observations: &[Observation],
    domain: &CategoryDomain,
    reducer: Reducer,
) -> Vec<AggregateResult> {
    let mut groups = vec![Accumulator::default(); domain.len()];
    for obs in observations {
        if let Some(acc) = groups.get_mut(obs.category) {
            acc.add(obs.value);
        }
    }

    let results: Vec<AggregateResult> = groups
        .iter()
        .enumerate()
        .filter_map(|(category, acc)| {
            Some(AggregateResult {
                category,
                label: domain.label(category)?.to_string(),
                value: acc.finalize(reducer)?,
                count: acc.count,
            })
        })
        .collect();

    tracing::debug!(
        %reducer,
        observations = observations.len(),
        groups = results.len(),
        "aggregated observations"
    );

    results
}

/// Group cell observations by (row, column) and reduce each cell
///
/// Output is column-major: for each column category in order, every row
/// category in order. Empty cells are left out.
pub fn aggregate_cells(
    observations: &[CellObservation],
    rows: &CategoryDomain,
    columns: &CategoryDomain,
    reducer: Reducer,
) -> Vec<CellAggregate> {
    let n_rows = rows.len();
    let mut cells = vec![Accumulator::default(); n_rows * columns.len()];
    for obs in observations {
        if obs.row < n_rows && obs.column < columns.len() {
            cells[obs.column * n_rows + obs.row].add(obs.value);
        }
    }

    let mut results = Vec::new();
    for (column, column_label) in columns.labels().iter().enumerate() {
        for (row, row_label) in rows.labels().iter().enumerate() {
            let acc = &cells[column * n_rows + row];
            if let Some(value) = acc.finalize(reducer) {
                results.push(CellAggregate {
                    row,
                    row_label: row_label.clone(),
                    column,
                    column_label: column_label.clone(),
                    value,
                    count: acc.count,
                });
            }
        }
    }

    tracing::debug!(
        %reducer,
        observations = observations.len(),
        cells = results.len(),
        "aggregated cells"
    );

    results
}
