//! Record filtering
//!
//! Turns raw rows into typed observations. Rows whose category is not in
//! the domain, or whose value is not a finite number, are dropped. Dropping
//! is not an error: messy exports are the normal case, so the filter only
//! reports how many rows it discarded and why.

use crate::category::{CategoryDomain, CategoryRule};
use crate::row::Row;
use serde::{Deserialize, Serialize};

/// A validated numeric reading tagged by its category position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Position of the category in its domain
    pub category: usize,
    /// The reading
    pub value: f64,
}

impl Observation {
    pub fn new(category: usize, value: f64) -> Self {
        Self { category, value }
    }
}

/// A validated reading tagged by two categories (row × column)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellObservation {
    /// Position in the row domain
    pub row: usize,
    /// Position in the column domain
    pub column: usize,
    /// The reading
    pub value: f64,
}

/// Counts of rows discarded by a filter pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCounts {
    /// Rows whose category field was missing or not in the domain
    pub unknown_category: usize,
    /// Rows whose value field was missing or not a finite number
    pub invalid_value: usize,
}

impl DropCounts {
    /// Total rows dropped
    pub fn total(&self) -> usize {
        self.unknown_category + self.invalid_value
    }
}

/// Result of a filter pass: kept items plus an informational drop report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome<T> {
    /// Kept items in input order
    pub kept: Vec<T>,
    /// Rows discarded
    pub dropped: DropCounts,
}

impl<T> FilterOutcome<T> {
    /// Number of rows inspected
    pub fn rows_seen(&self) -> usize {
        self.kept.len() + self.dropped.total()
    }
}

/// Extraction rule for one categorical field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryField {
    /// Field name in the row
    pub name: String,
    /// Recognized categories in display order
    pub domain: CategoryDomain,
    /// How the field value maps to a category
    #[serde(default)]
    pub rule: CategoryRule,
}

impl CategoryField {
    pub fn new(name: impl Into<String>, domain: CategoryDomain) -> Self {
        Self {
            name: name.into(),
            domain,
            rule: CategoryRule::Label,
        }
    }

    /// Set the resolution rule
    pub fn with_rule(mut self, rule: CategoryRule) -> Self {
        self.rule = rule;
        self
    }

    fn resolve<R: Row + ?Sized>(&self, row: &R) -> Option<usize> {
        let value = row.field(&self.name)?;
        self.rule.resolve(&self.domain, &value)
    }

    /// Category positions of every row that resolves, for charts that only
    /// count occurrences
    pub fn filter<R: Row>(&self, rows: &[R]) -> FilterOutcome<usize> {
        let mut kept = Vec::with_capacity(rows.len());
        let mut dropped = DropCounts::default();

        for row in rows {
            match self.resolve(row) {
                Some(position) => kept.push(position),
                None => dropped.unknown_category += 1,
            }
        }

        tracing::debug!(
            field = %self.name,
            kept = kept.len(),
            dropped = dropped.total(),
            "filtered categories"
        );

        FilterOutcome { kept, dropped }
    }
}

/// Filter rows into observations
///
/// ```ignore
/// let filter = RecordFilter::new(
///     CategoryField::new("Date.Month", CategoryDomain::months())
///         .with_rule(CategoryRule::Ordinal { base: 1 }),
///     "Data.Temperature.Avg Temp",
/// );
/// let observations = filter.observations(&rows);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Category extraction rule
    pub category: CategoryField,
    /// Name of the numeric field
    pub value_field: String,
}

impl RecordFilter {
    pub fn new(category: CategoryField, value_field: impl Into<String>) -> Self {
        Self {
            category,
            value_field: value_field.into(),
        }
    }

    /// The category domain observations are tagged against
    pub fn domain(&self) -> &CategoryDomain {
        &self.category.domain
    }

    /// Filter rows, keeping only the observations
    pub fn observations<R: Row>(&self, rows: &[R]) -> Vec<Observation> {
        self.filter(rows).kept
    }

    /// Filter rows and report how many were dropped
    pub fn filter<R: Row>(&self, rows: &[R]) -> FilterOutcome<Observation> {
        let mut kept = Vec::with_capacity(rows.len());
        let mut dropped = DropCounts::default();

        for row in rows {
            let Some(category) = self.category.resolve(row) else {
                dropped.unknown_category += 1;
                continue;
            };
            let Some(value) = finite_field(row, &self.value_field) else {
                dropped.invalid_value += 1;
                continue;
            };
            kept.push(Observation { category, value });
        }

        tracing::debug!(
            field = %self.value_field,
            kept = kept.len(),
            unknown_category = dropped.unknown_category,
            invalid_value = dropped.invalid_value,
            "filtered records"
        );

        FilterOutcome { kept, dropped }
    }
}

/// Filter rows into two-category observations (row × column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellFilter {
    /// Row category rule
    pub row: CategoryField,
    /// Column category rule
    pub column: CategoryField,
    /// Name of the numeric field
    pub value_field: String,
}

impl CellFilter {
    pub fn new(row: CategoryField, column: CategoryField, value_field: impl Into<String>) -> Self {
        Self {
            row,
            column,
            value_field: value_field.into(),
        }
    }

    /// Filter rows and report how many were dropped
    pub fn filter<R: Row>(&self, rows: &[R]) -> FilterOutcome<CellObservation> {
        let mut kept = Vec::with_capacity(rows.len());
        let mut dropped = DropCounts::default();

        for row in rows {
            let (Some(r), Some(c)) = (self.row.resolve(row), self.column.resolve(row)) else {
                dropped.unknown_category += 1;
                continue;
            };
            let Some(value) = finite_field(row, &self.value_field) else {
                dropped.invalid_value += 1;
                continue;
            };
            kept.push(CellObservation {
                row: r,
                column: c,
                value,
            });
        }

        tracing::debug!(
            field = %self.value_field,
            kept = kept.len(),
            dropped = dropped.total(),
            "filtered cell records"
        );

        FilterOutcome { kept, dropped }
    }
}

/// Extract the finite values of one field, dropping everything else
pub fn filter_values<R: Row>(rows: &[R], field: &str) -> FilterOutcome<f64> {
    let mut kept = Vec::with_capacity(rows.len());
    let mut dropped = DropCounts::default();

    for row in rows {
        match finite_field(row, field) {
            Some(value) => kept.push(value),
            None => dropped.invalid_value += 1,
        }
    }

    tracing::debug!(field, kept = kept.len(), dropped = dropped.total(), "filtered values");

    FilterOutcome { kept, dropped }
}

/// Extract `(x, y)` pairs where both fields are finite numbers
pub fn filter_pairs<R: Row>(rows: &[R], x_field: &str, y_field: &str) -> FilterOutcome<(f64, f64)> {
    let mut kept = Vec::with_capacity(rows.len());
    let mut dropped = DropCounts::default();

    for row in rows {
        match (finite_field(row, x_field), finite_field(row, y_field)) {
            (Some(x), Some(y)) => kept.push((x, y)),
            _ => dropped.invalid_value += 1,
        }
    }

    tracing::debug!(
        x_field,
        y_field,
        kept = kept.len(),
        dropped = dropped.total(),
        "filtered pairs"
    );

    FilterOutcome { kept, dropped }
}

fn finite_field<R: Row + ?Sized>(row: &R, name: &str) -> Option<f64> {
    row.field(name)?.as_finite()
}
