//! Category domains
//!
//! A domain is the ordered, fixed set of labels that observations may be
//! grouped by (month names, hours of the day, a capped list of cities).
//! Domain order is display order.

use crate::row::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Short month labels in calendar order
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// An ordered, fixed set of category labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryDomain {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategoryDomain {
    /// Create a domain from labels in display order
    ///
    /// Duplicate labels keep their first position.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();
        for label in labels {
            let label = label.into();
            if !index.contains_key(&label) {
                index.insert(label.clone(), ordered.len());
                ordered.push(label);
            }
        }
        Self {
            labels: ordered,
            index,
        }
    }

    /// The twelve calendar months, `Jan` through `Dec`
    pub fn months() -> Self {
        Self::new(MONTH_NAMES)
    }

    /// Hours of the day labelled `"0"` through `"23"`
    pub fn hours() -> Self {
        Self::new((0..24).map(|h| h.to_string()))
    }

    /// Build a domain from the distinct values seen in a field
    ///
    /// Values are sorted lexicographically and capped to the first `limit`
    /// entries, so a chart can show e.g. the first eight cities.
    pub fn from_distinct<'a, I>(values: I, limit: Option<usize>) -> Self
    where
        I: IntoIterator<Item = FieldValue<'a>>,
    {
        let distinct: BTreeSet<String> = values.into_iter().filter_map(|v| v.as_label()).collect();
        let limit = limit.unwrap_or(usize::MAX);
        Self::new(distinct.into_iter().take(limit))
    }

    /// Position of a label
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label at a position
    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(|s| s.as_str())
    }

    /// All labels in display order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the domain has no categories
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<Vec<String>> for CategoryDomain {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<CategoryDomain> for Vec<String> {
    fn from(domain: CategoryDomain) -> Self {
        domain.labels
    }
}

/// How a raw field value is resolved to a category position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRule {
    /// The field holds the label itself
    #[default]
    Label,
    /// The field holds an integer position counted from `base`
    ///
    /// `Date.Month = 1` with base 1 resolves to the first label.
    Ordinal { base: i64 },
}

impl CategoryRule {
    /// Resolve a field value against a domain
    pub fn resolve(&self, domain: &CategoryDomain, value: &FieldValue<'_>) -> Option<usize> {
        match self {
            CategoryRule::Label => domain.position(&value.as_label()?),
            CategoryRule::Ordinal { base } => {
                let position = value.as_integer()?.checked_sub(*base)?;
                let position = usize::try_from(position).ok()?;
                (position < domain.len()).then_some(position)
            }
        }
    }
}
