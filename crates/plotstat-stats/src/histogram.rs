//! Histogram binning
//!
//! Two ways to partition a range:
//!
//! - **Equal width**: `k` bins of width `(max - min) / k` spanning the data
//! - **Thresholds**: bins split at caller-supplied boundaries (typically nice
//!   axis ticks) inside a fixed domain
//!
//! Every bin is half-open `[lower, upper)` except the last, which is closed
//! so the maximum is counted. Tail truncation is a separate step,
//! [`truncate_upper_tail`], applied before binning.

use serde::{Deserialize, Serialize};

/// A counted interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Inclusive lower bound
    pub lower: f64,
    /// Upper bound (exclusive, except for the last bin)
    pub upper: f64,
    /// Number of values in the bin
    pub count: usize,
}

impl Bin {
    /// Bin width
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the bin
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// How a value is assigned to a bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
enum BinRule {
    /// `floor((v - min) / width)`
    EqualWidth { min: f64, width: f64 },
    /// First upper edge strictly greater than the value
    Edges,
}

/// A frozen set of bins over one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<Bin>,
    rule: BinRule,
    /// Values counted into some bin
    total: usize,
}

impl Histogram {
    /// Equal-width binning over the data's own `[min, max]`
    ///
    /// Non-finite values are ignored. Returns `None` for `k == 0` or when no
    /// finite values remain. If every value is equal the bins have zero
    /// width and all values land in the first.
    pub fn equal_width(values: &[f64], k: usize) -> Option<Self> {
        let domain = finite_extent(values)?;
        Self::equal_width_over(values, domain, k)
    }

    /// Equal-width binning over an explicit `[lo, hi]`
    ///
    /// Values outside the domain are not counted. Returns `None` for
    /// `k == 0` or an inverted or non-finite domain.
    pub fn equal_width_over(values: &[f64], domain: (f64, f64), k: usize) -> Option<Self> {
        let (min, max) = domain;
        if k == 0 || !(min.is_finite() && max.is_finite()) || max < min {
            return None;
        }
        let width = (max - min) / k as f64;

        let mut bins: Vec<Bin> = (0..k)
            .map(|i| Bin {
                lower: min + i as f64 * width,
                upper: min + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();
        // Pin the closed end exactly to max
        if let Some(last) = bins.last_mut() {
            last.upper = max;
        }

        let hist = Self::counted(bins, BinRule::EqualWidth { min, width }, values);
        tracing::debug!(bins = k, width, total = hist.total, "built equal-width histogram");
        Some(hist)
    }

    /// Threshold binning inside a fixed domain
    ///
    /// Bins span `[lo, t0), [t0, t1), …, [tn, hi]`. Thresholds outside the
    /// open interval `(lo, hi)` are ignored, as are values outside the domain.
    /// Returns `None` if the domain is empty or inverted.
    pub fn with_thresholds(values: &[f64], domain: (f64, f64), thresholds: &[f64]) -> Option<Self> {
        let (lo, hi) = domain;
        if !(lo.is_finite() && hi.is_finite()) || hi < lo {
            return None;
        }

        let mut cuts: Vec<f64> = thresholds
            .iter()
            .copied()
            .filter(|&t| t > lo && t < hi)
            .collect();
        cuts.sort_by(f64::total_cmp);
        cuts.dedup();

        let mut edges = Vec::with_capacity(cuts.len() + 2);
        edges.push(lo);
        edges.extend(cuts);
        edges.push(hi);

        let bins: Vec<Bin> = edges
            .windows(2)
            .map(|w| Bin {
                lower: w[0],
                upper: w[1],
                count: 0,
            })
            .collect();

        let hist = Self::counted(bins, BinRule::Edges, values);
        tracing::debug!(bins = hist.len(), total = hist.total, "built threshold histogram");
        Some(hist)
    }

    fn counted(bins: Vec<Bin>, rule: BinRule, values: &[f64]) -> Self {
        let mut hist = Self {
            bins,
            rule,
            total: 0,
        };
        for &v in values {
            if let Some(index) = hist.bin_at(v) {
                hist.bins[index].count += 1;
                hist.total += 1;
            }
        }
        hist
    }

    /// The bins in ascending order
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if there are no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of values counted across all bins
    pub fn total(&self) -> usize {
        self.total
    }

    /// Largest bin count
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Share of all counted values in bin `index`, in percent
    pub fn percentage(&self, index: usize) -> Option<f64> {
        let bin = self.bins.get(index)?;
        if self.total == 0 {
            return Some(0.0);
        }
        Some(bin.count as f64 / self.total as f64 * 100.0)
    }

    /// Index of the bin a value falls into
    ///
    /// This is the rule counting uses, so a value is always reported in the
    /// bin that counted it. The maximum belongs to the last bin.
    pub fn bin_at(&self, value: f64) -> Option<usize> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        if !(first.lower..=last.upper).contains(&value) {
            return None;
        }
        let index = match self.rule {
            BinRule::EqualWidth { min, width } if width > 0.0 => {
                ((value - min) / width).floor() as usize
            }
            BinRule::EqualWidth { .. } => 0,
            BinRule::Edges => self.bins.partition_point(|b| b.upper <= value),
        };
        Some(index.min(self.bins.len() - 1))
    }
}

/// Drop the top tail of a sample
///
/// Sorts ascending and keeps the first `floor(n * keep_fraction)` values.
/// Non-finite values are discarded. `keep_fraction` is clamped to `[0, 1]`.
pub fn truncate_upper_tail(values: &[f64], keep_fraction: f64) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let fraction = if keep_fraction.is_nan() {
        1.0
    } else {
        keep_fraction.clamp(0.0, 1.0)
    };
    let keep = (sorted.len() as f64 * fraction).floor() as usize;
    sorted.truncate(keep);
    sorted
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
