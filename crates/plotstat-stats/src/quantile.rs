//! Order statistics for box plots
//!
//! Percentiles use linear interpolation between closest ranks: for a sorted
//! sample of n values the p-th percentile sits at index `p/100 * (n - 1)`,
//! interpolated between the two neighbouring values when that index is
//! fractional.
//!
//! Whiskers follow the Tukey convention: they reach the most extreme *actual*
//! data points inside `[q1 - 1.5 IQR, q3 + 1.5 IQR]`, and everything beyond
//! those fences is an outlier.

use serde::{Deserialize, Serialize};

/// Multiplier applied to the IQR to place the outlier fences
pub const TUKEY_FENCE: f64 = 1.5;

/// Sorted sample supporting percentile queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantiles {
    /// Finite values, ascending
    values: Vec<f64>,
    /// Number of non-finite inputs that were discarded
    missing: usize,
}

impl Quantiles {
    /// Build from unsorted data
    ///
    /// Non-finite values are discarded; the rest are sorted ascending.
    /// Time complexity: O(n log n)
    pub fn from_data(data: &[f64]) -> Self {
        let mut values: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - values.len();
        values.sort_by(f64::total_cmp);
        Self { values, missing }
    }

    /// Linear-interpolation percentile, `p` in `[0, 100]`
    ///
    /// Returns `None` for an empty sample or a `p` outside the range.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        percentile_of_sorted(&self.values, p)
    }

    /// First quartile, median, third quartile
    pub fn quartiles(&self) -> Option<(f64, f64, f64)> {
        Some((
            self.percentile(25.0)?,
            self.percentile(50.0)?,
            self.percentile(75.0)?,
        ))
    }

    /// Median (50th percentile)
    pub fn median(&self) -> Option<f64> {
        self.percentile(50.0)
    }

    /// Interquartile range
    pub fn iqr(&self) -> Option<f64> {
        let (q1, _, q3) = self.quartiles()?;
        Some(q3 - q1)
    }

    /// Full box plot statistics
    pub fn stats(&self) -> Option<QuantileStats> {
        QuantileStats::from_sorted(&self.values)
    }

    /// Sorted finite values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of finite values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no finite values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of discarded non-finite inputs
    pub fn missing(&self) -> usize {
        self.missing
    }
}

/// Percentile of an ascending slice
///
/// The caller must pass sorted data; `Quantiles` does this for you.
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let index = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = index.floor() as usize;
    let hi = index.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = index - lo as f64;
    Some(sorted[lo] * (1.0 - weight) + sorted[hi] * weight)
}

/// Box plot statistics derived from one sorted sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileStats {
    /// Number of values
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Interquartile range (q3 - q1)
    pub iqr: f64,
    /// q1 - 1.5 IQR
    pub lower_fence: f64,
    /// q3 + 1.5 IQR
    pub upper_fence: f64,
    /// Smallest value at or above the lower fence
    pub lower_whisker: f64,
    /// Largest value at or below the upper fence
    pub upper_whisker: f64,
    /// Values strictly outside the fences, ascending
    pub outliers: Vec<f64>,
}

impl QuantileStats {
    /// Compute statistics from unsorted data
    ///
    /// Non-finite values are ignored. Returns `None` when no finite values
    /// remain.
    pub fn from_data(data: &[f64]) -> Option<Self> {
        Quantiles::from_data(data).stats()
    }

    fn from_sorted(sorted: &[f64]) -> Option<Self> {
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let q1 = percentile_of_sorted(sorted, 25.0)?;
        let median = percentile_of_sorted(sorted, 50.0)?;
        let q3 = percentile_of_sorted(sorted, 75.0)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - TUKEY_FENCE * iqr;
        let upper_fence = q3 + TUKEY_FENCE * iqr;

        // q1 and q3 lie within [min, max], so both searches always find a value
        let lower_whisker = sorted.iter().copied().find(|&v| v >= lower_fence)?;
        let upper_whisker = sorted.iter().rev().copied().find(|&v| v <= upper_fence)?;

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min,
            max,
            q1,
            median,
            q3,
            iqr,
            lower_fence,
            upper_fence,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    /// Check if a value lies strictly outside the fences
    pub fn is_outlier(&self, x: f64) -> bool {
        x < self.lower_fence || x > self.upper_fence
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-10, "{} != {}", a, b);
    }

    #[test]
    fn test_quartiles_with_outlier() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let stats = QuantileStats::from_data(&data).unwrap();

        // q3 sits at rank 6.75, between 7 and 8
        assert_close(stats.q1, 3.25);
        assert_close(stats.median, 5.5);
        assert_close(stats.q3, 7.75);
        assert_close(stats.iqr, 4.5);
        assert_close(stats.upper_fence, 14.5);
        assert_close(stats.lower_fence, -3.5);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.upper_whisker, 9.0);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 100.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let data = vec![9.0, 1.0, 100.0, 5.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0];
        let stats = QuantileStats::from_data(&data).unwrap();
        assert_close(stats.median, 5.5);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_single_value() {
        let q = Quantiles::from_data(&[42.0]);
        assert_eq!(q.percentile(0.0), Some(42.0));
        assert_eq!(q.percentile(37.0), Some(42.0));
        assert_eq!(q.percentile(100.0), Some(42.0));

        let stats = q.stats().unwrap();
        assert_eq!(stats.iqr, 0.0);
        assert_eq!(stats.lower_whisker, 42.0);
        assert_eq!(stats.upper_whisker, 42.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_percentile_out_of_range() {
        let q = Quantiles::from_data(&[1.0, 2.0]);
        assert_eq!(q.percentile(-1.0), None);
        assert_eq!(q.percentile(100.5), None);
        assert_eq!(q.percentile(f64::NAN), None);
    }

    #[test]
    fn test_empty() {
        let q = Quantiles::from_data(&[]);
        assert!(q.is_empty());
        assert!(q.percentile(50.0).is_none());
        assert!(q.stats().is_none());
    }

    #[test]
    fn test_nan_discarded() {
        let q = Quantiles::from_data(&[1.0, f64::NAN, 3.0, f64::INFINITY]);
        assert_eq!(q.len(), 2);
        assert_eq!(q.missing(), 2);
        assert_eq!(q.median(), Some(2.0));
    }

    #[test]
    fn test_low_outliers() {
        let data = vec![-500.0, 10.0, 11.0, 12.0, 13.0, 14.0];
        let stats = QuantileStats::from_data(&data).unwrap();
        assert_eq!(stats.outliers, vec![-500.0]);
        assert_eq!(stats.lower_whisker, 10.0);
        assert!(stats.is_outlier(-500.0));
        assert!(!stats.is_outlier(12.0));
    }
}
