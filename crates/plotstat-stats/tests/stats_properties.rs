//! Property-based tests for quantiles, histograms and aggregation

use plotstat_records::{CategoryDomain, Observation};
use plotstat_stats::{
    aggregate, percentile_of_sorted, truncate_upper_tail, Histogram, QuantileStats, Quantiles,
    Reducer,
};
use proptest::prelude::*;
use rstest::rstest;

// Interpolation between equal neighbours may round by an ulp
const EPS: f64 = 1e-6;

fn finite_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..200)
}

proptest! {
    #[test]
    fn test_percentile_extremes_are_min_and_max(data in finite_values()) {
        let q = Quantiles::from_data(&data);
        let values = q.values();
        prop_assert_eq!(q.percentile(0.0), values.first().copied());
        prop_assert_eq!(q.percentile(100.0), values.last().copied());
    }

    #[test]
    fn test_quartiles_ordered(data in finite_values()) {
        let stats = QuantileStats::from_data(&data).unwrap();
        prop_assert!(stats.q1 <= stats.median + EPS);
        prop_assert!(stats.median <= stats.q3 + EPS);
        prop_assert!(stats.min <= stats.lower_whisker);
        prop_assert!(stats.upper_whisker <= stats.max);
    }

    #[test]
    fn test_outliers_outside_fences_and_whiskers(data in finite_values()) {
        let stats = QuantileStats::from_data(&data).unwrap();
        for &o in &stats.outliers {
            prop_assert!(o < stats.lower_fence || o > stats.upper_fence);
            prop_assert!(o < stats.lower_whisker || o > stats.upper_whisker);
        }
        let inside = data
            .iter()
            .filter(|&&v| v >= stats.lower_fence && v <= stats.upper_fence)
            .count();
        prop_assert_eq!(inside + stats.outliers.len(), data.len());
    }

    #[test]
    fn test_percentile_monotonic(data in finite_values(), a in 0.0..=100.0f64, b in 0.0..=100.0f64) {
        let q = Quantiles::from_data(&data);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(q.percentile(lo).unwrap() <= q.percentile(hi).unwrap() + EPS);
    }

    #[test]
    fn test_histogram_counts_every_value(data in finite_values(), k in 1usize..40) {
        let hist = Histogram::equal_width(&data, k).unwrap();
        let sum: usize = hist.bins().iter().map(|b| b.count).sum();
        prop_assert_eq!(sum, data.len());
        prop_assert_eq!(hist.total(), data.len());
        prop_assert_eq!(hist.len(), k);
    }

    #[test]
    fn test_bin_at_names_the_counting_bin(
        lo in -100.0..100.0f64,
        span in 0.01..50.0f64,
        k in 1usize..40,
        steps in 0usize..=200,
    ) {
        let domain = (lo, lo + span);
        let value = lo + span * steps as f64 / 200.0;
        let hist = Histogram::equal_width_over(&[value], domain, k).unwrap();
        let counted = hist.bins().iter().position(|b| b.count == 1);
        prop_assert_eq!(hist.bin_at(value), counted);
    }

    #[test]
    fn test_threshold_bin_at_names_the_counting_bin(
        value in 0.0..=10.0f64,
        thresholds in prop::collection::vec(0.0..10.0f64, 0..8),
    ) {
        let hist = Histogram::with_thresholds(&[value], (0.0, 10.0), &thresholds).unwrap();
        let counted = hist.bins().iter().position(|b| b.count == 1);
        prop_assert!(counted.is_some());
        prop_assert_eq!(hist.bin_at(value), counted);
    }

    #[test]
    fn test_histogram_after_truncation(data in finite_values(), k in 1usize..40) {
        let kept = truncate_upper_tail(&data, 0.95);
        match Histogram::equal_width(&kept, k) {
            Some(hist) => {
                let sum: usize = hist.bins().iter().map(|b| b.count).sum();
                prop_assert_eq!(sum, kept.len());
            }
            None => prop_assert!(kept.is_empty()),
        }
    }

    #[test]
    fn test_counts_sum_to_observations(
        pairs in prop::collection::vec((0usize..12, -50.0..50.0f64), 0..100)
    ) {
        let domain = CategoryDomain::months();
        let observations: Vec<_> = pairs.iter().map(|&(c, v)| Observation::new(c, v)).collect();
        let counts = aggregate(&observations, &domain, Reducer::Count);
        let total: f64 = counts.iter().map(|r| r.value).sum();
        prop_assert_eq!(total as usize, observations.len());
        prop_assert!(counts.windows(2).all(|w| w[0].category < w[1].category));
    }
}

#[rstest]
#[case(0.0, 1.0)]
#[case(25.0, 3.25)]
#[case(50.0, 5.5)]
#[case(75.0, 7.75)]
#[case(90.0, 18.1)]
#[case(100.0, 100.0)]
fn test_known_percentiles(#[case] p: f64, #[case] expected: f64) {
    let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
    let actual = percentile_of_sorted(&sorted, p).unwrap();
    assert!((actual - expected).abs() < 1e-9, "p{}: {} != {}", p, actual, expected);
}

#[rstest]
#[case(Reducer::Mean, vec![("Jan", 15.0), ("Mar", 5.0)])]
#[case(Reducer::Sum, vec![("Jan", 30.0), ("Mar", 5.0)])]
#[case(Reducer::Count, vec![("Jan", 2.0), ("Mar", 1.0)])]
fn test_reducers_on_sparse_months(#[case] reducer: Reducer, #[case] expected: Vec<(&str, f64)>) {
    let domain = CategoryDomain::new(["Jan", "Feb", "Mar"]);
    let observations = vec![
        Observation::new(0, 10.0),
        Observation::new(0, 20.0),
        Observation::new(2, 5.0),
    ];
    let results: Vec<_> = aggregate(&observations, &domain, reducer)
        .into_iter()
        .map(|r| (r.label, r.value))
        .collect();
    let expected: Vec<_> = expected.into_iter().map(|(l, v)| (l.to_string(), v)).collect();
    assert_eq!(results, expected);
}
