//! Nice tick values
//!
//! Tick spacing is rounded to 1, 2 or 5 times a power of ten so axis labels
//! and histogram thresholds fall on round numbers.

/// Round a step of roughly `range / count` to 1, 2, 5 or 10 × 10^k
pub fn nice_step(range: f64, count: usize) -> f64 {
    if !(range.is_finite() && range > 0.0) || count == 0 {
        return 0.0;
    }
    let rough_step = range / count as f64;
    let magnitude = power_of_ten(rough_step.log10().floor() as i32);
    let residual = rough_step / magnitude;

    if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

/// Roughly `count` evenly spaced round values inside `[lo, hi]`
///
/// Ticks are computed as integer multiples of the step so they do not
/// accumulate rounding error (0.3 rather than 0.30000000000000004).
pub fn nice_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let step = nice_step(hi - lo, count);
    if step == 0.0 {
        return if lo == hi && lo.is_finite() { vec![lo] } else { vec![] };
    }

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| multiple_of_step(k, step)).collect()
}

fn multiple_of_step(k: i64, step: f64) -> f64 {
    if step < 1.0 {
        // Divide by the integral inverse to keep decimal steps exact
        k as f64 / (1.0 / step).round()
    } else {
        k as f64 * step
    }
}

/// Powers of ten inside `[lo, hi]`
///
/// Empty unless both bounds are positive.
pub fn log_ticks(lo: f64, hi: f64) -> Vec<f64> {
    if !(lo > 0.0 && hi > 0.0 && lo.is_finite() && hi.is_finite()) {
        return vec![];
    }
    let start_decade = lo.log10().floor() as i32;
    let end_decade = hi.log10().ceil() as i32;

    (start_decade..=end_decade)
        .map(power_of_ten)
        .filter(|&v| v >= lo && v <= hi)
        .collect()
}

fn power_of_ten(decade: i32) -> f64 {
    if decade < 0 {
        1.0 / 10.0_f64.powi(-decade)
    } else {
        10.0_f64.powi(decade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(10.0, 5), 2.0);
        assert_eq!(nice_step(100.0, 10), 10.0);
        assert_eq!(nice_step(1.0, 4), 0.2);
        assert_eq!(nice_step(0.0, 5), 0.0);
        assert_eq!(nice_step(10.0, 0), 0.0);
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 10), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0]);
        assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn test_nice_ticks_unaligned_bounds() {
        let ticks = nice_ticks(1.3, 9.7, 5);
        assert_eq!(ticks, vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_log_ticks() {
        assert_eq!(log_ticks(1.0, 1000.0), vec![1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(log_ticks(0.1, 5.0), vec![0.1, 1.0]);
        assert!(log_ticks(0.0, 10.0).is_empty());
    }
}
