//! Continuous scales
//!
//! Maps a numeric domain interval onto a range interval, either linearly or
//! in log10 space. Mapping is a pure function; [`ContinuousScale`] only
//! bundles a validated domain and range so they are checked once.

use crate::error::{ScaleError, ScaleResult};
use crate::ticks::{log_ticks, nice_ticks};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scale type for a continuous axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Log,
}

impl ScaleKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScaleKind::Linear => "linear",
            ScaleKind::Log => "log",
        }
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a value from `[domain_lo, domain_hi]` onto `[range_lo, range_hi]`
///
/// Linear scales reject an empty domain. Log scales reject any
/// non-positive bound or value; clamp with [`clamp_to_floor`] first.
/// Values outside the domain extrapolate.
pub fn map(
    value: f64,
    domain_lo: f64,
    domain_hi: f64,
    range_lo: f64,
    range_hi: f64,
    kind: ScaleKind,
) -> ScaleResult<f64> {
    check_domain(kind, domain_lo, domain_hi)?;
    let t = normalize(kind, value, domain_lo, domain_hi)?;
    Ok(range_lo + t * (range_hi - range_lo))
}

/// Raise a value to at least `floor`
///
/// Used before log mapping so zero readings (no rain this month) still land
/// on the axis.
pub fn clamp_to_floor(value: f64, floor: f64) -> f64 {
    value.max(floor)
}

fn check_domain(kind: ScaleKind, lo: f64, hi: f64) -> ScaleResult<()> {
    if !(lo.is_finite() && hi.is_finite()) {
        return Err(ScaleError::invalid(
            kind.name(),
            format!("bounds [{}, {}] are not finite", lo, hi),
        ));
    }
    if lo == hi {
        return Err(ScaleError::invalid(
            kind.name(),
            format!("bounds are equal ({})", lo),
        ));
    }
    if kind == ScaleKind::Log && (lo <= 0.0 || hi <= 0.0) {
        return Err(ScaleError::invalid(
            kind.name(),
            format!("bounds [{}, {}] must be positive", lo, hi),
        ));
    }
    Ok(())
}

/// Position of `value` within a checked domain, 0 at `lo` and 1 at `hi`
fn normalize(kind: ScaleKind, value: f64, lo: f64, hi: f64) -> ScaleResult<f64> {
    if !value.is_finite() {
        return Err(ScaleError::invalid(
            kind.name(),
            format!("value {} is not finite", value),
        ));
    }
    match kind {
        ScaleKind::Linear => Ok((value - lo) / (hi - lo)),
        ScaleKind::Log => {
            if value <= 0.0 {
                return Err(ScaleError::invalid(
                    kind.name(),
                    format!("value {} is not positive", value),
                ));
            }
            let (log_lo, log_hi) = (lo.log10(), hi.log10());
            Ok((value.log10() - log_lo) / (log_hi - log_lo))
        }
    }
}

/// A validated continuous scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContinuousScale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f64, f64),
}

impl ContinuousScale {
    /// Create a scale, validating the domain for its kind
    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> ScaleResult<Self> {
        check_domain(kind, domain.0, domain.1)?;
        if !(range.0.is_finite() && range.1.is_finite()) {
            return Err(ScaleError::invalid(
                kind.name(),
                format!("range [{}, {}] is not finite", range.0, range.1),
            ));
        }
        Ok(Self {
            kind,
            domain,
            range,
        })
    }

    /// Linear scale
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> ScaleResult<Self> {
        Self::new(ScaleKind::Linear, domain, range)
    }

    /// Log10 scale
    pub fn log(domain: (f64, f64), range: (f64, f64)) -> ScaleResult<Self> {
        Self::new(ScaleKind::Log, domain, range)
    }

    /// Map a domain value into the range
    pub fn map(&self, value: f64) -> ScaleResult<f64> {
        let t = normalize(self.kind, value, self.domain.0, self.domain.1)?;
        Ok(self.range.0 + t * (self.range.1 - self.range.0))
    }

    /// Map a range value back into the domain
    ///
    /// Returns `None` when the range is a single point.
    pub fn invert(&self, pixel: f64) -> Option<f64> {
        let (r0, r1) = self.range;
        if r0 == r1 || !pixel.is_finite() {
            return None;
        }
        let t = (pixel - r0) / (r1 - r0);
        let (d0, d1) = self.domain;
        Some(match self.kind {
            ScaleKind::Linear => d0 + t * (d1 - d0),
            ScaleKind::Log => 10f64.powf(d0.log10() + t * (d1.log10() - d0.log10())),
        })
    }

    /// Tick values inside the domain
    ///
    /// Linear scales get about `count` nicely rounded ticks; log scales get
    /// one tick per decade.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        match self.kind {
            ScaleKind::Linear => nice_ticks(lo, hi, count),
            ScaleKind::Log => log_ticks(lo, hi),
        }
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Smallest and largest finite value
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Largest finite value scaled by `factor`, for headroom above the tallest mark
pub fn padded_max(values: &[f64], factor: f64) -> Option<f64> {
    extent(values).map(|(_, hi)| hi * factor)
}
