//! Rows in, geometry out
//!
//! Every chart runs the same pipeline: filter rows, compute statistics, fit
//! scales to the plot area, place marks. The per-kind implementations live
//! in [`crate::categorical`] and [`crate::distribution`].

use crate::config::ChartSpec;
use crate::error::ChartResult;
use crate::geometry::{format_tick, Axis, AxisScale, ChartData, Tick};
use plotstat_records::Row;
use plotstat_scale::{BandScale, ContinuousScale};

/// Approximate number of ticks on a continuous axis
pub const AXIS_TICKS: usize = 10;

/// A configured chart that can be computed from rows
pub trait ChartPipeline {
    /// Chart title, used in logs and errors
    fn title(&self) -> &str;

    /// Compute the chart geometry
    ///
    /// Fails with `EmptyDataset` when no row survives filtering, and with a
    /// scale error when the values cannot span a usable axis.
    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData>;
}

impl ChartPipeline for ChartSpec {
    fn title(&self) -> &str {
        ChartSpec::title(self)
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let _span = tracing::debug_span!("chart", kind = self.kind(), title = self.title()).entered();
        match self {
            ChartSpec::Bar(c) => c.compute(rows),
            ChartSpec::Dot(c) => c.compute(rows),
            ChartSpec::HeatMap(c) => c.compute(rows),
            ChartSpec::Histogram(c) => c.compute(rows),
            ChartSpec::BoxPlot(c) => c.compute(rows),
            ChartSpec::Strip(c) => c.compute(rows),
            ChartSpec::Scatter(c) => c.compute(rows),
        }
    }
}

/// Category axis with one tick at the centre of each band
pub(crate) fn band_axis(band: &BandScale, labels: &[String]) -> Axis {
    let ticks = labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            Some(Tick {
                position: band.center(i)?,
                label: label.clone(),
            })
        })
        .collect();

    Axis {
        scale: AxisScale::Band {
            labels: labels.to_vec(),
            bandwidth: band.bandwidth(),
        },
        ticks,
    }
}

/// Widen a single-value extent so it can back a linear scale
pub(crate) fn spread((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo < hi {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

/// Category axis over a linear scale, one tick per category index
pub(crate) fn index_axis(scale: &ContinuousScale, labels: &[String]) -> ChartResult<Axis> {
    let ticks = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            Ok(Tick {
                position: scale.map(i as f64)?,
                label: label.clone(),
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    Ok(Axis {
        scale: AxisScale::Continuous {
            kind: scale.kind(),
            domain: scale.domain(),
        },
        ticks,
    })
}

/// Value axis with nice ticks, or one tick per decade on log scales
pub(crate) fn continuous_axis(scale: &ContinuousScale) -> ChartResult<Axis> {
    let ticks = scale
        .ticks(AXIS_TICKS)
        .into_iter()
        .map(|value| {
            Ok(Tick {
                position: scale.map(value)?,
                label: format_tick(value),
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    Ok(Axis {
        scale: AxisScale::Continuous {
            kind: scale.kind(),
            domain: scale.domain(),
        },
        ticks,
    })
}
