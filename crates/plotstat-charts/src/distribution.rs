//! Charts of a numeric distribution: histogram, box plot, scatter plot

use crate::config::{Binning, BoxPlot, HistogramChart, ScatterPlot};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{BinMark, BoxMark, ChartData, Marks, PointMark, ScatterPoint};
use crate::pipeline::{continuous_axis, spread, ChartPipeline};
use plotstat_records::{filter_pairs, filter_values, Row};
use plotstat_scale::{extent, nice_ticks, ContinuousScale, Rect};
use plotstat_stats::{truncate_upper_tail, Histogram, QuantileStats};

impl ChartPipeline for HistogramChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let outcome = filter_values(rows, &self.value_field);
        let values = match self.truncate {
            Some(fraction) => truncate_upper_tail(&outcome.kept, fraction),
            None => outcome.kept,
        };

        let histogram = match self.binning {
            Binning::EqualWidth { bins } => Histogram::equal_width(&values, bins),
            Binning::Ticks { count } => extent(&values).and_then(|(lo, hi)| {
                let domain = (lo.min(0.0), hi);
                Histogram::with_thresholds(&values, domain, &nice_ticks(domain.0, domain.1, count))
            }),
        };
        let Some(histogram) = histogram.filter(|h| h.max_count() > 0) else {
            return Err(ChartError::empty(&self.title));
        };
        let (Some(first), Some(last)) = (histogram.bins().first(), histogram.bins().last()) else {
            return Err(ChartError::empty(&self.title));
        };

        let layout = self.layout;
        let x = ContinuousScale::linear(spread((first.lower, last.upper)), layout.x_range())?;
        let y = ContinuousScale::linear((0.0, histogram.max_count() as f64), layout.y_range())?;
        let base_y = layout.plot_height();

        let mut bins = Vec::with_capacity(histogram.len());
        for (i, bin) in histogram.bins().iter().enumerate() {
            let x0 = x.map(bin.lower)?;
            let x1 = x.map(bin.upper)?;
            let top_y = y.map(bin.count as f64)?;
            bins.push(BinMark {
                lower: bin.lower,
                upper: bin.upper,
                count: bin.count,
                percentage: histogram.percentage(i).unwrap_or(0.0),
                rect: Rect::new(x0, top_y, x1 - x0, base_y - top_y),
            });
        }

        tracing::debug!(
            title = %self.title,
            values = values.len(),
            bins = bins.len(),
            "computed histogram"
        );

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: Some(continuous_axis(&x)?),
            y_axis: continuous_axis(&y)?,
            marks: Marks::Bins { bins },
            dropped: outcome.dropped,
        })
    }
}

impl ChartPipeline for BoxPlot {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let outcome = filter_values(rows, &self.value_field);
        let Some(stats) = QuantileStats::from_data(&outcome.kept) else {
            return Err(ChartError::empty(&self.title));
        };

        let layout = self.layout;
        let domain = spread((stats.min - self.domain_padding, stats.max + self.domain_padding));
        let y = ContinuousScale::linear(domain, layout.y_range())?;
        let center_x = layout.plot_width() / 2.0;

        let q3_y = y.map(stats.q3)?;
        let q1_y = y.map(stats.q1)?;
        let outliers = stats
            .outliers
            .iter()
            .map(|&value| {
                Ok(PointMark {
                    value,
                    cx: center_x,
                    cy: y.map(value)?,
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        let plot = BoxMark {
            center_x,
            body: Rect::new(center_x - self.box_width / 2.0, q3_y, self.box_width, q1_y - q3_y),
            median_y: y.map(stats.median)?,
            lower_whisker_y: y.map(stats.lower_whisker)?,
            upper_whisker_y: y.map(stats.upper_whisker)?,
            outliers,
            stats,
        };

        tracing::debug!(
            title = %self.title,
            count = plot.stats.count,
            outliers = plot.outliers.len(),
            "computed box plot"
        );

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: None,
            y_axis: continuous_axis(&y)?,
            marks: Marks::Box {
                radius: self.radius,
                plot,
            },
            dropped: outcome.dropped,
        })
    }
}

impl ChartPipeline for ScatterPlot {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let outcome = filter_pairs(rows, &self.x_field, &self.y_field);
        let xs: Vec<f64> = outcome.kept.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = outcome.kept.iter().map(|p| p.1).collect();
        let (Some(x_extent), Some(y_extent)) = (extent(&xs), extent(&ys)) else {
            return Err(ChartError::empty(&self.title));
        };

        let (low, high) = self.domain_factors;
        let layout = self.layout;
        let x = ContinuousScale::linear(
            spread((x_extent.0 * low, x_extent.1 * high)),
            layout.x_range(),
        )?;
        let y = ContinuousScale::linear(
            spread((y_extent.0 * low, y_extent.1 * high)),
            layout.y_range(),
        )?;

        let points = outcome
            .kept
            .iter()
            .map(|&(px, py)| {
                Ok(ScatterPoint {
                    x: px,
                    y: py,
                    cx: x.map(px)?,
                    cy: y.map(py)?,
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        tracing::debug!(title = %self.title, points = points.len(), "computed scatter plot");

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: Some(continuous_axis(&x)?),
            y_axis: continuous_axis(&y)?,
            marks: Marks::Scatter {
                radius: self.radius,
                points,
            },
            dropped: outcome.dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HoverTarget;
    use std::collections::HashMap;

    fn rows(field: &str, values: &[f64]) -> Vec<HashMap<String, f64>> {
        values
            .iter()
            .map(|&v| HashMap::from([(field.to_string(), v)]))
            .collect()
    }

    #[test]
    fn test_histogram_truncates_tail() {
        let mut values: Vec<f64> = (0..19).map(f64::from).collect();
        values.push(10_000.0);
        let mut chart = HistogramChart::new("Durations", "duration");
        chart.truncate = Some(0.95);
        chart.binning = Binning::EqualWidth { bins: 6 };

        let data = chart.compute(&rows("duration", &values)).unwrap();
        let Marks::Bins { bins } = &data.marks else {
            panic!("expected bins");
        };
        assert_eq!(bins.len(), 6);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 19);
        assert_eq!(bins.last().unwrap().upper, 18.0);
        // Bins tile the plot width
        assert!(bins[0].rect.x.abs() < 1e-9);
        let end = bins[5].rect.x + bins[5].rect.width;
        assert!((end - data.layout.plot_width()).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_tick_thresholds() {
        let values = [0.3, 1.2, 2.5, 2.7, 9.9];
        let mut chart = HistogramChart::new("Precipitation", "precip");
        chart.binning = Binning::Ticks { count: 5 };
        let data = chart.compute(&rows("precip", &values)).unwrap();
        let Marks::Bins { bins } = &data.marks else {
            panic!("expected bins");
        };
        let edges: Vec<(f64, f64, usize)> = bins.iter().map(|b| (b.lower, b.upper, b.count)).collect();
        assert_eq!(
            edges,
            vec![(0.0, 2.0, 2), (2.0, 4.0, 2), (4.0, 6.0, 0), (6.0, 8.0, 0), (8.0, 9.9, 1)]
        );
        assert_eq!(bins[0].percentage, 40.0);
    }

    #[test]
    fn test_histogram_empty() {
        let chart = HistogramChart::new("Durations", "duration");
        assert!(matches!(
            chart.compute(&rows("other", &[1.0])),
            Err(ChartError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_box_plot_geometry_and_hover() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let data = BoxPlot::new("Years", "year").compute(&rows("year", &values)).unwrap();
        let Marks::Box { plot, .. } = &data.marks else {
            panic!("expected a box");
        };
        assert_eq!(plot.stats.outliers, vec![100.0]);
        assert_eq!(plot.outliers.len(), 1);
        // Higher values sit higher on the canvas
        assert!(plot.upper_whisker_y < plot.median_y);
        assert!(plot.median_y < plot.lower_whisker_y);
        assert!(plot.body.y < plot.median_y && plot.median_y < plot.body.y + plot.body.height);

        let outlier = &plot.outliers[0];
        let (cx, cy) = data.layout.to_canvas(outlier.cx, outlier.cy + 1.0);
        assert_eq!(data.hit_test(cx, cy), Some(HoverTarget::Outlier { value: 100.0 }));

        let (cx, cy) = data.layout.to_canvas(plot.center_x, plot.median_y);
        assert!(matches!(data.hit_test(cx, cy), Some(HoverTarget::Box { .. })));
    }

    #[test]
    fn test_box_plot_single_value() {
        let data = BoxPlot::new("Years", "year").compute(&rows("year", &[1999.0])).unwrap();
        let Marks::Box { plot, .. } = &data.marks else {
            panic!("expected a box");
        };
        assert_eq!(plot.body.height, 0.0);
        assert!(plot.outliers.is_empty());
    }

    #[test]
    fn test_scatter_domain_factors() {
        let data: Vec<HashMap<String, f64>> = vec![
            HashMap::from([("min".to_string(), 10.0), ("max".to_string(), 50.0)]),
            HashMap::from([("min".to_string(), 20.0), ("max".to_string(), 100.0)]),
        ];
        let chart = ScatterPlot::new("Temps", "min", "max");
        let result = chart.compute(&data).unwrap();
        let Some(crate::geometry::Axis {
            scale: crate::geometry::AxisScale::Continuous { domain, .. },
            ..
        }) = &result.x_axis
        else {
            panic!("expected a continuous x axis");
        };
        assert!((domain.0 - 9.0).abs() < 1e-9);
        assert!((domain.1 - 22.0).abs() < 1e-9);

        let Marks::Scatter { points, .. } = &result.marks else {
            panic!("expected points");
        };
        let (cx, cy) = result.layout.to_canvas(points[1].cx, points[1].cy);
        assert_eq!(
            result.hit_test(cx, cy),
            Some(HoverTarget::Point {
                index: 1,
                x: 20.0,
                y: 100.0
            })
        );
    }
}
