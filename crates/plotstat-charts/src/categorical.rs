//! Charts over a categorical axis: bar chart, dot plot, heat map, strip chart

use crate::config::{BarChart, DotPlot, HeatMap, StripChart};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{BarMark, ChartData, DotMark, Marks, StripPoint, TileMark};
use crate::pipeline::{band_axis, continuous_axis, index_axis, spread, ChartPipeline};
use plotstat_records::{CellFilter, DropCounts, Observation, RecordFilter, Row};
use plotstat_scale::{
    clamp_to_floor, extent, padded_max, BandScale, ContinuousScale, Rect, ScaleKind,
};
use plotstat_stats::{aggregate, aggregate_cells, AggregateResult, Reducer};

/// Filter and aggregate, failing when no category has data
fn aggregate_rows<R: Row>(
    title: &str,
    filter: &RecordFilter,
    rows: &[R],
    reducer: Reducer,
) -> ChartResult<(Vec<AggregateResult>, DropCounts)> {
    let outcome = filter.filter(rows);
    let results = aggregate(&outcome.kept, filter.domain(), reducer);
    if results.is_empty() {
        return Err(ChartError::empty(title));
    }
    Ok((results, outcome.dropped))
}

fn labels_of(results: &[AggregateResult]) -> Vec<String> {
    results.iter().map(|r| r.label.clone()).collect()
}

fn values_of(results: &[AggregateResult]) -> Vec<f64> {
    results.iter().map(|r| r.value).collect()
}

/// Log domain from the floor, at least one decade tall
fn log_domain(floor: f64, top: f64) -> (f64, f64) {
    (floor, top.max(floor * 10.0))
}

impl ChartPipeline for BarChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let filter = RecordFilter::new(self.category.resolve(rows), self.value_field.as_str());
        let (results, dropped) = aggregate_rows(&self.title, &filter, rows, self.reducer)?;
        let values = values_of(&results);
        let (Some((lo, _)), Some(top)) = (extent(&values), padded_max(&values, self.headroom))
        else {
            return Err(ChartError::empty(&self.title));
        };

        let layout = self.layout;
        let band = BandScale::new(results.len(), layout.x_range())?.with_padding(self.padding);

        // Bars grow from the baseline: zero on a linear axis, the floor on a log axis
        let (baseline, domain) = match self.scale {
            ScaleKind::Linear => (0.0, spread((lo.min(0.0), top.max(0.0)))),
            ScaleKind::Log => (Self::LOG_FLOOR, log_domain(Self::LOG_FLOOR, top)),
        };
        let y = ContinuousScale::new(self.scale, domain, layout.y_range())?;
        let base_y = y.map(baseline)?;

        let mut bars = Vec::with_capacity(results.len());
        for (i, r) in results.iter().enumerate() {
            let Some(x) = band.position(i) else { continue };
            let value = match self.scale {
                ScaleKind::Linear => r.value,
                ScaleKind::Log => clamp_to_floor(r.value, baseline),
            };
            let top_y = y.map(value)?;
            bars.push(BarMark {
                category: r.category,
                label: r.label.clone(),
                value: r.value,
                count: r.count,
                rect: Rect::new(x, top_y.min(base_y), band.bandwidth(), (base_y - top_y).abs()),
            });
        }

        tracing::debug!(title = %self.title, bars = bars.len(), "computed bar chart");

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: Some(band_axis(&band, &labels_of(&results))),
            y_axis: continuous_axis(&y)?,
            marks: Marks::Bars { bars },
            dropped,
        })
    }
}

impl ChartPipeline for DotPlot {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let filter = RecordFilter::new(self.category.resolve(rows), self.value_field.as_str());
        let (results, dropped) = aggregate_rows(&self.title, &filter, rows, self.reducer)?;
        let Some((lo, hi)) = extent(&values_of(&results)) else {
            return Err(ChartError::empty(&self.title));
        };

        let layout = self.layout;
        let band = BandScale::new(results.len(), layout.x_range())?.with_padding(self.padding);
        let domain = match self.scale {
            ScaleKind::Linear => spread((lo.min(0.0), hi.max(0.0))),
            ScaleKind::Log => log_domain(self.log_floor, hi),
        };
        let y = ContinuousScale::new(self.scale, domain, layout.y_range())?;

        let mut dots = Vec::with_capacity(results.len());
        for (i, r) in results.iter().enumerate() {
            let Some(cx) = band.center(i) else { continue };
            let value = match self.scale {
                ScaleKind::Linear => r.value,
                ScaleKind::Log => clamp_to_floor(r.value, self.log_floor),
            };
            dots.push(DotMark {
                category: r.category,
                label: r.label.clone(),
                value: r.value,
                count: r.count,
                cx,
                cy: y.map(value)?,
            });
        }

        tracing::debug!(title = %self.title, dots = dots.len(), "computed dot plot");

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: Some(band_axis(&band, &labels_of(&results))),
            y_axis: continuous_axis(&y)?,
            marks: Marks::Dots {
                radius: self.radius,
                dots,
            },
            dropped,
        })
    }
}

impl ChartPipeline for HeatMap {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let filter = CellFilter::new(
            self.rows.resolve(rows),
            self.columns.resolve(rows),
            self.value_field.as_str(),
        );
        let outcome = filter.filter(rows);
        let cells = aggregate_cells(
            &outcome.kept,
            &filter.row.domain,
            &filter.column.domain,
            self.reducer,
        );
        let values: Vec<f64> = cells.iter().map(|c| c.value).collect();
        let Some((lo, hi)) = extent(&values) else {
            return Err(ChartError::empty(&self.title));
        };

        // Every label stays on the axis, including rows or columns with no data
        let layout = self.layout;
        let x = BandScale::new(filter.column.domain.len(), layout.x_range())?.with_padding(self.padding);
        let y = BandScale::new(filter.row.domain.len(), (0.0, layout.plot_height()))?
            .with_padding(self.padding);

        let mut tiles = Vec::with_capacity(cells.len());
        for cell in cells {
            let (Some(tx), Some(ty)) = (x.position(cell.column), y.position(cell.row)) else {
                continue;
            };
            let intensity = if hi > lo {
                (cell.value - lo) / (hi - lo)
            } else {
                0.5
            };
            tiles.push(TileMark {
                row: cell.row,
                row_label: cell.row_label,
                column: cell.column,
                column_label: cell.column_label,
                value: cell.value,
                count: cell.count,
                intensity,
                rect: Rect::new(tx, ty, x.bandwidth(), y.bandwidth()),
            });
        }

        tracing::debug!(title = %self.title, tiles = tiles.len(), "computed heat map");

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: Some(band_axis(&x, filter.column.domain.labels())),
            y_axis: band_axis(&y, filter.row.domain.labels()),
            marks: Marks::Tiles { tiles },
            dropped: outcome.dropped,
        })
    }
}

impl ChartPipeline for StripChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn compute<R: Row>(&self, rows: &[R]) -> ChartResult<ChartData> {
        let field = self.category.resolve(rows);
        let outcome = field.filter(rows);
        if outcome.kept.is_empty() {
            return Err(ChartError::empty(&self.title));
        }

        let observations: Vec<Observation> =
            outcome.kept.iter().map(|&c| Observation::new(c, 1.0)).collect();
        let counts = aggregate(&observations, &field.domain, Reducer::Count);

        // Category i sits at i / len of the height, earliest at the top
        let layout = self.layout;
        let slots = field.domain.len() as f64;
        let y = ContinuousScale::linear((0.0, slots), (0.0, layout.plot_height()))?;
        let cx = layout.plot_width() / 2.0;

        let points = outcome
            .kept
            .iter()
            .map(|&category| {
                Ok(StripPoint {
                    category,
                    cx,
                    cy: y.map(category as f64)?,
                })
            })
            .collect::<ChartResult<Vec<_>>>()?;

        tracing::debug!(title = %self.title, points = points.len(), "computed strip chart");

        Ok(ChartData {
            title: self.title.clone(),
            layout,
            x_axis: None,
            y_axis: index_axis(&y, field.domain.labels())?,
            marks: Marks::Strip {
                radius: self.radius,
                counts,
                points,
            },
            dropped: outcome.dropped,
        })
    }
}
