//! Chart geometry handed to a renderer
//!
//! Mark positions are in plot coordinates: origin at the top-left corner of
//! the plot area, y growing downward. Add the layout margins (or call
//! [`PlotLayout::to_canvas`]) to place them on the canvas.

use crate::error::ChartResult;
use plotstat_records::DropCounts;
use plotstat_scale::{hit_rect, nearest_point, PlotLayout, Rect, ScaleKind};
use plotstat_stats::{AggregateResult, QuantileStats};
use serde::{Deserialize, Serialize};

/// A labelled position along an axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Pixel offset along the axis
    pub position: f64,
    pub label: String,
}

/// How an axis maps values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AxisScale {
    Band { labels: Vec<String>, bandwidth: f64 },
    Continuous { kind: ScaleKind, domain: (f64, f64) },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub scale: AxisScale,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarMark {
    pub category: usize,
    pub label: String,
    pub value: f64,
    pub count: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotMark {
    pub category: usize,
    pub label: String,
    pub value: f64,
    pub count: usize,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMark {
    pub row: usize,
    pub row_label: String,
    pub column: usize,
    pub column_label: String,
    pub value: f64,
    pub count: usize,
    /// Position of the value between the smallest (0) and largest (1) tile
    pub intensity: f64,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinMark {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    pub percentage: f64,
    pub rect: Rect,
}

/// A single value drawn as a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMark {
    pub value: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMark {
    pub stats: QuantileStats,
    /// Horizontal centre of the box and whiskers
    pub center_x: f64,
    /// From q3 (top) to q1 (bottom)
    pub body: Rect,
    pub median_y: f64,
    pub lower_whisker_y: f64,
    pub upper_whisker_y: f64,
    pub outliers: Vec<PointMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripPoint {
    pub category: usize,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub cx: f64,
    pub cy: f64,
}

/// Everything a chart draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Marks {
    Bars {
        bars: Vec<BarMark>,
    },
    Dots {
        radius: f64,
        dots: Vec<DotMark>,
    },
    Tiles {
        tiles: Vec<TileMark>,
    },
    Bins {
        bins: Vec<BinMark>,
    },
    Box {
        radius: f64,
        plot: BoxMark,
    },
    Strip {
        radius: f64,
        /// Occurrences per category, in domain order
        counts: Vec<AggregateResult>,
        points: Vec<StripPoint>,
    },
    Scatter {
        radius: f64,
        points: Vec<ScatterPoint>,
    },
}

/// What lies under the pointer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HoverTarget {
    Category {
        category: usize,
        label: String,
        value: f64,
        count: usize,
    },
    Cell {
        row_label: String,
        column_label: String,
        value: f64,
        count: usize,
    },
    Bin {
        index: usize,
        lower: f64,
        upper: f64,
        count: usize,
        percentage: f64,
    },
    Box {
        q1: f64,
        median: f64,
        q3: f64,
    },
    Outlier {
        value: f64,
    },
    Strip {
        category: usize,
        label: String,
        count: usize,
    },
    Point {
        index: usize,
        x: f64,
        y: f64,
    },
}

/// Computed chart, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub title: String,
    pub layout: PlotLayout,
    pub x_axis: Option<Axis>,
    pub y_axis: Axis,
    pub marks: Marks,
    /// Rows left out by filtering
    pub dropped: DropCounts,
}

impl ChartData {
    /// Serialize to JSON
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find the mark under a canvas position
    pub fn hit_test(&self, canvas_x: f64, canvas_y: f64) -> Option<HoverTarget> {
        let (x, y) = self.layout.to_plot(canvas_x, canvas_y);

        match &self.marks {
            Marks::Bars { bars } => {
                let rects: Vec<Rect> = bars.iter().map(|b| b.rect).collect();
                let bar = &bars[hit_rect(&rects, x, y)?];
                Some(HoverTarget::Category {
                    category: bar.category,
                    label: bar.label.clone(),
                    value: bar.value,
                    count: bar.count,
                })
            }
            Marks::Dots { radius, dots } => {
                let centers: Vec<(f64, f64)> = dots.iter().map(|d| (d.cx, d.cy)).collect();
                let dot = &dots[nearest_point(&centers, x, y, *radius)?];
                Some(HoverTarget::Category {
                    category: dot.category,
                    label: dot.label.clone(),
                    value: dot.value,
                    count: dot.count,
                })
            }
            Marks::Tiles { tiles } => {
                let rects: Vec<Rect> = tiles.iter().map(|t| t.rect).collect();
                let tile = &tiles[hit_rect(&rects, x, y)?];
                Some(HoverTarget::Cell {
                    row_label: tile.row_label.clone(),
                    column_label: tile.column_label.clone(),
                    value: tile.value,
                    count: tile.count,
                })
            }
            Marks::Bins { bins } => {
                let rects: Vec<Rect> = bins.iter().map(|b| b.rect).collect();
                let index = hit_rect(&rects, x, y)?;
                let bin = &bins[index];
                Some(HoverTarget::Bin {
                    index,
                    lower: bin.lower,
                    upper: bin.upper,
                    count: bin.count,
                    percentage: bin.percentage,
                })
            }
            Marks::Box { radius, plot } => {
                let centers: Vec<(f64, f64)> = plot.outliers.iter().map(|o| (o.cx, o.cy)).collect();
                if let Some(i) = nearest_point(&centers, x, y, *radius) {
                    return Some(HoverTarget::Outlier {
                        value: plot.outliers[i].value,
                    });
                }
                plot.body.contains(x, y).then(|| HoverTarget::Box {
                    q1: plot.stats.q1,
                    median: plot.stats.median,
                    q3: plot.stats.q3,
                })
            }
            Marks::Strip {
                radius,
                counts,
                points,
            } => {
                let centers: Vec<(f64, f64)> = points.iter().map(|p| (p.cx, p.cy)).collect();
                let category = points[nearest_point(&centers, x, y, *radius)?].category;
                let group = counts.iter().find(|c| c.category == category)?;
                Some(HoverTarget::Strip {
                    category,
                    label: group.label.clone(),
                    count: group.count,
                })
            }
            Marks::Scatter { radius, points } => {
                let centers: Vec<(f64, f64)> = points.iter().map(|p| (p.cx, p.cy)).collect();
                let index = nearest_point(&centers, x, y, *radius)?;
                Some(HoverTarget::Point {
                    index,
                    x: points[index].x,
                    y: points[index].y,
                })
            }
        }
    }
}

/// Short tick label: integers without a fraction, others as written
pub fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
