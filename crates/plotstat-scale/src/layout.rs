//! Plot layout: canvas size and margins to plot area

use serde::{Deserialize, Serialize};

/// Space reserved around the plot area for axes and labels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every side
    pub fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

impl Default for Margin {
    fn default() -> Self {
        // Room for rotated category labels at the bottom and a value axis title
        Self::new(40.0, 30.0, 80.0, 70.0)
    }
}

/// Axis-aligned rectangle in canvas pixels, origin at top left
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether a point lies inside, edges included
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Canvas dimensions plus margins
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotLayout {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin: Margin::default(),
        }
    }
}

impl PlotLayout {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Width available to marks, never negative
    pub fn plot_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height available to marks, never negative
    pub fn plot_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// The plot area in canvas coordinates
    pub fn plot_area(&self) -> Rect {
        Rect::new(
            self.margin.left,
            self.margin.top,
            self.plot_width(),
            self.plot_height(),
        )
    }

    /// Horizontal range in plot coordinates
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.plot_width())
    }

    /// Vertical range in plot coordinates, flipped so larger values sit higher
    pub fn y_range(&self) -> (f64, f64) {
        (self.plot_height(), 0.0)
    }

    /// Plot coordinates to canvas coordinates
    pub fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.margin.left, y + self.margin.top)
    }

    /// Canvas coordinates to plot coordinates
    pub fn to_plot(&self, px: f64, py: f64) -> (f64, f64) {
        (px - self.margin.left, py - self.margin.top)
    }
}
