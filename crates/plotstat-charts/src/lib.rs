//! plotstat-charts - Configured charts from rows to mark geometry
//!
//! Each chart kind (bar, dot, heat map, histogram, box plot, strip,
//! scatter) is a configuration value rather than code. Running a chart over
//! rows filters them, computes statistics, fits scales to the plot area and
//! returns plain geometry a renderer can draw:
//!
//! ```ignore
//! let config = ChartConfig::load("charts.toml")?;
//! for chart in &config.charts {
//!     let data = chart.compute(&rows)?;
//!     println!("{}", data.to_json()?);
//! }
//! ```
//!
//! Hover is a pure lookup: [`ChartData::hit_test`] maps a canvas position to
//! the mark beneath it.

pub mod categorical;
pub mod config;
pub mod distribution;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod pipeline;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use pipeline::*;

// Re-export the building blocks charts are made of
pub use plotstat_records;
pub use plotstat_scale;
pub use plotstat_stats;
