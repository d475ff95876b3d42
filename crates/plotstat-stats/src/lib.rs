//! plotstat-stats - Statistical aggregation for charts
//!
//! This crate computes the numbers a chart draws, with no knowledge of how
//! they are drawn:
//!
//! - **Aggregate**: per-category mean/sum/count in display order
//! - **Quantile**: percentiles, quartiles, Tukey whiskers and outliers
//! - **Histogram**: equal-width and threshold binning, tail truncation
//!
//! # Design Philosophy
//!
//! Every function is a pure pass over in-memory data. Results are plain
//! serializable structs that are recomputed wholesale when the data changes;
//! nothing is cached and nothing is updated incrementally.

pub mod aggregate;
pub mod histogram;
pub mod quantile;

pub use aggregate::*;
pub use histogram::*;
pub use quantile::*;
