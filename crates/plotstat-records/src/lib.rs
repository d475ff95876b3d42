//! plotstat-records - Typed observations from loosely typed rows
//!
//! Charts are fed rows straight out of CSV or JSON exports, where fields are
//! strings, numbers, or missing altogether. This crate validates those rows:
//!
//! - **Row**: uniform field access over string maps and JSON records
//! - **CategoryDomain**: the fixed, ordered label set a chart groups by
//! - **RecordFilter**: rows → `Observation`s, silently dropping bad rows
//!
//! # Design
//!
//! Filtering never fails. A row with an unknown category or an unparseable
//! value is skipped and counted; callers that care can inspect the counts.

pub mod category;
pub mod filter;
pub mod row;

pub use category::*;
pub use filter::*;
pub use row::*;
