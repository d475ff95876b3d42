//! Error types for plotstat-charts

use plotstat_scale::ScaleError;
use thiserror::Error;

/// Main error type for chart operations
#[derive(Error, Debug)]
pub enum ChartError {
    /// A scale could not be built over the computed values
    #[error("Scale error: {0}")]
    Scale(#[from] ScaleError),

    /// Chart configuration could not be parsed
    #[error("Failed to parse chart configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Chart configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filtering left nothing to draw
    #[error("No data left to draw for chart '{chart}'")]
    EmptyDataset { chart: String },

    /// JSON export errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn empty(chart: &str) -> Self {
        tracing::warn!(chart, "no data left to draw");
        ChartError::EmptyDataset {
            chart: chart.to_string(),
        }
    }
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
