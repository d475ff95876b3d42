//! Error types for plotstat-scale

use thiserror::Error;

/// Errors raised by scale construction and mapping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaleError {
    /// Degenerate, non-finite or (for log scales) non-positive domain or input
    #[error("Invalid domain for {kind} scale: {reason}")]
    InvalidDomain { kind: &'static str, reason: String },
}

impl ScaleError {
    pub(crate) fn invalid(kind: &'static str, reason: impl Into<String>) -> Self {
        ScaleError::InvalidDomain {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type alias for scale operations
pub type ScaleResult<T> = Result<T, ScaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_domain_display() {
        let err = ScaleError::invalid("log", "bound 0 is not positive");
        assert_eq!(
            err.to_string(),
            "Invalid domain for log scale: bound 0 is not positive"
        );
    }
}
