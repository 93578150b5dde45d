//! Error handling module for sinkbom
//!
//! Errors only surface at the caller boundary (file loading, CLI validation).
//! The compilation engine itself degrades to diagnostics instead of failing.

use thiserror::Error;

/// Main error type for sinkbom
#[derive(Error, Debug)]
pub enum SinkBomError {
    /// IO errors (reading configs and catalogs)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog errors (malformed tables, inconsistent ranges)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Validation errors (caller-supplied values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Mandatory facets are missing from the configuration
    #[error("Incomplete configuration: missing {}", fields.join(", "))]
    IncompleteConfiguration { fields: Vec<String> },

    /// A placement tag that could not be parsed
    #[error("Invalid placement tag: {0}")]
    InvalidPlacement(String),
}

/// Result type alias for sinkbom operations
pub type Result<T> = std::result::Result<T, SinkBomError>;

impl SinkBomError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid placement error
    pub fn invalid_placement(tag: impl Into<String>) -> Self {
        Self::InvalidPlacement(tag.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SinkBomError::catalog("overlapping pegboard ranges");
        assert_eq!(err.to_string(), "Catalog error: overlapping pegboard ranges");

        let err = SinkBomError::IncompleteConfiguration {
            fields: vec!["sinkModelId".to_string(), "length".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Incomplete configuration: missing sinkModelId, length"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SinkBomError = io_err.into();
        assert!(matches!(err, SinkBomError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        let err = SinkBomError::validation("width must be positive");
        assert!(matches!(err, SinkBomError::Validation(_)));

        let err = SinkBomError::invalid_placement("CENTER_OF_BASIN_X");
        assert!(matches!(err, SinkBomError::InvalidPlacement(_)));
    }
}
