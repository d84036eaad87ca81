use thiserror::Error;

/// Failures surfaced by the bounded and byte-level entry points.
///
/// The plain tree transform never fails; these only arise when a caller asks
/// for a depth limit or hands over raw bytes.
#[derive(Debug, Error)]
pub enum RedactionError {
    #[error("JSON parse error: {0}")]
    Parse(String),

    #[error("Maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("JSON serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for RedactionError {
    fn from(err: serde_json::Error) -> Self {
        RedactionError::Parse(err.to_string())
    }
}

/// Invalid redaction configuration, reported while wiring an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown redaction mode: {0} (expected mask, nullify or remove)")]
    UnknownMode(String),

    #[error("Unknown number handling: {0} (expected preserve or float64)")]
    UnknownNumberHandling(String),

    #[error("Sensitive keywords must not be empty strings")]
    EmptyKeyword,

    #[error("Mask placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("Maximum depth must be greater than zero")]
    ZeroDepth,
}
