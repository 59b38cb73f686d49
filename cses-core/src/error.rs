/// Error types for streamflow evaluation
use thiserror::Error;

/// Main error type for evaluation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A request parameter is missing or cannot be parsed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The object store has no object under this key
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The object store could not be reached or answered with an error
    #[error("Failed to retrieve {key}: {reason}")]
    Retrieval { key: String, reason: String },

    /// The object was retrieved but its content could not be parsed
    #[error("Malformed data in {key}: {reason}")]
    MalformedData { key: String, reason: String },

    /// Observed and modeled series share no usable dates
    #[error("Alignment failed: {0}")]
    Alignment(String),

    /// A statistic is undefined for the given data
    #[error("Metric undefined: {0}")]
    Metric(String),
}

/// Coarse classification used by the fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Input,
    NotFound,
    Retrieval,
    Alignment,
    Metric,
}

impl EvalError {
    /// Classify this error. Malformed content counts as a retrieval failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::InvalidInput(_) => ErrorKind::Input,
            EvalError::NotFound(_) => ErrorKind::NotFound,
            EvalError::Retrieval { .. } | EvalError::MalformedData { .. } => ErrorKind::Retrieval,
            EvalError::Alignment(_) => ErrorKind::Alignment,
            EvalError::Metric(_) => ErrorKind::Metric,
        }
    }

    pub(crate) fn malformed(key: &str, reason: impl Into<String>) -> Self {
        EvalError::MalformedData {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Type alias for Results using EvalError
pub type Result<T> = std::result::Result<T, EvalError>;
