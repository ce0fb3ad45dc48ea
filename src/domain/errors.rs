use crate::domain::fields::Field;
use thiserror::Error;

/// Errors raised while aligning operator input with the model's schema.
///
/// Everything except `ModelInvocationFailure` is detected before the model
/// is invoked.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("unknown value {value:?} for {field}; known values include: {}", .examples.join(", "))]
    UnknownCategory {
        field: Field,
        value: String,
        examples: Vec<String>,
    },

    #[error("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },

    #[error("{field} expects a numeric value, got {value:?}")]
    MalformedNumericInput { field: Field, value: String },

    #[error("model invocation failed: {reason}")]
    ModelInvocationFailure { reason: String },
}

/// Errors raised while loading the reference dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("dataset contains no rows")]
    Empty,
}
