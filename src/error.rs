//! Error types for dataset handling and model fitting/serving.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the students CSV.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV missing column '{0}'")]
    MissingColumn(String),
}

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by the regressor, the feature encoder and artifact I/O.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Cannot train on an empty dataset")]
    EmptyDataset,

    #[error("Model expects {model} features but the column list has {columns}")]
    ColumnMismatch { model: usize, columns: usize },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
