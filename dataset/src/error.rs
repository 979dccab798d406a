use crate::column::DataType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' has type {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Filter mask has {actual} entries, dataset has {expected} rows")]
    MaskLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
