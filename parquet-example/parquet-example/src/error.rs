//! Error types for the Parquet file adapters.

use std::path::PathBuf;

use parquet::{basic::Type as PhysicalType, errors::ParquetError};
use parquet_example_core::{
    DecodeError, EncodeError, FeatureType, ProjectionError, SchemaError, TypeConflictError,
};

/// Invalid combination or content of read/write settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Both an input schema and input fields were given.
    #[error("an input schema and input fields cannot both be set")]
    Conflict,

    /// A configured schema string could not be parsed.
    #[error("invalid schema in '{key}': {source}")]
    InvalidSchema {
        key: &'static str,
        #[source]
        source: SchemaError,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors produced by [`ExampleWriter`](crate::ExampleWriter).
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parquet(#[from] ParquetError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The record could not be encoded; nothing of it was kept.
    #[error("failed to encode record: {0}")]
    Encode(#[from] EncodeError),

    /// Neither an explicit schema nor an output schema setting was given.
    #[error("no output schema configured")]
    SchemaNotConfigured,

    #[error("row group size must be positive")]
    InvalidRowGroupSize,
}

/// Errors produced by [`ExampleReader`](crate::ExampleReader).
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parquet(#[from] ParquetError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A requested field has no column in the file.
    #[error("column '{0}' not found in file schema")]
    MissingColumn(String),

    /// A requested field's type does not match the file column.
    #[error("column '{column}' is {actual} in the file, expected {expected}")]
    ColumnMismatch {
        column: String,
        expected: FeatureType,
        actual: String,
    },

    /// The row reader produced a value with no feature counterpart.
    #[error("unsupported value in column '{column}': {value}")]
    UnsupportedValue { column: String, value: String },
}

impl ReaderError {
    pub(crate) fn column_mismatch(
        column: &str,
        expected: FeatureType,
        actual: PhysicalType,
    ) -> Self {
        ReaderError::ColumnMismatch {
            column: column.to_string(),
            expected,
            actual: actual.to_string(),
        }
    }
}

/// Errors produced by [`infer_schema`](crate::infer_schema).
#[derive(Debug, thiserror::Error)]
pub enum InferError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReaderError,
    },

    #[error(transparent)]
    TypeConflict(#[from] TypeConflictError),

    /// The observed feature keys do not form a valid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
