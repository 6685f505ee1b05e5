//! Error types for the schema model and the record converters.

use parquet::{basic::Type as PhysicalType, errors::ParquetError};

use crate::schema::{FeatureType, Repetition};

/// Error returned while building, reflecting or (de)serializing a
/// [`Schema`](crate::Schema).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two fields share the same name.
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),

    #[error("field name must not be empty")]
    EmptyFieldName,

    /// A group (nested) column was found where only leaf columns are allowed.
    #[error("only primitive fields are supported, '{0}' is a group")]
    NotPrimitive(String),

    /// The physical schema root is a leaf column instead of a message.
    #[error("expected a message type, '{0}' is a primitive column")]
    NotMessage(String),

    #[error("unsupported primitive type: {0}")]
    UnsupportedType(PhysicalType),

    #[error("column '{0}' has no repetition")]
    MissingRepetition(String),

    /// The structured (JSON) form could not be parsed or failed validation.
    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// The textual form could not be parsed, or the physical type could not be built.
    #[error(transparent)]
    Parquet(#[from] ParquetError),
}

/// A value count that violates a field's [`Repetition`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{repetition} field '{field}' has {count} values")]
pub struct CardinalityError {
    pub field: String,
    pub repetition: Repetition,
    pub count: usize,
}

/// Error returned by [`ExampleConverter`](crate::ExampleConverter) while
/// assembling a record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode record of schema '{schema}': {source}")]
    Cardinality {
        schema: String,
        #[source]
        source: CardinalityError,
    },

    #[error("field index {index} out of range for schema '{schema}' ({field_count} fields)")]
    FieldIndex {
        schema: String,
        index: usize,
        field_count: usize,
    },

    #[error("unexpected {actual} value for {expected} field '{schema}#{field}'")]
    UnexpectedValue {
        schema: String,
        field: String,
        expected: FeatureType,
        actual: &'static str,
    },
}

/// Error returned while projecting an `Example` onto column writes.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Cardinality(#[from] CardinalityError),

    /// The record holds a list of a different kind than the schema declares.
    #[error("field '{field}' expects {expected} values, record holds {found}")]
    FeatureType {
        field: String,
        expected: FeatureType,
        found: FeatureType,
    },

    #[error("column '{field}' expects {expected} values, got {actual}")]
    ColumnType {
        field: String,
        expected: FeatureType,
        actual: &'static str,
    },

    #[error("field index {index} out of range ({field_count} columns)")]
    FieldIndex { index: usize, field_count: usize },

    #[error("record consumer protocol violation: {0}")]
    Protocol(&'static str),
}

/// Two incompatible types observed for one field during schema inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("incompatible types for field '{field}': {existing} != {found}")]
pub struct TypeConflictError {
    pub field: String,
    pub existing: FeatureType,
    pub found: FeatureType,
}

/// Error returned by [`project_schema`](crate::project_schema).
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// Requested names missing from the superset, sorted.
    #[error("invalid fields: {0:?}")]
    UnknownFields(Vec<String>),

    #[error("expected a message type, '{0}' is a primitive column")]
    NotMessage(String),

    #[error(transparent)]
    Parquet(#[from] ParquetError),
}
