use arrow::error::ArrowError;
use parquet_example_core::{CardinalityError, FeatureType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error("Cannot create RecordBatch from empty rows")]
    EmptyRows,
    #[error("row {row}: {source}")]
    Cardinality {
        row: usize,
        #[source]
        source: CardinalityError,
    },
    #[error("row {row}: field '{field}' expects {expected} values, found {found}")]
    FeatureType {
        row: usize,
        field: String,
        expected: FeatureType,
        found: FeatureType,
    },
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
