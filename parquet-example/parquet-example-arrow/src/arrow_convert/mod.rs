//! Conversion from decoded [`Example`] rows to Arrow `RecordBatch`.

mod builder;

use std::sync::Arc;

use arrow::{array::ArrayRef, record_batch::RecordBatch};
use parquet_example_core::{Example, Field, Schema, feature::Kind};

use self::builder::{ColumnBuilder, Values};
use crate::{error::ArrowConvertError, schema_convert::schema_to_arrow_schema};

/// Convert decoded rows to a RecordBatch whose schema is
/// [`schema_to_arrow_schema`] of `schema`.
///
/// Features not in `schema` are ignored. Every row is checked against the
/// field repetitions, so rows read under a different schema are rejected
/// rather than truncated.
pub fn examples_to_record_batch(
    schema: &Schema,
    rows: &[Example],
) -> Result<RecordBatch, ArrowConvertError> {
    if rows.is_empty() {
        return Err(ArrowConvertError::EmptyRows);
    }

    let arrow_schema = Arc::new(schema_to_arrow_schema(schema));
    let arrays = schema
        .iter()
        .map(|field| build_column(field, rows))
        .collect::<Result<Vec<ArrayRef>, _>>()?;
    Ok(RecordBatch::try_new(arrow_schema, arrays)?)
}

fn build_column(field: &Field, rows: &[Example]) -> Result<ArrayRef, ArrowConvertError> {
    let mut builder = ColumnBuilder::new(field.feature_type(), field.repetition(), rows.len());
    for (row, example) in rows.iter().enumerate() {
        let kind = example.get(field.name()).and_then(|f| f.kind.as_ref());
        if let Some(found) = kind.map(Kind::feature_type) {
            if found != field.feature_type() {
                return Err(ArrowConvertError::FeatureType {
                    row,
                    field: field.name().to_string(),
                    expected: field.feature_type(),
                    found,
                });
            }
        }
        let count = kind.map_or(0, Kind::len);
        field
            .repetition()
            .check_size(field.name(), count)
            .map_err(|source| ArrowConvertError::Cardinality { row, source })?;

        builder.append(kind.map(|kind| match kind {
            Kind::Int64List(list) => Values::Int64(&list.value),
            Kind::FloatList(list) => Values::Float(&list.value),
            Kind::BytesList(list) => Values::Bytes(&list.value),
        }));
    }
    Ok(builder.finish())
}
