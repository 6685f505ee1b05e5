use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use parquet_example_core::{FeatureType, Field as FeatureField, Repetition, Schema as FeatureSchema};

/// Converts a feature schema into an Arrow `Schema`, keeping field order.
pub fn schema_to_arrow_schema(schema: &FeatureSchema) -> Schema {
    let arrow_fields: Vec<Field> = schema.iter().map(feature_field_to_arrow_field).collect();
    Schema::new(arrow_fields)
}

/// Arrow type of a single value of `feature_type`.
pub fn feature_data_type(feature_type: FeatureType) -> DataType {
    match feature_type {
        FeatureType::Int64 => DataType::Int64,
        FeatureType::Float => DataType::Float32,
        FeatureType::Bytes => DataType::Binary,
    }
}

pub(crate) fn list_item_field(feature_type: FeatureType) -> Arc<Field> {
    Arc::new(Field::new("item", feature_data_type(feature_type), false))
}

fn feature_field_to_arrow_field(f: &FeatureField) -> Field {
    match f.repetition() {
        Repetition::Required => Field::new(f.name(), feature_data_type(f.feature_type()), false),
        Repetition::Optional => Field::new(f.name(), feature_data_type(f.feature_type()), true),
        Repetition::Repeated => Field::new(
            f.name(),
            DataType::List(list_item_field(f.feature_type())),
            false,
        ),
    }
}
