use std::sync::Arc;

use parquet::{
    basic::{Repetition as PhysicalRepetition, Type as PhysicalType},
    schema::{parser::parse_message_type, types::Type as ParquetType},
};
use parquet_example_core::{FeatureType, Field, Repetition, Schema, SchemaError};

fn sample_schema() -> Schema {
    Schema::builder()
        .required("id", FeatureType::Int64)
        .optional("score", FeatureType::Float)
        .repeated("tags", FeatureType::Bytes)
        .repeated("ids", FeatureType::Int64)
        .named("example")
        .unwrap()
}

#[test]
fn builder_keeps_field_order() {
    let schema = sample_schema();
    let names: Vec<_> = schema.iter().map(Field::name).collect();
    assert_eq!(names, ["id", "score", "tags", "ids"]);
    assert_eq!(schema.name(), "example");
    assert_eq!(schema.index_of("tags"), Some(2));
    assert_eq!(
        schema.field("score").map(Field::repetition),
        Some(Repetition::Optional)
    );
    assert!(schema.field("missing").is_none());
}

#[test]
fn builder_rejects_duplicate_names() {
    let err = Schema::builder()
        .required("a", FeatureType::Int64)
        .optional("b", FeatureType::Float)
        .repeated("a", FeatureType::Bytes)
        .named("dup")
        .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField(name) if name == "a"));
}

#[test]
fn builder_rejects_empty_name() {
    let err = Schema::builder()
        .required("", FeatureType::Int64)
        .named("empty")
        .unwrap_err();
    assert!(matches!(err, SchemaError::EmptyFieldName));
}

#[test]
fn empty_schema_is_valid() {
    let schema = Schema::builder().named("nothing").unwrap();
    assert!(schema.is_empty());
    let back = Schema::from_physical(&schema.to_physical().unwrap()).unwrap();
    assert_eq!(back, schema);
}

#[test]
fn physical_round_trip_preserves_schema() {
    let schema = sample_schema();
    let physical = schema.to_physical().unwrap();
    assert!(physical.is_group());
    assert_eq!(physical.get_fields().len(), 4);
    assert_eq!(Schema::from_physical(&physical).unwrap(), schema);
}

#[test]
fn int64_columns_carry_signed_integer_annotation() {
    let schema = sample_schema();
    let text = schema.to_text().unwrap();
    assert!(text.contains("INTEGER(64,true)"), "{text}");
    assert!(text.contains("REPEATED BYTE_ARRAY tags"), "{text}");
}

#[test]
fn text_round_trip_preserves_schema() {
    let schema = sample_schema();
    let text = schema.to_text().unwrap();
    assert_eq!(Schema::from_text(&text).unwrap(), schema);
    assert_eq!(schema.to_string(), text);
}

#[test]
fn from_text_accepts_unannotated_columns() {
    let schema = Schema::from_text(
        "message m {
            required int64 a;
            optional float b;
            repeated binary c;
        }",
    )
    .unwrap();
    let expected = Schema::builder()
        .required("a", FeatureType::Int64)
        .optional("b", FeatureType::Float)
        .repeated("c", FeatureType::Bytes)
        .named("m")
        .unwrap();
    assert_eq!(schema, expected);
}

#[test]
fn reflection_rejects_group_columns() {
    let physical = parse_message_type(
        "message m {
            required int64 a;
            required group nested {
                required int64 b;
            }
        }",
    )
    .unwrap();
    let err = Schema::from_physical(&physical).unwrap_err();
    assert!(matches!(err, SchemaError::NotPrimitive(name) if name == "nested"));
}

#[test]
fn reflection_rejects_unsupported_primitives() {
    for (column, physical_type) in [
        ("required int32 a;", PhysicalType::INT32),
        ("required double a;", PhysicalType::DOUBLE),
        ("required boolean a;", PhysicalType::BOOLEAN),
    ] {
        let physical = parse_message_type(&format!("message m {{ {column} }}")).unwrap();
        let err = Schema::from_physical(&physical).unwrap_err();
        assert!(
            matches!(err, SchemaError::UnsupportedType(t) if t == physical_type),
            "{column}: {err}"
        );
    }
}

#[test]
fn reflection_rejects_leaf_root() {
    let leaf = ParquetType::primitive_type_builder("a", PhysicalType::INT64)
        .with_repetition(PhysicalRepetition::REQUIRED)
        .build()
        .unwrap();
    assert!(matches!(
        Schema::from_physical(&leaf),
        Err(SchemaError::NotMessage(_))
    ));
    assert!(matches!(
        Field::from_physical(&leaf),
        Ok(field) if field.feature_type() == FeatureType::Int64
    ));
}

#[test]
fn field_from_physical_rejects_group() {
    let inner = ParquetType::primitive_type_builder("x", PhysicalType::FLOAT)
        .with_repetition(PhysicalRepetition::OPTIONAL)
        .build()
        .unwrap();
    let group = ParquetType::group_type_builder("g")
        .with_repetition(PhysicalRepetition::OPTIONAL)
        .with_fields(vec![Arc::new(inner)])
        .build()
        .unwrap();
    assert!(matches!(
        Field::from_physical(&group),
        Err(SchemaError::NotPrimitive(_))
    ));
}

#[test]
fn json_round_trip_preserves_schema() {
    let schema = sample_schema();
    let json = schema.to_json().unwrap();
    assert_eq!(Schema::from_json(&json).unwrap(), schema);
    let pretty = schema.to_json_pretty().unwrap();
    assert_eq!(Schema::from_json(&pretty).unwrap(), schema);
}

#[test]
fn json_uses_upper_case_names() {
    let schema = Schema::builder()
        .optional("score", FeatureType::Float)
        .named("s")
        .unwrap();
    assert_eq!(
        schema.to_json().unwrap(),
        r#"{"name":"s","fields":[{"name":"score","type":"FLOAT","repetition":"OPTIONAL"}]}"#
    );
}

#[test]
fn json_rejects_duplicate_fields() {
    let json = r#"{"name":"s","fields":[
        {"name":"a","type":"INT64","repetition":"REQUIRED"},
        {"name":"a","type":"BYTES","repetition":"REPEATED"}
    ]}"#;
    let err = Schema::from_json(json).unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
    assert!(err.to_string().contains("duplicate field name 'a'"), "{err}");
}

#[test]
fn json_rejects_unknown_type() {
    let json = r#"{"name":"s","fields":[{"name":"a","type":"DOUBLE","repetition":"REQUIRED"}]}"#;
    assert!(matches!(Schema::from_json(json), Err(SchemaError::Json(_))));
}

#[test]
fn feature_type_maps_physical_types_both_ways() {
    for feature_type in [FeatureType::Int64, FeatureType::Float, FeatureType::Bytes] {
        assert_eq!(
            FeatureType::from_physical(feature_type.physical_type()).unwrap(),
            feature_type
        );
    }
    for repetition in [
        Repetition::Required,
        Repetition::Optional,
        Repetition::Repeated,
    ] {
        assert_eq!(Repetition::from_physical(repetition.to_physical()), repetition);
    }
}

#[test]
fn check_size_follows_repetition() {
    assert!(Repetition::Required.check_size("a", 1).is_ok());
    assert!(Repetition::Optional.check_size("a", 0).is_ok());
    assert!(Repetition::Optional.check_size("a", 1).is_ok());
    for count in [0, 1, 2, 100] {
        assert!(Repetition::Repeated.check_size("a", count).is_ok());
    }

    let err = Repetition::Required.check_size("a", 0).unwrap_err();
    assert_eq!(err.field, "a");
    assert_eq!(err.repetition, Repetition::Required);
    assert_eq!(err.count, 0);
    assert_eq!(err.to_string(), "REQUIRED field 'a' has 0 values");

    assert!(Repetition::Required.check_size("a", 2).is_err());
    assert!(Repetition::Optional.check_size("a", 2).is_err());
}
