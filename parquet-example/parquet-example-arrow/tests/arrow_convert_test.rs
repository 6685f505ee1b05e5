use arrow::{
    array::{Array, BinaryArray, Float32Array, Int64Array, ListArray},
    datatypes::DataType,
};
use parquet_example_arrow::{ArrowConvertError, examples_to_record_batch};
use parquet_example_core::{Example, Feature, FeatureType, Schema};

fn test_schema() -> Schema {
    Schema::builder()
        .required("id", FeatureType::Int64)
        .optional("score", FeatureType::Float)
        .repeated("tags", FeatureType::Bytes)
        .repeated("ids", FeatureType::Int64)
        .named("example")
        .unwrap()
}

fn rows() -> Vec<Example> {
    vec![
        Example::from_features([
            ("id", Feature::int64(vec![1])),
            ("score", Feature::float(vec![0.5])),
            ("tags", Feature::bytes(vec!["a", "b"])),
            ("ids", Feature::int64(vec![10, 11, 12])),
            ("ignored", Feature::float(vec![9.0, 9.0])),
        ]),
        Example::from_features([("id", Feature::int64(vec![2]))]),
    ]
}

#[test]
fn converts_scalar_columns() {
    let batch = examples_to_record_batch(&test_schema(), &rows()).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 4);

    let id = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(id.value(0), 1);
    assert_eq!(id.value(1), 2);
    assert_eq!(id.null_count(), 0);

    let score = batch
        .column(1)
        .as_any()
        .downcast_ref::<Float32Array>()
        .unwrap();
    assert!(score.is_valid(0));
    assert_eq!(score.value(0), 0.5);
    assert!(score.is_null(1));
}

#[test]
fn converts_repeated_columns_to_lists() {
    let batch = examples_to_record_batch(&test_schema(), &rows()).unwrap();

    let tags = batch
        .column(2)
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert_eq!(tags.null_count(), 0);
    assert_eq!(tags.value_length(0), 2);
    assert_eq!(tags.value_length(1), 0);
    let first = tags.value(0);
    let first = first.as_any().downcast_ref::<BinaryArray>().unwrap();
    assert_eq!(first.value(0), b"a");
    assert_eq!(first.value(1), b"b");

    let ids = batch
        .column(3)
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert!(matches!(ids.value_type(), DataType::Int64));
    let first = ids.value(0);
    let first = first.as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first.value(0), 10);
    assert_eq!(first.value(2), 12);
}

#[test]
fn empty_rows_are_rejected() {
    let err = examples_to_record_batch(&test_schema(), &[]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::EmptyRows));
}

#[test]
fn cardinality_violations_name_the_row() {
    let rows = vec![
        Example::from_features([("id", Feature::int64(vec![1]))]),
        Example::from_features([("score", Feature::float(vec![1.0]))]),
    ];
    let err = examples_to_record_batch(&test_schema(), &rows).unwrap_err();
    match err {
        ArrowConvertError::Cardinality { row, source } => {
            assert_eq!(row, 1);
            assert_eq!(source.field, "id");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn mismatched_feature_kind_is_rejected() {
    let rows = vec![Example::from_features([
        ("id", Feature::int64(vec![1])),
        ("tags", Feature::float(vec![1.0])),
    ])];
    let err = examples_to_record_batch(&test_schema(), &rows).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::FeatureType {
            row: 0,
            expected: FeatureType::Bytes,
            found: FeatureType::Float,
            ..
        }
    ));
}
