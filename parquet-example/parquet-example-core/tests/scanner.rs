use parquet_example_core::{
    Example, ExampleScanner, Feature, FeatureType, Repetition, Schema, SchemaError,
    TypeConflictError,
};

fn a(values: &[i64]) -> Example {
    Example::from_features([("a", Feature::int64(values))])
}

fn empty() -> Example {
    Example::from_features(Vec::<(String, Feature)>::new())
}

fn infer(examples: &[Example]) -> Result<Schema, TypeConflictError> {
    let mut scanner = ExampleScanner::new("inferred");
    scanner.scan_all(examples)?;
    Ok(scanner.into_schema().unwrap())
}

fn only_field(schema: &Schema) -> (FeatureType, Repetition) {
    assert_eq!(schema.len(), 1, "{schema:?}");
    let field = &schema.fields()[0];
    (field.feature_type(), field.repetition())
}

#[test]
fn multiple_values_infer_repeated() {
    let schema = infer(&[a(&[1]), a(&[1, 2]), empty()]).unwrap();
    assert_eq!(only_field(&schema), (FeatureType::Int64, Repetition::Repeated));
}

#[test]
fn single_value_everywhere_infers_required() {
    let schema = infer(&[a(&[1]), a(&[1])]).unwrap();
    assert_eq!(only_field(&schema), (FeatureType::Int64, Repetition::Required));
}

#[test]
fn missing_in_some_records_infers_optional() {
    let schema = infer(&[a(&[1]), empty()]).unwrap();
    assert_eq!(only_field(&schema), (FeatureType::Int64, Repetition::Optional));

    let schema = infer(&[a(&[1]), a(&[])]).unwrap();
    assert_eq!(only_field(&schema), (FeatureType::Int64, Repetition::Optional));
}

#[test]
fn fields_without_values_are_dropped() {
    let examples = [
        Example::from_features([
            ("a", Feature::int64([1])),
            ("b", Feature::float(Vec::<f32>::new())),
        ]),
        Example::from_features([("a", Feature::int64([2])), ("c", Feature::default())]),
    ];
    let schema = infer(&examples).unwrap();
    let names: Vec<_> = schema.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["a"]);
}

#[test]
fn conflicting_types_fail_naming_both() {
    let examples = [a(&[1]), Example::from_features([("a", Feature::bytes(["x"]))])];
    let err = infer(&examples).unwrap_err();
    assert_eq!(
        err,
        TypeConflictError {
            field: "a".to_string(),
            existing: FeatureType::Int64,
            found: FeatureType::Bytes,
        }
    );
    assert_eq!(
        err.to_string(),
        "incompatible types for field 'a': INT64 != BYTES"
    );
}

#[test]
fn typed_empty_list_fixes_the_type() {
    let examples = [
        Example::from_features([("a", Feature::float(Vec::<f32>::new()))]),
        a(&[1]),
    ];
    let err = infer(&examples).unwrap_err();
    assert_eq!(err.existing, FeatureType::Float);
    assert_eq!(err.found, FeatureType::Int64);
}

#[test]
fn untyped_feature_does_not_fix_the_type() {
    let examples = [Example::from_features([("a", Feature::default())]), a(&[1])];
    let schema = infer(&examples).unwrap();
    assert_eq!(only_field(&schema), (FeatureType::Int64, Repetition::Optional));
}

#[test]
fn fields_keep_first_seen_order() {
    let examples = [
        Example::from_features([("z", Feature::int64([1]))]),
        Example::from_features([("m", Feature::float([1.0])), ("z", Feature::int64([1]))]),
        Example::from_features([("a", Feature::bytes(["x", "y"])), ("z", Feature::int64([1]))]),
    ];
    let schema = infer(&examples).unwrap();
    let fields: Vec<_> = schema
        .iter()
        .map(|f| (f.name(), f.feature_type(), f.repetition()))
        .collect();
    assert_eq!(
        fields,
        [
            ("z", FeatureType::Int64, Repetition::Required),
            ("m", FeatureType::Float, Repetition::Optional),
            ("a", FeatureType::Bytes, Repetition::Repeated),
        ]
    );
}

#[test]
fn merge_matches_single_pass() {
    let corpus = [
        Example::from_features([("a", Feature::int64([1])), ("b", Feature::bytes(["x"]))]),
        Example::from_features([("a", Feature::int64([2]))]),
        Example::from_features([("c", Feature::float([1.0, 2.0])), ("a", Feature::int64([3]))]),
        Example::from_features([("b", Feature::bytes(["y"])), ("a", Feature::int64([4]))]),
    ];
    let single = infer(&corpus).unwrap();

    for split in 0..=corpus.len() {
        let (left, right) = corpus.split_at(split);
        let mut l = ExampleScanner::new("inferred");
        l.scan_all(left).unwrap();
        let mut r = ExampleScanner::new("inferred");
        r.scan_all(right).unwrap();
        let merged = l.merge(r).unwrap();
        assert_eq!(merged.total(), corpus.len() as u64);
        assert_eq!(merged.into_schema().unwrap(), single, "split at {split}");
    }
}

#[test]
fn merge_detects_cross_partition_conflicts() {
    let mut l = ExampleScanner::new("s");
    l.scan(&a(&[1])).unwrap();
    let mut r = ExampleScanner::new("s");
    r.scan(&Example::from_features([("a", Feature::float([1.0]))]))
        .unwrap();
    let err = l.merge(r).unwrap_err();
    assert_eq!(err.existing, FeatureType::Int64);
    assert_eq!(err.found, FeatureType::Float);
}

#[test]
fn scanner_counts_records() {
    let mut scanner = ExampleScanner::new("s");
    assert_eq!(scanner.total(), 0);
    scanner.scan_all(&[a(&[1]), empty(), empty()]).unwrap();
    assert_eq!(scanner.total(), 3);
    let schema = scanner.into_schema().unwrap();
    assert_eq!(schema.name(), "s");
    assert_eq!(only_field(&schema), (FeatureType::Int64, Repetition::Optional));
}

#[test]
fn empty_corpus_infers_empty_schema() {
    let schema = infer(&[]).unwrap();
    assert!(schema.is_empty());
}

#[test]
fn empty_feature_key_is_not_a_field_name() {
    let mut scanner = ExampleScanner::new("s");
    scanner
        .scan(&Example::from_features([("", Feature::int64([1]))]))
        .unwrap();
    let err = scanner.into_schema().unwrap_err();
    assert!(matches!(err, SchemaError::EmptyFieldName), "{err}");
}

#[test]
fn inferred_schema_survives_text_and_json() {
    let examples = [
        Example::from_features([("a", Feature::int64([1])), ("b", Feature::bytes(["x", "y"]))]),
        Example::from_features([("a", Feature::int64([2])), ("c", Feature::float([0.5]))]),
    ];
    let schema = infer(&examples).unwrap();
    assert_eq!(Schema::from_text(&schema.to_text().unwrap()).unwrap(), schema);
    assert_eq!(Schema::from_json(&schema.to_json().unwrap()).unwrap(), schema);
}
