use std::path::{Path, PathBuf};

use parquet::{
    basic::Compression,
    file::{
        properties::WriterProperties, reader::FileReader, serialized_reader::SerializedFileReader,
    },
};
use parquet_example::{
    Example, ExampleReader, ExampleWriter, Feature, FeatureType, ReaderError, Schema, WriterError,
    core::EncodeError, read_schema,
};
use tempfile::TempDir;

fn schema() -> Schema {
    Schema::builder()
        .required("id", FeatureType::Int64)
        .optional("score", FeatureType::Float)
        .repeated("tags", FeatureType::Bytes)
        .repeated("counts", FeatureType::Int64)
        .named("example")
        .unwrap()
}

fn record(id: i64) -> Example {
    let mut example = Example::from_features([("id", Feature::int64(vec![id]))]);
    if id % 2 == 0 {
        example.insert("score", Feature::float(vec![id as f32 / 2.0]));
    }
    let tags: Vec<String> = (0..id % 3).map(|i| format!("tag-{i}")).collect();
    if !tags.is_empty() {
        example.insert("tags", Feature::bytes(tags));
    }
    example.insert("counts", Feature::int64(vec![id; (id % 4) as usize]));
    example
}

/// `record` as read back: empty lists are omitted.
fn expected(id: i64) -> Example {
    let mut example = record(id);
    if id % 4 == 0 {
        example.features.as_mut().unwrap().feature.remove("counts");
    }
    example
}

fn write_file(dir: &TempDir, name: &str, examples: &[Example]) -> PathBuf {
    let path = dir.path().join(name);
    let mut writer = ExampleWriter::builder()
        .with_schema(schema())
        .with_row_group_size(3)
        .build(&path)
        .unwrap();
    for example in examples {
        writer.write(example).unwrap();
    }
    assert_eq!(writer.close().unwrap(), examples.len() as u64);
    path
}

fn read_all(path: &Path) -> Vec<Example> {
    ExampleReader::builder()
        .build(path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn file_round_trip_preserves_records() {
    let dir = TempDir::new().unwrap();
    let examples: Vec<_> = (0..10).map(record).collect();
    let path = write_file(&dir, "all.parquet", &examples);

    let read = read_all(&path);
    let expected: Vec<_> = (0..10).map(expected).collect();
    assert_eq!(read, expected);
}

#[test]
fn row_group_size_controls_flushes() {
    let dir = TempDir::new().unwrap();
    let examples: Vec<_> = (0..7).map(record).collect();
    let path = write_file(&dir, "groups.parquet", &examples);

    let reader = SerializedFileReader::new(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(reader.metadata().num_row_groups(), 3);
    assert_eq!(reader.metadata().file_metadata().num_rows(), 7);
}

#[test]
fn file_schema_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "schema.parquet", &[record(1)]);
    assert_eq!(read_schema(&path).unwrap(), schema());

    let reader = ExampleReader::builder().build(&path).unwrap();
    assert_eq!(reader.schema(), &schema());
}

#[test]
fn empty_file_has_schema_and_no_records() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.parquet", &[]);
    assert_eq!(read_schema(&path).unwrap(), schema());
    assert!(read_all(&path).is_empty());
}

#[test]
fn failed_write_is_rolled_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rollback.parquet");
    let mut writer = ExampleWriter::builder()
        .with_schema(schema())
        .build(&path)
        .unwrap();

    writer.write(&record(1)).unwrap();
    // `id` is already buffered when `score` fails.
    let bad = Example::from_features([
        ("id", Feature::int64(vec![99])),
        ("score", Feature::float(vec![1.0, 2.0])),
    ]);
    let err = writer.write(&bad).unwrap_err();
    assert!(matches!(err, WriterError::Encode(EncodeError::Cardinality(_))));

    let wrong_kind = Example::from_features([
        ("id", Feature::int64(vec![98])),
        ("tags", Feature::int64(vec![1])),
    ]);
    assert!(matches!(
        writer.write(&wrong_kind),
        Err(WriterError::Encode(EncodeError::FeatureType { .. }))
    ));

    writer.write(&record(2)).unwrap();
    assert_eq!(writer.close().unwrap(), 2);

    assert_eq!(read_all(&path), vec![expected(1), expected(2)]);
}

#[test]
fn missing_required_value_fails_on_write() {
    let mut buffer = Vec::new();
    let mut writer = ExampleWriter::builder()
        .with_schema(schema())
        .build_from_writer(&mut buffer)
        .unwrap();
    let err = writer
        .write(&Example::from_features([("score", Feature::float(vec![1.0]))]))
        .unwrap_err();
    assert!(err.to_string().contains("REQUIRED field 'id' has 0 values"), "{err}");
    assert_eq!(writer.close().unwrap(), 0);
}

#[test]
fn in_memory_round_trip_with_compression() {
    let mut buffer = Vec::new();
    let properties = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ExampleWriter::builder()
        .with_schema(schema())
        .with_writer_properties(properties)
        .build_from_writer(&mut buffer)
        .unwrap();
    for id in 0..5 {
        writer.write(&record(id)).unwrap();
    }
    writer.close().unwrap();

    let read: Vec<_> = ExampleReader::builder()
        .build_from_bytes(buffer)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(read, (0..5).map(expected).collect::<Vec<_>>());
}

#[test]
fn writer_requires_a_schema() {
    let mut buffer = Vec::new();
    let err = ExampleWriter::builder()
        .build_from_writer(&mut buffer)
        .err()
        .unwrap();
    assert!(matches!(err, WriterError::SchemaNotConfigured));

    let err = ExampleWriter::builder()
        .with_schema(schema())
        .with_row_group_size(0)
        .build_from_writer(&mut buffer)
        .err()
        .unwrap();
    assert!(matches!(err, WriterError::InvalidRowGroupSize));
}

#[test]
fn reading_with_stricter_schema_reports_cardinality() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "strict.parquet", &[record(0), record(1)]);

    // `score` is only present in even records.
    let strict = Schema::builder()
        .required("id", FeatureType::Int64)
        .required("score", FeatureType::Float)
        .named("example")
        .unwrap();
    let results: Vec<_> = ExampleReader::builder()
        .with_schema(strict)
        .build(&path)
        .unwrap()
        .collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ReaderError::Decode(_))));
}
