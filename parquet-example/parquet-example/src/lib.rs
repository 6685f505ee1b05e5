//! Read and write `tf.train.Example` records as flat Parquet files.
//!
//! [`ExampleWriter`] and [`ExampleReader`] adapt the storage-agnostic
//! converters of [`parquet_example_core`] to the `parquet` crate;
//! [`infer_schema`] derives a schema from existing files in parallel.

mod config;
mod error;
mod infer;
mod reader;
mod writer;

pub use config::{
    Configuration, INPUT_FIELDS_KEY, INPUT_SCHEMA_KEY, OUTPUT_SCHEMA_KEY, set_input_fields,
    set_input_schema, set_output_schema,
};
pub use error::{ConfigurationError, InferError, ReaderError, WriterError};
pub use infer::{infer_schema, infer_schema_from_examples};
pub use parquet_example_core as core;
pub use parquet_example_core::{Example, Feature, FeatureType, Field, Repetition, Schema};
pub use reader::{ExampleReader, ExampleReaderBuilder, read_schema};
pub use writer::{ColumnBuffers, DEFAULT_ROW_GROUP_SIZE, ExampleWriter, ExampleWriterBuilder};
