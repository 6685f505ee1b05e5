//! Storage-agnostic core of `parquet-example`.
//!
//! This crate maps flat Parquet rows onto `tf.train.Example` records without
//! touching files: the [`Schema`] model, the push-driven [`ExampleConverter`]
//! (read side), [`write_example`] over a [`RecordConsumer`] (write side),
//! [`ExampleScanner`] for schema inference and [`project_schema`].

mod converter;
mod encoder;
mod error;
pub mod example;
mod projection;
mod scanner;
mod schema;
mod value;

pub use converter::ExampleConverter;
pub use encoder::{RecordConsumer, write_example};
pub use error::{
    CardinalityError, DecodeError, EncodeError, ProjectionError, SchemaError, TypeConflictError,
};
pub use example::{BytesList, Example, Feature, Features, FloatList, Int64List, feature};
pub use projection::project_schema;
pub use scanner::ExampleScanner;
pub use schema::{FeatureType, Field, Repetition, Schema, SchemaBuilder};
pub use value::PrimitiveValue;
