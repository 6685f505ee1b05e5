//! Arrow integration layer for `parquet-example`.
//!
//! This crate exposes two entry points:
//! - [`schema_to_arrow_schema`] maps a feature [`Schema`](parquet_example_core::Schema)
//!   to an Arrow `Schema`.
//! - [`examples_to_record_batch`] converts decoded [`Example`](parquet_example_core::Example)
//!   rows into an Arrow `RecordBatch` with that schema.
//!
//! `REQUIRED` and `OPTIONAL` fields become scalar columns (non-null and
//! nullable); `REPEATED` fields become non-null `List<item>` columns.
//!
//! # Typical Flow
//! ```rust
//! use parquet_example_arrow::{examples_to_record_batch, schema_to_arrow_schema};
//! use parquet_example_core::{Example, Feature, FeatureType, Schema};
//!
//! let schema = Schema::builder()
//!     .required("id", FeatureType::Int64)
//!     .named("example")
//!     .unwrap();
//! let rows = vec![Example::from_features([("id", Feature::int64(vec![1]))])];
//! let batch = examples_to_record_batch(&schema, &rows).unwrap();
//! assert_eq!(batch.schema().as_ref(), &schema_to_arrow_schema(&schema));
//! ```
mod arrow_convert;
mod error;
mod schema_convert;

pub use arrow_convert::examples_to_record_batch;
pub use error::ArrowConvertError;
pub use schema_convert::{feature_data_type, schema_to_arrow_schema};
