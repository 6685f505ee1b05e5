use std::sync::Arc;

use arrow::array::{ArrayRef, BinaryBuilder, Float32Builder, Int64Builder, ListBuilder};
use parquet_example_core::{FeatureType, Repetition};

use crate::schema_convert::list_item_field;

/// Borrowed values of one feature in one row.
pub(super) enum Values<'a> {
    Int64(&'a [i64]),
    Float(&'a [f32]),
    Bytes(&'a [Vec<u8>]),
}

/// Column builder for one feature field; the variant fixes type and shape.
pub(super) enum ColumnBuilder {
    Int64(Int64Builder),
    Float(Float32Builder),
    Bytes(BinaryBuilder),
    Int64List(ListBuilder<Int64Builder>),
    FloatList(ListBuilder<Float32Builder>),
    BytesList(ListBuilder<BinaryBuilder>),
}

impl ColumnBuilder {
    pub(super) fn new(feature_type: FeatureType, repetition: Repetition, capacity: usize) -> Self {
        let list = repetition == Repetition::Repeated;
        match (feature_type, list) {
            (FeatureType::Int64, false) => {
                ColumnBuilder::Int64(Int64Builder::with_capacity(capacity))
            }
            (FeatureType::Float, false) => {
                ColumnBuilder::Float(Float32Builder::with_capacity(capacity))
            }
            (FeatureType::Bytes, false) => {
                ColumnBuilder::Bytes(BinaryBuilder::with_capacity(capacity, 64))
            }
            (FeatureType::Int64, true) => ColumnBuilder::Int64List(
                ListBuilder::new(Int64Builder::with_capacity(capacity.saturating_mul(4)))
                    .with_field(list_item_field(feature_type)),
            ),
            (FeatureType::Float, true) => ColumnBuilder::FloatList(
                ListBuilder::new(Float32Builder::with_capacity(capacity.saturating_mul(4)))
                    .with_field(list_item_field(feature_type)),
            ),
            (FeatureType::Bytes, true) => ColumnBuilder::BytesList(
                ListBuilder::new(BinaryBuilder::with_capacity(capacity.saturating_mul(4), 64))
                    .with_field(list_item_field(feature_type)),
            ),
        }
    }

    /// Append one row. Scalar columns take the first value or a null; the
    /// caller has already checked the count against the repetition.
    pub(super) fn append(&mut self, values: Option<Values<'_>>) {
        match (self, values) {
            (ColumnBuilder::Int64(b), Some(Values::Int64(v))) => {
                b.append_option(v.first().copied())
            }
            (ColumnBuilder::Float(b), Some(Values::Float(v))) => {
                b.append_option(v.first().copied())
            }
            (ColumnBuilder::Bytes(b), Some(Values::Bytes(v))) => b.append_option(v.first()),
            (ColumnBuilder::Int64List(b), Some(Values::Int64(v))) => {
                b.values().append_slice(v);
                b.append(true);
            }
            (ColumnBuilder::FloatList(b), Some(Values::Float(v))) => {
                b.values().append_slice(v);
                b.append(true);
            }
            (ColumnBuilder::BytesList(b), Some(Values::Bytes(v))) => {
                for item in v {
                    b.values().append_value(item);
                }
                b.append(true);
            }
            (ColumnBuilder::Int64(b), _) => b.append_null(),
            (ColumnBuilder::Float(b), _) => b.append_null(),
            (ColumnBuilder::Bytes(b), _) => b.append_null(),
            // An absent repeated feature is an empty list, not a null.
            (ColumnBuilder::Int64List(b), _) => b.append(true),
            (ColumnBuilder::FloatList(b), _) => b.append(true),
            (ColumnBuilder::BytesList(b), _) => b.append(true),
        }
    }

    pub(super) fn finish(self) -> ArrayRef {
        match self {
            ColumnBuilder::Int64(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Float(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Bytes(mut b) => Arc::new(b.finish()),
            ColumnBuilder::Int64List(mut b) => Arc::new(b.finish()),
            ColumnBuilder::FloatList(mut b) => Arc::new(b.finish()),
            ColumnBuilder::BytesList(mut b) => Arc::new(b.finish()),
        }
    }
}
