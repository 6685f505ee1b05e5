//! Primitive values exchanged with the columnar side.

use crate::schema::FeatureType;

/// One leaf value, as delivered by a column reader or handed to a
/// [`RecordConsumer`](crate::RecordConsumer).
///
/// Binary values borrow from the producer; consumers that keep them must copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue<'a> {
    Int64(i64),
    Float(f32),
    Binary(&'a [u8]),
}

impl PrimitiveValue<'_> {
    pub fn feature_type(&self) -> FeatureType {
        match self {
            PrimitiveValue::Int64(_) => FeatureType::Int64,
            PrimitiveValue::Float(_) => FeatureType::Float,
            PrimitiveValue::Binary(_) => FeatureType::Bytes,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PrimitiveValue::Int64(_) => "Int64",
            PrimitiveValue::Float(_) => "Float",
            PrimitiveValue::Binary(_) => "Binary",
        }
    }
}
