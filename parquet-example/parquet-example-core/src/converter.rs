//! Push-driven record assembly.
//!
//! A column reader delivers one record as
//! `start_record`, any number of `on_value(index, value)` calls, then
//! `end_record`. [`ExampleConverter`] buffers the values per field and turns
//! them into an [`Example`] once the record is complete. It holds no
//! reference to the storage engine, so any reader can drive it through a thin
//! adapter.

use crate::{
    error::DecodeError,
    example::{BytesList, Example, Feature, Features, FloatList, Int64List, feature::Kind},
    schema::{FeatureType, Schema},
    value::PrimitiveValue,
};

/// Per-field accumulator of one record's values.
#[derive(Debug, Clone)]
pub(crate) enum ValueBuffer {
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Bytes(Vec<Vec<u8>>),
}

impl ValueBuffer {
    pub(crate) fn new(feature_type: FeatureType) -> Self {
        match feature_type {
            FeatureType::Int64 => ValueBuffer::Int64(Vec::new()),
            FeatureType::Float => ValueBuffer::Float(Vec::new()),
            FeatureType::Bytes => ValueBuffer::Bytes(Vec::new()),
        }
    }

    fn len(&self) -> usize {
        match self {
            ValueBuffer::Int64(v) => v.len(),
            ValueBuffer::Float(v) => v.len(),
            ValueBuffer::Bytes(v) => v.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self) {
        match self {
            ValueBuffer::Int64(v) => v.clear(),
            ValueBuffer::Float(v) => v.clear(),
            ValueBuffer::Bytes(v) => v.clear(),
        }
    }

    /// Append `value`, or hand it back if its kind does not match the buffer.
    fn push<'a>(&mut self, value: PrimitiveValue<'a>) -> Result<(), PrimitiveValue<'a>> {
        match (self, value) {
            (ValueBuffer::Int64(v), PrimitiveValue::Int64(x)) => v.push(x),
            (ValueBuffer::Float(v), PrimitiveValue::Float(x)) => v.push(x),
            (ValueBuffer::Bytes(v), PrimitiveValue::Binary(x)) => v.push(x.to_vec()),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    /// Move the buffered values into a feature; the buffer keeps its capacity.
    fn take_feature(&mut self) -> Feature {
        let kind = match self {
            ValueBuffer::Int64(v) => Kind::Int64List(Int64List {
                value: v.drain(..).collect(),
            }),
            ValueBuffer::Float(v) => Kind::FloatList(FloatList {
                value: v.drain(..).collect(),
            }),
            ValueBuffer::Bytes(v) => Kind::BytesList(BytesList {
                value: v.drain(..).collect(),
            }),
        };
        Feature { kind: Some(kind) }
    }
}

/// Assembles [`Example`]s from primitive-value callbacks under a [`Schema`].
///
/// One instance serves one record stream; use one converter per thread.
#[derive(Debug, Clone)]
pub struct ExampleConverter {
    schema: Schema,
    buffers: Vec<ValueBuffer>,
}

impl ExampleConverter {
    pub fn new(schema: Schema) -> Self {
        let buffers = schema.iter().map(|f| f.new_decoder_state()).collect();
        Self { schema, buffers }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn start_record(&mut self) {
        self.clear();
    }

    pub fn start_field(&self, index: usize) -> Result<(), DecodeError> {
        self.check_index(index)
    }

    pub fn end_field(&self, index: usize) -> Result<(), DecodeError> {
        self.check_index(index)
    }

    /// Append one value to field `index` of the current record.
    pub fn on_value(
        &mut self,
        index: usize,
        value: PrimitiveValue<'_>,
    ) -> Result<(), DecodeError> {
        self.check_index(index)?;
        self.buffers[index].push(value).map_err(|actual| {
            let field = &self.schema.fields()[index];
            DecodeError::UnexpectedValue {
                schema: self.schema.name().to_string(),
                field: field.name().to_string(),
                expected: field.feature_type(),
                actual: actual.kind_name(),
            }
        })
    }

    /// Finish the current record.
    ///
    /// Every field is checked against its repetition before anything is
    /// materialized; a violation fails the whole record. Fields with no
    /// values are left out of the result. The converter is ready for the next
    /// record either way.
    ///
    /// Decoded records always carry a `Features` message, even an empty one,
    /// the same shape [`Example::from_features`] builds. A source record with
    /// `features: None` therefore reads back as an empty `Features`.
    pub fn end_record(&mut self) -> Result<Example, DecodeError> {
        let violation = self
            .schema
            .iter()
            .zip(&self.buffers)
            .find_map(|(field, buffer)| {
                field
                    .repetition()
                    .check_size(field.name(), buffer.len())
                    .err()
            });
        if let Some(source) = violation {
            self.clear();
            return Err(DecodeError::Cardinality {
                schema: self.schema.name().to_string(),
                source,
            });
        }

        let mut example = Example {
            features: Some(Features::default()),
        };
        for (field, buffer) in self.schema.iter().zip(&mut self.buffers) {
            if !buffer.is_empty() {
                example.insert(field.name(), buffer.take_feature());
            }
        }
        Ok(example)
    }

    fn clear(&mut self) {
        self.buffers.iter_mut().for_each(ValueBuffer::clear);
    }

    fn check_index(&self, index: usize) -> Result<(), DecodeError> {
        if index < self.buffers.len() {
            Ok(())
        } else {
            Err(DecodeError::FieldIndex {
                schema: self.schema.name().to_string(),
                index,
                field_count: self.buffers.len(),
            })
        }
    }
}
