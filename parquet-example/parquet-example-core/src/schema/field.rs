use parquet::{basic::LogicalType, schema::types::Type as ParquetType};
use serde::{Deserialize, Serialize};

use super::{FeatureType, Repetition};
use crate::{
    converter::ValueBuffer,
    encoder::RecordConsumer,
    error::{EncodeError, SchemaError},
    example::{Example, feature::Kind},
    value::PrimitiveValue,
};

/// One named, typed, cardinality-tagged column of a [`Schema`](super::Schema).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(rename = "type")]
    feature_type: FeatureType,
    repetition: Repetition,
}

impl Field {
    pub(crate) fn new(name: String, feature_type: FeatureType, repetition: Repetition) -> Self {
        Self {
            name,
            feature_type,
            repetition,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    /// Build the Parquet leaf column for this field.
    ///
    /// `INT64` columns carry the signed 64-bit integer annotation.
    pub fn to_physical(&self) -> Result<ParquetType, SchemaError> {
        let builder =
            ParquetType::primitive_type_builder(&self.name, self.feature_type.physical_type())
                .with_repetition(self.repetition.to_physical());
        let builder = match self.feature_type {
            FeatureType::Int64 => builder.with_logical_type(Some(LogicalType::Integer {
                bit_width: 64,
                is_signed: true,
            })),
            FeatureType::Float | FeatureType::Bytes => builder,
        };
        Ok(builder.build()?)
    }

    /// Reflect a Parquet leaf column. Group columns are rejected.
    pub fn from_physical(physical: &ParquetType) -> Result<Self, SchemaError> {
        if !physical.is_primitive() {
            return Err(SchemaError::NotPrimitive(physical.name().to_string()));
        }
        let info = physical.get_basic_info();
        if !info.has_repetition() {
            return Err(SchemaError::MissingRepetition(physical.name().to_string()));
        }
        if physical.name().is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        Ok(Self::new(
            physical.name().to_string(),
            FeatureType::from_physical(physical.get_physical_type())?,
            Repetition::from_physical(info.repetition()),
        ))
    }

    /// Emit this field's values from `example` as column `index`.
    ///
    /// A missing feature, or one with no list set, counts as zero values.
    /// Nothing is emitted for zero values.
    pub fn write<C>(
        &self,
        index: usize,
        consumer: &mut C,
        example: &Example,
    ) -> Result<(), EncodeError>
    where
        C: RecordConsumer + ?Sized,
    {
        let kind = example.get(&self.name).and_then(|f| f.kind.as_ref());
        let count = kind.map_or(0, Kind::len);
        if let Some(found) = kind.map(Kind::feature_type) {
            if found != self.feature_type {
                return Err(EncodeError::FeatureType {
                    field: self.name.clone(),
                    expected: self.feature_type,
                    found,
                });
            }
        }
        self.repetition.check_size(&self.name, count)?;

        let Some(kind) = kind.filter(|_| count > 0) else {
            return Ok(());
        };
        consumer.start_field(&self.name, index)?;
        match kind {
            Kind::Int64List(list) => {
                for v in &list.value {
                    consumer.add_value(PrimitiveValue::Int64(*v))?;
                }
            }
            Kind::FloatList(list) => {
                for v in &list.value {
                    consumer.add_value(PrimitiveValue::Float(*v))?;
                }
            }
            Kind::BytesList(list) => {
                for v in &list.value {
                    consumer.add_value(PrimitiveValue::Binary(v))?;
                }
            }
        }
        consumer.end_field(&self.name, index)
    }

    pub(crate) fn new_decoder_state(&self) -> ValueBuffer {
        ValueBuffer::new(self.feature_type)
    }
}
