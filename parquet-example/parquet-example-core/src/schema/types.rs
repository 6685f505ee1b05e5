use std::fmt::{Display, Formatter, Result};

use parquet::basic::{Repetition as PhysicalRepetition, Type as PhysicalType};
use serde::{Deserialize, Serialize};

use crate::error::{CardinalityError, SchemaError};

/// Value kind of a feature, one per `tf.train.Feature` list variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureType {
    #[serde(rename = "INT64")]
    Int64,
    #[serde(rename = "FLOAT")]
    Float,
    #[serde(rename = "BYTES")]
    Bytes,
}

impl FeatureType {
    /// Map a Parquet primitive type onto a feature type.
    ///
    /// Only `INT64`, `FLOAT` and `BYTE_ARRAY` have a counterpart.
    pub fn from_physical(physical: PhysicalType) -> std::result::Result<Self, SchemaError> {
        match physical {
            PhysicalType::INT64 => Ok(FeatureType::Int64),
            PhysicalType::FLOAT => Ok(FeatureType::Float),
            PhysicalType::BYTE_ARRAY => Ok(FeatureType::Bytes),
            other => Err(SchemaError::UnsupportedType(other)),
        }
    }

    pub fn physical_type(self) -> PhysicalType {
        match self {
            FeatureType::Int64 => PhysicalType::INT64,
            FeatureType::Float => PhysicalType::FLOAT,
            FeatureType::Bytes => PhysicalType::BYTE_ARRAY,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            FeatureType::Int64 => "INT64",
            FeatureType::Float => "FLOAT",
            FeatureType::Bytes => "BYTES",
        }
    }
}

impl Display for FeatureType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Cardinality class of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Repetition {
    /// Exactly one value per record.
    #[serde(rename = "REQUIRED")]
    Required,
    /// Zero or one value per record.
    #[serde(rename = "OPTIONAL")]
    Optional,
    /// Any number of values per record.
    #[serde(rename = "REPEATED")]
    Repeated,
}

impl Repetition {
    pub fn from_physical(physical: PhysicalRepetition) -> Self {
        match physical {
            PhysicalRepetition::REQUIRED => Repetition::Required,
            PhysicalRepetition::OPTIONAL => Repetition::Optional,
            PhysicalRepetition::REPEATED => Repetition::Repeated,
        }
    }

    pub fn to_physical(self) -> PhysicalRepetition {
        match self {
            Repetition::Required => PhysicalRepetition::REQUIRED,
            Repetition::Optional => PhysicalRepetition::OPTIONAL,
            Repetition::Repeated => PhysicalRepetition::REPEATED,
        }
    }

    /// Whether a record may carry `count` values for a field of this class.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Repetition::Required => count == 1,
            Repetition::Optional => count <= 1,
            Repetition::Repeated => true,
        }
    }

    /// Like [`accepts`](Self::accepts), but reports the violation for `field`.
    pub fn check_size(
        self,
        field: &str,
        count: usize,
    ) -> std::result::Result<(), CardinalityError> {
        if self.accepts(count) {
            Ok(())
        } else {
            Err(CardinalityError {
                field: field.to_string(),
                repetition: self,
                count,
            })
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Repetition::Required => "REQUIRED",
            Repetition::Optional => "OPTIONAL",
            Repetition::Repeated => "REPEATED",
        }
    }
}

impl Display for Repetition {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.name())
    }
}
