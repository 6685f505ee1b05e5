//! Schema model: an ordered, name-unique list of typed feature columns.

mod field;
mod format;
mod types;

use std::{collections::HashSet, sync::Arc};

use parquet::schema::types::Type as ParquetType;
use serde::{Deserialize, Serialize};

pub use field::Field;
pub use types::{FeatureType, Repetition};

use crate::error::SchemaError;

/// Immutable schema shared by the encode, decode and inference paths.
///
/// Field order is the physical column order and the write order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "format::SchemaRepr")]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Assemble a schema whose field names are already known to be unique.
    pub(crate) fn from_parts_unchecked(name: String, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Build the Parquet message type: one leaf column per field, in order.
    pub fn to_physical(&self) -> Result<ParquetType, SchemaError> {
        let columns = self
            .fields
            .iter()
            .map(|f| f.to_physical().map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ParquetType::group_type_builder(&self.name)
            .with_fields(columns)
            .build()?)
    }

    /// Reflect a Parquet message type. Every column must be a supported leaf.
    pub fn from_physical(physical: &ParquetType) -> Result<Self, SchemaError> {
        if !physical.is_group() {
            return Err(SchemaError::NotMessage(physical.name().to_string()));
        }
        let mut builder = Schema::builder();
        for column in physical.get_fields() {
            let field = Field::from_physical(column)?;
            builder = builder.field(field.name(), field.feature_type(), field.repetition());
        }
        builder.named(physical.name())
    }
}

/// Collects fields in order and validates them when the schema is named.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    pub fn required(self, name: impl Into<String>, feature_type: FeatureType) -> Self {
        self.field(name, feature_type, Repetition::Required)
    }

    pub fn optional(self, name: impl Into<String>, feature_type: FeatureType) -> Self {
        self.field(name, feature_type, Repetition::Optional)
    }

    pub fn repeated(self, name: impl Into<String>, feature_type: FeatureType) -> Self {
        self.field(name, feature_type, Repetition::Repeated)
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        feature_type: FeatureType,
        repetition: Repetition,
    ) -> Self {
        self.fields
            .push(Field::new(name.into(), feature_type, repetition));
        self
    }

    /// Finish the schema.
    ///
    /// Fails on the first empty or duplicate field name, in insertion order.
    pub fn named(self, name: impl Into<String>) -> Result<Schema, SchemaError> {
        {
            let mut names = HashSet::with_capacity(self.fields.len());
            for field in &self.fields {
                if field.name().is_empty() {
                    return Err(SchemaError::EmptyFieldName);
                }
                if !names.insert(field.name()) {
                    return Err(SchemaError::DuplicateField(field.name().to_string()));
                }
            }
        }
        Ok(Schema::from_parts_unchecked(name.into(), self.fields))
    }
}
