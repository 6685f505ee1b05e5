//! Textual and structured (JSON) forms of a [`Schema`].
//!
//! The textual form is the Parquet message-type syntax, e.g.
//!
//! ```text
//! message example {
//!   REQUIRED INT64 id (INTEGER(64,true));
//!   REPEATED FLOAT score;
//! }
//! ```
//!
//! The structured form is independent of Parquet:
//! `{"name":"example","fields":[{"name":"id","type":"INT64","repetition":"REQUIRED"}]}`.

use std::fmt::{self, Display, Formatter};

use parquet::schema::{parser::parse_message_type, printer::print_schema};
use serde::Deserialize;

use super::{Field, Schema};
use crate::error::SchemaError;

/// Deserialization shape of [`Schema`]; validated through the builder.
#[derive(Deserialize)]
pub(super) struct SchemaRepr {
    name: String,
    fields: Vec<Field>,
}

impl TryFrom<SchemaRepr> for Schema {
    type Error = SchemaError;

    fn try_from(repr: SchemaRepr) -> Result<Self, Self::Error> {
        repr.fields
            .into_iter()
            .fold(Schema::builder(), |builder, f| {
                builder.field(f.name(), f.feature_type(), f.repetition())
            })
            .named(repr.name)
    }
}

impl Schema {
    /// Render the Parquet message-type text for this schema.
    pub fn to_text(&self) -> Result<String, SchemaError> {
        let physical = self.to_physical()?;
        let mut out = Vec::new();
        print_schema(&mut out, &physical);
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Parse Parquet message-type text, as produced by [`to_text`](Self::to_text).
    pub fn from_text(text: &str) -> Result<Self, SchemaError> {
        let physical = parse_message_type(text)?;
        Self::from_physical(&physical)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the structured form. Empty and duplicate field names are rejected.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self.to_text().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
