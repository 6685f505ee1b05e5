//! Session configuration shared by readers and writers.

use std::collections::BTreeMap;

use parquet_example_core::Schema;

use crate::error::ConfigurationError;

/// Textual schema used to read files.
pub const INPUT_SCHEMA_KEY: &str = "parquet.tensorflow.example.input.schema";
/// Comma-separated column names to read.
pub const INPUT_FIELDS_KEY: &str = "parquet.tensorflow.example.input.fields";
/// Textual schema used to write files.
pub const OUTPUT_SCHEMA_KEY: &str = "parquet.tensorflow.example.output.schema";

/// String key/value settings, typically filled from a job configuration.
///
/// At most one of [`INPUT_SCHEMA_KEY`] and [`INPUT_FIELDS_KEY`] may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    entries: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parsed [`INPUT_SCHEMA_KEY`].
    pub fn input_schema(&self) -> Result<Option<Schema>, ConfigurationError> {
        self.check_input_keys()?;
        self.parse_schema(INPUT_SCHEMA_KEY)
    }

    /// Column names from [`INPUT_FIELDS_KEY`]; blank entries are skipped.
    pub fn input_fields(&self) -> Result<Option<Vec<String>>, ConfigurationError> {
        self.check_input_keys()?;
        Ok(self.get(INPUT_FIELDS_KEY).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect()
        }))
    }

    /// Parsed [`OUTPUT_SCHEMA_KEY`].
    pub fn output_schema(&self) -> Result<Option<Schema>, ConfigurationError> {
        self.parse_schema(OUTPUT_SCHEMA_KEY)
    }

    fn check_input_keys(&self) -> Result<(), ConfigurationError> {
        if self.contains(INPUT_SCHEMA_KEY) && self.contains(INPUT_FIELDS_KEY) {
            return Err(ConfigurationError::Conflict);
        }
        Ok(())
    }

    fn parse_schema(&self, key: &'static str) -> Result<Option<Schema>, ConfigurationError> {
        self.get(key)
            .map(|text| {
                Schema::from_text(text)
                    .map_err(|source| ConfigurationError::InvalidSchema { key, source })
            })
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Store the schema used to read files. Fails if input fields are set.
pub fn set_input_schema(
    conf: &mut Configuration,
    schema: &Schema,
) -> Result<(), ConfigurationError> {
    if conf.contains(INPUT_FIELDS_KEY) {
        return Err(ConfigurationError::Conflict);
    }
    conf.set(INPUT_SCHEMA_KEY, schema.to_text()?);
    Ok(())
}

/// Store the column names to read. Fails if an input schema is set.
pub fn set_input_fields<I, S>(conf: &mut Configuration, fields: I) -> Result<(), ConfigurationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if conf.contains(INPUT_SCHEMA_KEY) {
        return Err(ConfigurationError::Conflict);
    }
    let joined = fields
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",");
    conf.set(INPUT_FIELDS_KEY, joined);
    Ok(())
}

/// Store the schema used to write files.
pub fn set_output_schema(
    conf: &mut Configuration,
    schema: &Schema,
) -> Result<(), ConfigurationError> {
    conf.set(OUTPUT_SCHEMA_KEY, schema.to_text()?);
    Ok(())
}
