//! Parquet reader producing [`Example`] records.

use std::{fs::File, path::Path};

use bytes::Bytes;
use parquet::{
    data_type::Decimal,
    file::reader::{ChunkReader, FileReader, SerializedFileReader},
    record::{Field as RowField, Row, reader::RowIter},
    schema::types::Type as ParquetType,
};
use parquet_example_core::{Example, ExampleConverter, PrimitiveValue, Schema, project_schema};
use tracing::debug;

use crate::{
    config::Configuration,
    error::{ConfigurationError, ReaderError},
};

/// Iterator over the [`Example`]s of one Parquet file.
///
/// Rows are decoded with the resolved read schema (see
/// [`ExampleReaderBuilder`]); only its columns are read from the file.
pub struct ExampleReader {
    rows: RowIter<'static>,
    converter: ExampleConverter,
    /// Schema field index of each projected column, in row column order.
    columns: Vec<usize>,
    num_rows: u64,
}

/// Builder for configuring [`ExampleReader`].
///
/// The read schema is taken from the first of: an explicit schema, explicit
/// field names, the configured input schema, the configured input fields,
/// and finally the file's own schema.
#[derive(Debug, Clone, Default)]
pub struct ExampleReaderBuilder {
    schema: Option<Schema>,
    fields: Option<Vec<String>>,
    configuration: Option<Configuration>,
}

/// Read schema and the file projection that feeds it.
struct ReadPlan {
    schema: Schema,
    projection: ParquetType,
}

impl ExampleReader {
    /// Create a builder for [`ExampleReader`].
    pub fn builder() -> ExampleReaderBuilder {
        ExampleReaderBuilder::default()
    }

    /// The schema records are decoded with.
    pub fn schema(&self) -> &Schema {
        self.converter.schema()
    }

    /// Total number of records in the file, from its footer.
    pub fn num_rows(&self) -> u64 {
        self.num_rows
    }

    fn decode_row(&mut self, row: &Row) -> Result<Example, ReaderError> {
        self.converter.start_record();
        for ((name, field), &index) in row.get_column_iter().zip(&self.columns) {
            match field {
                RowField::Null => {}
                RowField::ListInternal(list) => {
                    for element in list.elements() {
                        self.converter.on_value(index, row_value(name, element)?)?;
                    }
                }
                other => self.converter.on_value(index, row_value(name, other)?)?,
            }
        }
        Ok(self.converter.end_record()?)
    }
}

/// Recover the physical value behind a row field.
///
/// The row API decodes annotated columns into logical variants; INT64 and
/// BYTE_ARRAY columns are read back to their stored bits whatever the
/// annotation.
fn row_value<'a>(column: &str, field: &'a RowField) -> Result<PrimitiveValue<'a>, ReaderError> {
    let value = match field {
        RowField::Long(v)
        | RowField::TimeMicros(v)
        | RowField::TimestampMillis(v)
        | RowField::TimestampMicros(v) => PrimitiveValue::Int64(*v),
        RowField::ULong(v) => PrimitiveValue::Int64(*v as i64),
        RowField::Decimal(Decimal::Int64 { value, .. }) => {
            PrimitiveValue::Int64(i64::from_be_bytes(*value))
        }
        RowField::Decimal(Decimal::Bytes { value, .. }) => PrimitiveValue::Binary(value.data()),
        RowField::Float(v) => PrimitiveValue::Float(*v),
        RowField::Bytes(v) => PrimitiveValue::Binary(v.data()),
        RowField::Str(v) => PrimitiveValue::Binary(v.as_bytes()),
        other => {
            return Err(ReaderError::UnsupportedValue {
                column: column.to_string(),
                value: format!("{other:?}"),
            });
        }
    };
    Ok(value)
}

impl Iterator for ExampleReader {
    type Item = Result<Example, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };
        Some(self.decode_row(&row))
    }
}

impl ExampleReaderBuilder {
    /// Decode with `schema`. Its fields are matched to file columns by name.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Read only the named columns, keeping the file's column order.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Open the file at `path`.
    pub fn build(self, path: impl AsRef<Path>) -> Result<ExampleReader, ReaderError> {
        let file = File::open(path)?;
        self.build_from_reader(SerializedFileReader::new(file)?)
    }

    /// Read a file held in memory.
    pub fn build_from_bytes(self, data: impl Into<Bytes>) -> Result<ExampleReader, ReaderError> {
        self.build_from_reader(SerializedFileReader::new(data.into())?)
    }

    fn build_from_reader<R>(
        self,
        reader: SerializedFileReader<R>,
    ) -> Result<ExampleReader, ReaderError>
    where
        R: ChunkReader + 'static,
    {
        let file_schema = reader.metadata().file_metadata().schema();
        let ReadPlan { schema, projection } = self.plan(file_schema)?;
        let columns = projection
            .get_fields()
            .iter()
            .map(|column| {
                schema
                    .index_of(column.name())
                    .ok_or_else(|| ReaderError::MissingColumn(column.name().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            schema = %schema.name(),
            columns = columns.len(),
            row_groups = reader.metadata().num_row_groups(),
            "opened example reader"
        );

        let num_rows = u64::try_from(reader.metadata().file_metadata().num_rows()).unwrap_or(0);
        let reader: Box<dyn FileReader> = Box::new(reader);
        let rows = RowIter::from_file_into(reader).project(Some(projection))?;
        Ok(ExampleReader {
            rows,
            converter: ExampleConverter::new(schema),
            columns,
            num_rows,
        })
    }

    fn plan(&self, file_schema: &ParquetType) -> Result<ReadPlan, ReaderError> {
        if self.schema.is_some() && self.fields.is_some() {
            return Err(ConfigurationError::Conflict.into());
        }
        if let Some(schema) = &self.schema {
            debug!("using explicit read schema");
            return match_schema(file_schema, schema.clone());
        }
        if let Some(fields) = &self.fields {
            debug!(?fields, "projecting explicit fields");
            return project_fields(file_schema, fields);
        }
        if let Some(conf) = &self.configuration {
            if let Some(schema) = conf.input_schema()? {
                debug!("using configured read schema");
                return match_schema(file_schema, schema);
            }
            if let Some(fields) = conf.input_fields()? {
                debug!(?fields, "projecting configured fields");
                return project_fields(file_schema, &fields);
            }
        }
        Ok(ReadPlan {
            schema: Schema::from_physical(file_schema)?,
            projection: file_schema.clone(),
        })
    }
}

/// Check that every field of `schema` has a same-typed leaf column in the file.
fn match_schema(file_schema: &ParquetType, schema: Schema) -> Result<ReadPlan, ReaderError> {
    for field in schema.iter() {
        let column = file_schema
            .get_fields()
            .iter()
            .find(|column| column.name() == field.name())
            .ok_or_else(|| ReaderError::MissingColumn(field.name().to_string()))?;
        if !column.is_primitive() {
            return Err(ReaderError::ColumnMismatch {
                column: field.name().to_string(),
                expected: field.feature_type(),
                actual: "group".to_string(),
            });
        }
        let actual = column.get_physical_type();
        if actual != field.feature_type().physical_type() {
            return Err(ReaderError::column_mismatch(
                field.name(),
                field.feature_type(),
                actual,
            ));
        }
    }
    let projection = project_schema(file_schema, schema.iter().map(|f| f.name()))?;
    Ok(ReadPlan { schema, projection })
}

fn project_fields(file_schema: &ParquetType, fields: &[String]) -> Result<ReadPlan, ReaderError> {
    let projection = project_schema(file_schema, fields)?;
    Ok(ReadPlan {
        schema: Schema::from_physical(&projection)?,
        projection,
    })
}

/// Reflect the [`Schema`] of the file at `path` without reading any rows.
pub fn read_schema(path: impl AsRef<Path>) -> Result<Schema, ReaderError> {
    let reader = SerializedFileReader::new(File::open(path)?)?;
    Ok(Schema::from_physical(
        reader.metadata().file_metadata().schema(),
    )?)
}
