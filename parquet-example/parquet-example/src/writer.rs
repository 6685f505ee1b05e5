//! Parquet writer for [`Example`] records.

use std::{fs::File, io::Write, path::Path, sync::Arc};

use parquet::{
    column::writer::ColumnWriter,
    data_type::ByteArray,
    errors::ParquetError,
    file::{
        properties::WriterProperties,
        writer::{SerializedFileWriter, SerializedRowGroupWriter},
    },
};
use parquet_example_core::{
    EncodeError, Example, FeatureType, PrimitiveValue, RecordConsumer, Repetition, Schema,
    write_example,
};
use tracing::{debug, warn};

use crate::{config::Configuration, error::WriterError};

/// Records buffered per row group unless configured otherwise.
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10_000;

#[derive(Debug)]
enum ColumnValues {
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Bytes(Vec<ByteArray>),
}

impl ColumnValues {
    fn new(feature_type: FeatureType) -> Self {
        match feature_type {
            FeatureType::Int64 => ColumnValues::Int64(Vec::new()),
            FeatureType::Float => ColumnValues::Float(Vec::new()),
            FeatureType::Bytes => ColumnValues::Bytes(Vec::new()),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnValues::Int64(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Bytes(v) => v.len(),
        }
    }

    fn truncate(&mut self, len: usize) {
        match self {
            ColumnValues::Int64(v) => v.truncate(len),
            ColumnValues::Float(v) => v.truncate(len),
            ColumnValues::Bytes(v) => v.truncate(len),
        }
    }

    fn feature_type(&self) -> FeatureType {
        match self {
            ColumnValues::Int64(_) => FeatureType::Int64,
            ColumnValues::Float(_) => FeatureType::Float,
            ColumnValues::Bytes(_) => FeatureType::Bytes,
        }
    }

    /// Append `value`, or report its kind if it does not fit the column.
    fn push(&mut self, value: PrimitiveValue<'_>) -> Result<(), &'static str> {
        match (self, value) {
            (ColumnValues::Int64(v), PrimitiveValue::Int64(x)) => v.push(x),
            (ColumnValues::Float(v), PrimitiveValue::Float(x)) => v.push(x),
            (ColumnValues::Bytes(v), PrimitiveValue::Binary(x)) => {
                v.push(ByteArray::from(x.to_vec()))
            }
            (_, other) => return Err(other.kind_name()),
        }
        Ok(())
    }
}

/// Lengths of a column's buffers after the last committed record.
#[derive(Debug, Clone, Copy, Default)]
struct Mark {
    values: usize,
    def_levels: usize,
    rep_levels: usize,
}

#[derive(Debug)]
struct Column {
    name: String,
    repetition: Repetition,
    values: ColumnValues,
    def_levels: Vec<i16>,
    rep_levels: Vec<i16>,
    committed: Mark,
    /// Values added to this column in the open record.
    pending: usize,
}

impl Column {
    fn has_def_levels(&self) -> bool {
        self.repetition != Repetition::Required
    }

    fn has_rep_levels(&self) -> bool {
        self.repetition == Repetition::Repeated
    }

    fn add(&mut self, value: PrimitiveValue<'_>) -> Result<(), EncodeError> {
        self.values
            .push(value)
            .map_err(|actual| EncodeError::ColumnType {
                field: self.name.clone(),
                expected: self.values.feature_type(),
                actual,
            })?;
        if self.has_def_levels() {
            self.def_levels.push(1);
        }
        if self.has_rep_levels() {
            self.rep_levels.push(if self.pending == 0 { 0 } else { 1 });
        }
        self.pending += 1;
        Ok(())
    }

    /// Close the open record, writing a null entry if nothing was added.
    fn finish_record(&mut self) -> Result<(), EncodeError> {
        self.repetition.check_size(&self.name, self.pending)?;
        if self.pending == 0 {
            self.def_levels.push(0);
            if self.has_rep_levels() {
                self.rep_levels.push(0);
            }
        }
        Ok(())
    }

    fn commit(&mut self) {
        self.pending = 0;
        self.committed = Mark {
            values: self.values.len(),
            def_levels: self.def_levels.len(),
            rep_levels: self.rep_levels.len(),
        };
    }

    fn rollback(&mut self) {
        self.pending = 0;
        self.values.truncate(self.committed.values);
        self.def_levels.truncate(self.committed.def_levels);
        self.rep_levels.truncate(self.committed.rep_levels);
    }

    fn clear(&mut self) {
        self.values.truncate(0);
        self.def_levels.clear();
        self.rep_levels.clear();
        self.commit();
    }

    fn write_to(&self, writer: &mut ColumnWriter<'_>) -> Result<(), ParquetError> {
        let def = self.has_def_levels().then_some(self.def_levels.as_slice());
        let rep = self.has_rep_levels().then_some(self.rep_levels.as_slice());
        match (writer, &self.values) {
            (ColumnWriter::Int64ColumnWriter(typed), ColumnValues::Int64(v)) => {
                typed.write_batch(v, def, rep)?;
            }
            (ColumnWriter::FloatColumnWriter(typed), ColumnValues::Float(v)) => {
                typed.write_batch(v, def, rep)?;
            }
            (ColumnWriter::ByteArrayColumnWriter(typed), ColumnValues::Bytes(v)) => {
                typed.write_batch(v, def, rep)?;
            }
            _ => {
                return Err(ParquetError::General(format!(
                    "column writer for '{}' does not accept {} values",
                    self.name,
                    self.values.feature_type()
                )));
            }
        }
        Ok(())
    }
}

/// Buffers typed values and levels per column until a row group is flushed.
///
/// Implements [`RecordConsumer`], so [`write_example`] can feed it directly.
/// A record becomes visible only at `end_message`; [`rollback`](Self::rollback)
/// discards an incomplete one.
#[derive(Debug)]
pub struct ColumnBuffers {
    columns: Vec<Column>,
    current: Option<usize>,
    in_message: bool,
    rows: usize,
}

impl ColumnBuffers {
    pub fn new(schema: &Schema) -> Self {
        let columns = schema
            .iter()
            .map(|field| Column {
                name: field.name().to_string(),
                repetition: field.repetition(),
                values: ColumnValues::new(field.feature_type()),
                def_levels: Vec::new(),
                rep_levels: Vec::new(),
                committed: Mark::default(),
                pending: 0,
            })
            .collect();
        Self {
            columns,
            current: None,
            in_message: false,
            rows: 0,
        }
    }

    /// Committed records not yet flushed.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Drop everything added since the last committed record.
    pub fn rollback(&mut self) {
        self.columns.iter_mut().for_each(Column::rollback);
        self.current = None;
        self.in_message = false;
    }

    /// Write all committed records as the columns of `row_group` and reset.
    pub fn write_row_group<W: Write + Send>(
        &mut self,
        row_group: &mut SerializedRowGroupWriter<'_, W>,
    ) -> Result<(), ParquetError> {
        self.rollback();
        for column in &mut self.columns {
            let Some(mut writer) = row_group.next_column()? else {
                return Err(ParquetError::General(format!(
                    "file schema has no column for '{}'",
                    column.name
                )));
            };
            column.write_to(writer.untyped())?;
            writer.close()?;
            column.clear();
        }
        self.rows = 0;
        Ok(())
    }

    fn column_mut(&mut self) -> Result<&mut Column, EncodeError> {
        let index = self
            .current
            .ok_or(EncodeError::Protocol("value added outside of a field"))?;
        Ok(&mut self.columns[index])
    }
}

impl RecordConsumer for ColumnBuffers {
    fn start_message(&mut self) -> Result<(), EncodeError> {
        if self.in_message {
            return Err(EncodeError::Protocol("record already started"));
        }
        self.in_message = true;
        Ok(())
    }

    fn end_message(&mut self) -> Result<(), EncodeError> {
        if !self.in_message || self.current.is_some() {
            return Err(EncodeError::Protocol("record ended outside of a record"));
        }
        for column in &mut self.columns {
            column.finish_record()?;
        }
        self.columns.iter_mut().for_each(Column::commit);
        self.in_message = false;
        self.rows += 1;
        Ok(())
    }

    fn start_field(&mut self, _name: &str, index: usize) -> Result<(), EncodeError> {
        if !self.in_message || self.current.is_some() {
            return Err(EncodeError::Protocol("field started outside of a record"));
        }
        if index >= self.columns.len() {
            return Err(EncodeError::FieldIndex {
                index,
                field_count: self.columns.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    fn end_field(&mut self, _name: &str, index: usize) -> Result<(), EncodeError> {
        if self.current != Some(index) {
            return Err(EncodeError::Protocol("field ended without being started"));
        }
        self.current = None;
        Ok(())
    }

    fn add_value(&mut self, value: PrimitiveValue<'_>) -> Result<(), EncodeError> {
        self.column_mut()?.add(value)
    }
}

/// Writes [`Example`]s to a Parquet file under a fixed [`Schema`].
///
/// Records are buffered and flushed as one row group every
/// `row_group_size` records. The file is only valid after
/// [`close`](Self::close).
pub struct ExampleWriter<W: Write + Send> {
    schema: Schema,
    buffers: ColumnBuffers,
    inner: SerializedFileWriter<W>,
    row_group_size: usize,
    written: u64,
}

/// Builder for configuring [`ExampleWriter`].
#[derive(Debug, Clone)]
pub struct ExampleWriterBuilder {
    schema: Option<Schema>,
    configuration: Option<Configuration>,
    row_group_size: usize,
    properties: Option<WriterProperties>,
}

impl ExampleWriter<File> {
    /// Create a builder for [`ExampleWriter`].
    pub fn builder() -> ExampleWriterBuilder {
        ExampleWriterBuilder {
            schema: None,
            configuration: None,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
            properties: None,
        }
    }
}

impl<W: Write + Send> ExampleWriter<W> {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records accepted so far, flushed or not.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append one record.
    ///
    /// A record that fails to encode leaves no trace in the file; earlier
    /// records are unaffected and the writer stays usable.
    pub fn write(&mut self, example: &Example) -> Result<(), WriterError> {
        if let Err(e) = write_example(&self.schema, &mut self.buffers, example) {
            self.buffers.rollback();
            warn!(error = %e, "dropping record that failed to encode");
            return Err(e.into());
        }
        self.written += 1;
        if self.buffers.rows() >= self.row_group_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush buffered records as a row group. No-op when nothing is buffered.
    pub fn flush(&mut self) -> Result<(), WriterError> {
        let rows = self.buffers.rows();
        if rows == 0 {
            return Ok(());
        }
        let mut row_group = self.inner.next_row_group()?;
        self.buffers.write_row_group(&mut row_group)?;
        row_group.close()?;
        debug!(rows, schema = %self.schema.name(), "flushed row group");
        Ok(())
    }

    /// Flush the remaining records, finish the file and return the record count.
    pub fn close(mut self) -> Result<u64, WriterError> {
        self.flush()?;
        self.inner.close()?;
        Ok(self.written)
    }
}

impl ExampleWriterBuilder {
    /// Write under `schema`. Takes precedence over a configured output schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Read the output schema from `configuration` when none is given directly.
    pub fn with_configuration(mut self, configuration: Configuration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Set the number of records per row group (default: 10 000).
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    pub fn with_writer_properties(mut self, properties: WriterProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Create (or truncate) `path` and write to it.
    pub fn build(self, path: impl AsRef<Path>) -> Result<ExampleWriter<File>, WriterError> {
        let schema = self.resolve_schema()?;
        let file = File::create(path)?;
        self.finish(schema, file)
    }

    /// Write to any byte sink, e.g. an in-memory buffer.
    pub fn build_from_writer<W: Write + Send>(
        self,
        writer: W,
    ) -> Result<ExampleWriter<W>, WriterError> {
        let schema = self.resolve_schema()?;
        self.finish(schema, writer)
    }

    fn resolve_schema(&self) -> Result<Schema, WriterError> {
        if self.row_group_size == 0 {
            return Err(WriterError::InvalidRowGroupSize);
        }
        if let Some(schema) = &self.schema {
            return Ok(schema.clone());
        }
        match &self.configuration {
            Some(conf) => conf.output_schema()?.ok_or(WriterError::SchemaNotConfigured),
            None => Err(WriterError::SchemaNotConfigured),
        }
    }

    fn finish<W: Write + Send>(
        self,
        schema: Schema,
        writer: W,
    ) -> Result<ExampleWriter<W>, WriterError> {
        let physical = Arc::new(schema.to_physical()?);
        let properties = Arc::new(self.properties.unwrap_or_default());
        let inner = SerializedFileWriter::new(writer, physical, properties)?;
        debug!(schema = %schema.name(), columns = schema.len(), "opened example writer");
        Ok(ExampleWriter {
            buffers: ColumnBuffers::new(&schema),
            schema,
            inner,
            row_group_size: self.row_group_size,
            written: 0,
        })
    }
}
