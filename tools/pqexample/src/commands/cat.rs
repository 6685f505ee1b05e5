use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use parquet_example::{Example, ExampleReader, Repetition, Schema};
use parquet_example_arrow::examples_to_record_batch;
use tracing::warn;

use crate::{
    format::OutputFormat,
    writer::{CsvWriter, JsonlWriter, RecordBatchWriter, TableWriter},
};

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, ETA: {eta})";

#[derive(Args)]
pub struct CatArgs {
    /// Path to the parquet file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Comma-separated columns to read (all if not specified)
    #[arg(long, value_delimiter = ',')]
    fields: Option<Vec<String>>,

    /// Number of records per Arrow batch
    #[arg(long, default_value_t = 1024)]
    batch_size: usize,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CatArgs {
    pub fn run(self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("--batch-size must be positive");
        }
        let mut builder = ExampleReader::builder();
        if let Some(fields) = &self.fields {
            builder = builder.with_fields(fields.iter().cloned());
        }
        let reader = builder.build(&self.input)?;
        let schema = self.output_schema(reader.schema())?;

        let pb = ProgressBar::new(reader.num_rows());
        pb.set_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?.progress_chars("=>-"));

        let mut writer: Box<dyn RecordBatchWriter> = match self.format {
            OutputFormat::Jsonl => Box::new(JsonlWriter::new(self.output.as_deref())?),
            OutputFormat::Csv => Box::new(CsvWriter::new(self.output.as_deref())?),
            OutputFormat::Table => Box::new(TableWriter::new(self.output.as_deref())?),
        };

        let mut rows: Vec<Example> = Vec::with_capacity(self.batch_size);
        for example in reader {
            rows.push(example?);
            if rows.len() >= self.batch_size {
                flush_rows(&schema, &mut rows, writer.as_mut(), &pb)?;
            }
        }
        flush_rows(&schema, &mut rows, writer.as_mut(), &pb)?;

        writer.finish()?;
        pb.finish_with_message("done");
        Ok(())
    }

    /// Drop list columns when the format cannot hold them.
    fn output_schema(&self, schema: &Schema) -> Result<Schema> {
        if self.format.supports_lists() {
            return Ok(schema.clone());
        }
        let (kept, dropped): (Vec<_>, Vec<_>) = schema
            .iter()
            .partition(|f| f.repetition() != Repetition::Repeated);
        if !dropped.is_empty() {
            let names: Vec<_> = dropped.iter().map(|f| f.name()).collect();
            warn!(columns = %names.join(", "), "output format skips repeated columns");
        }
        let narrowed = kept
            .into_iter()
            .fold(Schema::builder(), |builder, f| {
                builder.field(f.name(), f.feature_type(), f.repetition())
            })
            .named(schema.name())?;
        if narrowed.is_empty() {
            bail!("no columns left to write as {:?}", self.format);
        }
        Ok(narrowed)
    }
}

fn flush_rows(
    schema: &Schema,
    rows: &mut Vec<Example>,
    writer: &mut dyn RecordBatchWriter,
    pb: &ProgressBar,
) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let batch = examples_to_record_batch(schema, rows)?;
    let n = rows.len() as u64;
    rows.clear();
    writer.write_batch(batch)?;
    pb.inc(n);
    Ok(())
}
