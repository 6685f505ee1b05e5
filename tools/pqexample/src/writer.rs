use std::{
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Result;
use arrow::record_batch::RecordBatch;

pub trait RecordBatchWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()>;
    fn finish(&mut self) -> Result<()>;
}

// --- JSON Lines ---

pub struct JsonlWriter {
    dest: Box<dyn Write>,
    flush_each_batch: bool,
}

impl JsonlWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let flush_each_batch = output.is_none();
        let dest = open_dest(output)?;
        Ok(Self {
            dest,
            flush_each_batch,
        })
    }
}

impl RecordBatchWriter for JsonlWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let mut json_writer = arrow::json::LineDelimitedWriter::new(&mut self.dest);
        json_writer.write(&batch)?;
        json_writer.finish()?;
        drop(json_writer);
        if self.flush_each_batch {
            self.dest.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

// --- CSV ---

pub struct CsvWriter {
    dest: Box<dyn Write>,
    header_written: bool,
    flush_each_batch: bool,
}

impl CsvWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let flush_each_batch = output.is_none();
        let dest = open_dest(output)?;
        Ok(Self {
            dest,
            header_written: false,
            flush_each_batch,
        })
    }
}

impl RecordBatchWriter for CsvWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let mut csv_writer = arrow::csv::WriterBuilder::new()
            .with_header(!self.header_written)
            .build(&mut self.dest);
        csv_writer.write(&batch)?;
        self.header_written = true;
        drop(csv_writer);
        if self.flush_each_batch {
            self.dest.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

// --- Table ---

/// Buffers every batch and prints one aligned table at the end.
pub struct TableWriter {
    dest: Box<dyn Write>,
    batches: Vec<RecordBatch>,
}

impl TableWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        Ok(Self {
            dest: open_dest(output)?,
            batches: Vec::new(),
        })
    }
}

impl RecordBatchWriter for TableWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        self.batches.push(batch);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let table = arrow::util::pretty::pretty_format_batches(&self.batches)?;
        writeln!(self.dest, "{table}")?;
        self.dest.flush()?;
        Ok(())
    }
}

fn open_dest(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}
