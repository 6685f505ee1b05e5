use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use parquet_example::read_schema;

use super::{emit, render_schema};

#[derive(Args)]
pub struct SchemaArgs {
    /// Path to the parquet file
    input: PathBuf,

    /// Print the JSON form instead of the message type
    #[arg(long)]
    json: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let schema = read_schema(&self.input)?;
        emit(&render_schema(&schema, self.json)?, self.output.as_deref())
    }
}
