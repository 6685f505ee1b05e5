use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use parquet_example::infer_schema;
use tracing::info;

use super::{emit, render_schema};

#[derive(Args)]
pub struct InferArgs {
    /// Parquet files to scan (in parallel)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Message name of the inferred schema
    #[arg(short, long, default_value = "example")]
    name: String,

    /// Print the JSON form instead of the message type
    #[arg(long)]
    json: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl InferArgs {
    pub fn run(self) -> Result<()> {
        let schema = infer_schema(&self.name, &self.inputs)?;
        info!(files = self.inputs.len(), fields = schema.len(), "inferred schema");
        emit(&render_schema(&schema, self.json)?, self.output.as_deref())
    }
}
