mod commands;
mod format;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{cat::CatArgs, infer::InferArgs, schema::SchemaArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pqexample",
    about = "Inspect Parquet files holding tf.train.Example records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Example schema of a file
    Schema(SchemaArgs),
    /// Infer a common schema from one or more files
    Infer(InferArgs),
    /// Decode Examples and write them as jsonl/csv/table
    Cat(CatArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema(args) => args.run(),
        Commands::Infer(args) => args.run(),
        Commands::Cat(args) => args.run(),
    }
}
