pub mod cat;
pub mod infer;
pub mod schema;

use std::{fs, path::Path};

use anyhow::Result;
use parquet_example::Schema;

/// Render `schema` as Parquet message text, or as JSON when `json` is set.
fn render_schema(schema: &Schema, json: bool) -> Result<String> {
    Ok(if json {
        schema.to_json_pretty()?
    } else {
        schema.to_text()?
    })
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    let text = text.trim_end();
    match output {
        Some(path) => fs::write(path, format!("{text}\n"))?,
        None => println!("{text}"),
    }
    Ok(())
}
