//! Schema inference over Parquet files and in-memory records.

use std::{borrow::Borrow, path::Path};

use parquet_example_core::{Example, ExampleScanner, Schema, TypeConflictError};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    error::{InferError, ReaderError},
    reader::ExampleReader,
};

/// Infer one schema named `name` covering the records of all `paths`.
///
/// Files are scanned in parallel, one scanner per file, and the partial
/// results are merged in path order. The result is the same as scanning the
/// files one after another.
pub fn infer_schema<P>(name: &str, paths: &[P]) -> Result<Schema, InferError>
where
    P: AsRef<Path> + Sync,
{
    let partials = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            scan_file(name, path).map_err(|e| match e {
                ScanError::Read(source) => InferError::Read {
                    path: path.to_path_buf(),
                    source,
                },
                ScanError::TypeConflict(e) => InferError::TypeConflict(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let merged = partials
        .into_iter()
        .try_fold(ExampleScanner::new(name), ExampleScanner::merge)?;
    debug!(files = paths.len(), records = merged.total(), "inferred schema");
    Ok(merged.into_schema()?)
}

/// Infer a schema from records already in memory.
pub fn infer_schema_from_examples<I>(name: &str, examples: I) -> Result<Schema, InferError>
where
    I: IntoIterator,
    I::Item: Borrow<Example>,
{
    let mut scanner = ExampleScanner::new(name);
    for example in examples {
        scanner.scan(example.borrow())?;
    }
    Ok(scanner.into_schema()?)
}

enum ScanError {
    Read(ReaderError),
    TypeConflict(TypeConflictError),
}

fn scan_file(name: &str, path: &Path) -> Result<ExampleScanner, ScanError> {
    let reader = ExampleReader::builder()
        .build(path)
        .map_err(ScanError::Read)?;
    let mut scanner = ExampleScanner::new(name);
    for example in reader {
        let example = example.map_err(ScanError::Read)?;
        scanner.scan(&example).map_err(ScanError::TypeConflict)?;
    }
    debug!(path = %path.display(), records = scanner.total(), "scanned file");
    Ok(scanner)
}
