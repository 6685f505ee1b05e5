use std::collections::BTreeSet;

use parquet::schema::types::Type as ParquetType;

use crate::error::ProjectionError;

/// Restrict a Parquet message type to the requested column names.
///
/// Columns keep the superset's order, not the order of `fields`. Every
/// requested name must exist; the error lists the missing ones sorted.
pub fn project_schema<I, S>(
    superset: &ParquetType,
    fields: I,
) -> Result<ParquetType, ProjectionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if !superset.is_group() {
        return Err(ProjectionError::NotMessage(superset.name().to_string()));
    }
    let mut unmatched: BTreeSet<String> = fields
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();

    let kept = superset
        .get_fields()
        .iter()
        .filter(|column| unmatched.remove(column.name()))
        .cloned()
        .collect();

    if !unmatched.is_empty() {
        return Err(ProjectionError::UnknownFields(unmatched.into_iter().collect()));
    }
    Ok(ParquetType::group_type_builder(superset.name())
        .with_fields(kept)
        .build()?)
}
