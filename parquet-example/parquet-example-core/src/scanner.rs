//! Schema inference over a corpus of [`Example`]s.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    error::{SchemaError, TypeConflictError},
    example::Example,
    schema::{FeatureType, Repetition, Schema},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct FieldStats {
    feature_type: Option<FeatureType>,
    /// Records holding at least one value.
    non_zero: u64,
    max_count: usize,
}

impl FieldStats {
    fn unify(&mut self, field: &str, found: Option<FeatureType>) -> Result<(), TypeConflictError> {
        match (self.feature_type, found) {
            (Some(existing), Some(found)) if existing != found => Err(TypeConflictError {
                field: field.to_string(),
                existing,
                found,
            }),
            (None, Some(found)) => {
                self.feature_type = Some(found);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn repetition(&self, total: u64) -> Option<Repetition> {
        match self.max_count {
            0 => None,
            1 if self.non_zero == total => Some(Repetition::Required),
            1 => Some(Repetition::Optional),
            _ => Some(Repetition::Repeated),
        }
    }
}

/// Accumulates per-field type and cardinality statistics.
///
/// Scanners over disjoint partitions combine with [`merge`](Self::merge);
/// merging yields the same statistics as one scan over all records.
#[derive(Debug, Clone)]
pub struct ExampleScanner {
    name: String,
    total: u64,
    /// Field names in first-seen order.
    fields: Vec<String>,
    stats: HashMap<String, FieldStats>,
}

impl ExampleScanner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: 0,
            fields: Vec::new(),
            stats: HashMap::new(),
        }
    }

    /// Number of records scanned (or merged in).
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn scan(&mut self, example: &Example) -> Result<(), TypeConflictError> {
        self.total += 1;
        for (name, feature) in example.iter() {
            let stats = self.entry(name);
            stats.unify(name, feature.feature_type())?;
            let count = feature.len();
            if count >= 1 {
                stats.non_zero += 1;
            }
            stats.max_count = stats.max_count.max(count);
        }
        Ok(())
    }

    pub fn scan_all<'a, I>(&mut self, examples: I) -> Result<(), TypeConflictError>
    where
        I: IntoIterator<Item = &'a Example>,
    {
        examples.into_iter().try_for_each(|e| self.scan(e))
    }

    /// Combine with a scanner over a disjoint set of records.
    ///
    /// Fields keep this scanner's first-seen order, followed by fields only
    /// `other` has seen.
    pub fn merge(mut self, other: ExampleScanner) -> Result<Self, TypeConflictError> {
        debug!(
            left = self.total,
            right = other.total,
            "merging example scanners"
        );
        let ExampleScanner {
            total,
            fields,
            mut stats,
            ..
        } = other;
        for name in fields {
            let Some(theirs) = stats.remove(&name) else {
                continue;
            };
            let ours = self.entry(&name);
            ours.unify(&name, theirs.feature_type)?;
            ours.non_zero += theirs.non_zero;
            ours.max_count = ours.max_count.max(theirs.max_count);
        }
        self.total += total;
        Ok(self)
    }

    /// Derive the schema; fields that never carried a value are dropped.
    ///
    /// The result goes through [`Schema::builder`], so a record key that is
    /// not a valid field name (the empty string) fails here.
    pub fn into_schema(self) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder();
        for name in self.fields {
            let stats = self.stats.get(&name).copied().unwrap_or_default();
            match (stats.feature_type, stats.repetition(self.total)) {
                (Some(feature_type), Some(repetition)) => {
                    builder = builder.field(name, feature_type, repetition);
                }
                _ => debug!(field = %name, "dropping field without values"),
            }
        }
        builder.named(self.name)
    }

    fn entry(&mut self, name: &str) -> &mut FieldStats {
        if !self.stats.contains_key(name) {
            self.fields.push(name.to_string());
        }
        self.stats.entry(name.to_string()).or_default()
    }
}
