//! Record-level typecast filter
//!
//! A record is an ordered map of column name to value. For every column the
//! filter applies, in order:
//!
//! 1. the column-level cast, when the column itself is declared;
//! 2. the tree visitor, when the resulting value is a map or an array, with
//!    the column reachable as `$.<column>`.
//!
//! A failed cast either aborts the record (`stop_on_invalid_record`) or nulls
//! the offending column and carries on.
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license

use crate::cast::{cast_container, cast_scalar, Caster, JsonCaster};
use crate::config::TypecastConfig;
use crate::path::{column_path, PathSpec};
use crate::types::{TargetType, ValueKind};
use crate::visitor::{VisitStats, Visitor};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One record: column name -> value, in column order
pub type Record = Map<String, Value>;

/// Result of filtering a single record
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// The rewritten record
    pub record: Record,
    /// Columns nulled because their value could not be cast
    pub invalid_columns: Vec<String>,
    /// Leaves and columns successfully cast
    pub casts: usize,
}

/// Casts configured columns and JSON leaves of records.
///
/// Built once per configuration, then shared read-only by any number of
/// workers.
pub struct TypecastFilter {
    spec: PathSpec,
    columns: HashMap<String, TargetType>,
    caster: Box<dyn Caster>,
    stop_on_invalid_record: bool,
}

impl TypecastFilter {
    /// Build a filter using the default [`JsonCaster`]
    pub fn new(config: &TypecastConfig) -> Result<Self> {
        config.validate()?;
        let caster = JsonCaster::new(config.timestamp_settings()?);
        Self::with_caster(config, Box::new(caster))
    }

    /// Build a filter around a custom caster
    pub fn with_caster(config: &TypecastConfig, caster: Box<dyn Caster>) -> Result<Self> {
        let declarations = config.columns.iter().map(|c| (c.name.as_str(), c.target));
        let spec = if config.strict_paths {
            PathSpec::compile_strict(declarations)?
        } else {
            PathSpec::compile(declarations)
        };

        let columns: HashMap<String, TargetType> = config
            .column_casts()
            .map(|c| (c.name.clone(), c.target))
            .collect();

        tracing::debug!(
            json_paths = spec.len(),
            column_casts = columns.len(),
            stop_on_invalid_record = config.stop_on_invalid_record,
            "Built typecast filter"
        );

        Ok(Self {
            spec,
            columns,
            caster,
            stop_on_invalid_record: config.stop_on_invalid_record,
        })
    }

    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    /// Visitor bound to this filter's paths and caster
    pub fn visitor(&self) -> Visitor<'_> {
        Visitor::new(&self.spec, self.caster.as_ref())
    }

    /// Declared type of a whole column, if any
    pub fn column_type(&self, column: &str) -> Option<TargetType> {
        self.columns.get(column).copied()
    }

    /// Output type of each input column: the declared type, else unchanged
    pub fn output_schema(&self, input: &[(String, TargetType)]) -> Vec<(String, TargetType)> {
        input
            .iter()
            .map(|(name, current)| {
                (name.clone(), self.column_type(name).unwrap_or(*current))
            })
            .collect()
    }

    /// Filter a record, returning only the rewritten record
    pub fn filter(&self, record: Record) -> Result<Record> {
        self.filter_with_outcome(record).map(|outcome| outcome.record)
    }

    /// Filter a record, reporting nulled columns and cast counts
    pub fn filter_with_outcome(&self, record: Record) -> Result<FilterOutcome> {
        let mut rewritten = Record::with_capacity(record.len());
        let mut invalid_columns = Vec::new();
        let mut casts = 0;

        for (column, value) in record {
            match self.cast_column(&column, value) {
                Ok((value, count)) => {
                    casts += count;
                    rewritten.insert(column, value);
                }
                Err(err) if err.is_conversion() && !self.stop_on_invalid_record => {
                    log::warn!("Invalid value in column '{}' set to null: {}", column, err);
                    invalid_columns.push(column.clone());
                    rewritten.insert(column, Value::Null);
                }
                Err(err) => {
                    return Err(Error::InvalidRecord {
                        column,
                        source: Box::new(err),
                    })
                }
            }
        }

        Ok(FilterOutcome {
            record: rewritten,
            invalid_columns,
            casts,
        })
    }

    /// Cast one column, returning the new value and the number of casts made
    fn cast_column(&self, column: &str, value: Value) -> Result<(Value, usize)> {
        let (value, casts) = match self.column_type(column) {
            Some(target) => self.cast_whole(column, target, value)?,
            None => (value, 0),
        };

        if !ValueKind::of(&value).is_container() {
            return Ok((value, casts));
        }

        let (value, stats): (Value, VisitStats) = self
            .visitor()
            .visit_with_stats(&column_path(column), value)?;
        tracing::trace!(
            column,
            casts = stats.casts,
            pruned = stats.pruned,
            "Visited JSON column"
        );
        Ok((value, casts + stats.casts))
    }

    /// Cast a whole column value, also returning 1 when a conversion ran
    fn cast_whole(&self, column: &str, target: TargetType, value: Value) -> Result<(Value, usize)> {
        let kind = ValueKind::of(&value);
        let result = match kind {
            ValueKind::Other => return Ok((value, 0)),
            ValueKind::Map | ValueKind::Array if target == TargetType::Json => return Ok((value, 0)),
            ValueKind::Map | ValueKind::Array => cast_container(target, &value),
            _ => match cast_scalar(self.caster.as_ref(), target, &value) {
                Some(result) => result,
                None => return Ok((value, 0)),
            },
        };

        result.map(|cast| (cast, 1)).map_err(|failure| Error::Conversion {
            path: column.to_string(),
            value: value.to_string(),
            source_kind: kind,
            target,
            message: failure.message,
        })
    }
}

impl std::fmt::Debug for TypecastFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypecastFilter")
            .field("spec", &self.spec)
            .field("columns", &self.columns)
            .field("stop_on_invalid_record", &self.stop_on_invalid_record)
            .finish_non_exhaustive()
    }
}
