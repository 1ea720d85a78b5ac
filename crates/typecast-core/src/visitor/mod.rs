//! Path-indexed tree visitor
//!
//! The visitor walks a JSON tree depth-first and rebuilds it with the same
//! shape. Only scalar leaves whose concrete path is declared in the
//! [`PathSpec`] are handed to the [`Caster`]; everything else is moved into
//! the output untouched.
//!
//! Descent stops at any path missing from the prefix set, so an undeclared
//! subtree costs one set lookup regardless of its size. Array elements try
//! their index-specific path first (`$.a[1]`) and fall back to the wildcard
//! path (`$.a[*]`) when the index is not declared.
//!
//! One path buffer is shared by a whole invocation: a child segment is
//! pushed before recursing and truncated afterwards.
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license


use crate::cast::{cast_scalar, Caster};
use crate::path::{PathSpec, ROOT, WILDCARD};
use crate::types::ValueKind;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Counters collected during one visit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitStats {
    /// Leaves handed to the caster
    pub casts: usize,
    /// Subtrees skipped because no declaration lies below them
    pub pruned: usize,
}

/// Rewrites declared leaves of a value tree
#[derive(Clone, Copy)]
pub struct Visitor<'a> {
    spec: &'a PathSpec,
    caster: &'a dyn Caster,
}

/// Mutable state of a single invocation
struct Walk {
    path: String,
    stats: VisitStats,
}

impl<'a> Visitor<'a> {
    pub fn new(spec: &'a PathSpec, caster: &'a dyn Caster) -> Self {
        Self { spec, caster }
    }

    /// Visit `value` located at the concrete `path`
    pub fn visit(&self, path: &str, value: Value) -> Result<Value> {
        self.visit_with_stats(path, value).map(|(value, _)| value)
    }

    /// Visit `value` located at `path`, also returning traversal counters
    pub fn visit_with_stats(&self, path: &str, value: Value) -> Result<(Value, VisitStats)> {
        let mut walk = Walk {
            path: String::from(path),
            stats: VisitStats::default(),
        };
        let value = self.walk(&mut walk, value)?;
        Ok((value, walk.stats))
    }

    /// Visit a whole document rooted at `$`.
    ///
    /// `$` itself is never a declared prefix, so the root is always entered
    /// unless nothing at all is declared.
    pub fn visit_document(&self, value: Value) -> Result<Value> {
        if self.spec.is_empty() {
            return Ok(value);
        }
        let mut walk = Walk {
            path: String::from(ROOT),
            stats: VisitStats::default(),
        };
        self.descend(&mut walk, value)
    }

    fn walk(&self, walk: &mut Walk, value: Value) -> Result<Value> {
        if !self.spec.should_visit(&walk.path) {
            walk.stats.pruned += 1;
            return Ok(value);
        }
        self.descend(walk, value)
    }

    fn descend(&self, walk: &mut Walk, value: Value) -> Result<Value> {
        match value {
            Value::Array(items) => {
                let base = walk.path.len();
                let mut rebuilt = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    walk.path.push('[');
                    walk.path.push_str(&index.to_string());
                    walk.path.push(']');
                    if !self.spec.should_visit(&walk.path) {
                        // try [*] too
                        walk.path.truncate(base);
                        walk.path.push_str(WILDCARD);
                    }
                    rebuilt.push(self.walk(walk, item)?);
                    walk.path.truncate(base);
                }
                Ok(Value::Array(rebuilt))
            }
            Value::Object(entries) => {
                let base = walk.path.len();
                let mut rebuilt = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    walk.path.push('.');
                    walk.path.push_str(&key);
                    let item = self.walk(walk, item)?;
                    walk.path.truncate(base);
                    rebuilt.insert(key, item);
                }
                Ok(Value::Object(rebuilt))
            }
            Value::Bool(_) | Value::Number(_) | Value::String(_) => self.cast_leaf(walk, value),
            Value::Null => Ok(value),
        }
    }

    fn cast_leaf(&self, walk: &mut Walk, value: Value) -> Result<Value> {
        let Some(target) = self.spec.target_type(&walk.path) else {
            return Ok(value);
        };

        let Some(result) = cast_scalar(self.caster, target, &value) else {
            return Ok(value);
        };

        match result {
            Ok(cast) => {
                walk.stats.casts += 1;
                Ok(cast)
            }
            Err(failure) => Err(Error::Conversion {
                path: walk.path.clone(),
                value: value.to_string(),
                source_kind: ValueKind::of(&value),
                target,
                message: failure.message,
            }),
        }
    }
}

impl std::fmt::Debug for Visitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visitor").field("spec", self.spec).finish_non_exhaustive()
    }
}
