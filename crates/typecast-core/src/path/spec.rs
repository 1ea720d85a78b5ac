//! Compilation of declared paths into lookup indexes
//!
//! A [`PathSpec`] holds two derived indexes:
//!
//! - the exact index, mapping each declared pattern verbatim to its target
//!   type (`[*]` stays a literal token, distinct from `[0]`, `[1]`, ...);
//! - the prefix set, holding every structural prefix of every declared
//!   pattern, self included. The visitor only descends into paths found in
//!   this set.
//!
//! For `$.a.b[0].c` the prefix set receives `$.a`, `$.a.b`, `$.a.b[0]` and
//! `$.a.b[0].c`.
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license

use super::{is_json_path, validate_pattern, ROOT};
use crate::types::TargetType;
use crate::Result;
use std::collections::{HashMap, HashSet};

/// Compiled path declarations, read-only once built
#[derive(Debug, Clone, Default)]
pub struct PathSpec {
    /// Declared pattern -> target type
    exact: HashMap<String, TargetType>,
    /// Every prefix of every declared pattern
    prefixes: HashSet<String>,
    /// Prefix steps of the longest declared pattern
    max_depth: usize,
}

impl PathSpec {
    /// Compile declarations, skipping names that are not JSON paths.
    ///
    /// Malformed patterns are tolerated: whatever splitting on `.` and `[`
    /// produces is registered. Later declarations of the same pattern
    /// overwrite earlier ones.
    pub fn compile<I, S>(declarations: I) -> Self
    where
        I: IntoIterator<Item = (S, TargetType)>,
        S: AsRef<str>,
    {
        let mut spec = Self::default();
        let mut skipped = 0usize;

        for (name, target) in declarations {
            let name = name.as_ref();
            if !is_json_path(name) {
                skipped += 1;
                continue;
            }
            spec.exact.insert(name.to_string(), target);
            let depth = spec.insert_prefixes(name);
            spec.max_depth = spec.max_depth.max(depth);
        }

        tracing::debug!(
            declarations = spec.exact.len(),
            prefixes = spec.prefixes.len(),
            skipped,
            max_depth = spec.max_depth,
            "Compiled path declarations"
        );

        spec
    }

    /// Compile declarations, rejecting the first malformed JSON path.
    ///
    /// On valid input the result is identical to [`PathSpec::compile`].
    pub fn compile_strict<I, S>(declarations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TargetType)>,
        S: AsRef<str>,
    {
        let declarations: Vec<(S, TargetType)> = declarations.into_iter().collect();
        for (name, _) in &declarations {
            let name = name.as_ref();
            if is_json_path(name) {
                validate_pattern(name)?;
            }
        }
        Ok(Self::compile(declarations))
    }

    /// Register every prefix of `pattern`, returning how many were produced
    fn insert_prefixes(&mut self, pattern: &str) -> usize {
        let mut partial = String::from(ROOT);
        let mut depth = 0;

        for part in trim_trailing_empty(pattern.split('.').collect()).into_iter().skip(1) {
            let mut pieces = trim_trailing_empty(part.split('[').collect()).into_iter();

            partial.push('.');
            partial.push_str(pieces.next().unwrap_or_default());
            self.prefixes.insert(partial.clone());
            depth += 1;

            // Covers both [0] and [*]
            for suffix in pieces {
                partial.push('[');
                partial.push_str(suffix);
                self.prefixes.insert(partial.clone());
                depth += 1;
            }
        }

        depth
    }

    /// Target type declared for exactly this path
    pub fn target_type(&self, path: &str) -> Option<TargetType> {
        self.exact.get(path).copied()
    }

    /// Whether the visitor should descend into `path`
    pub fn should_visit(&self, path: &str) -> bool {
        self.prefixes.contains(path)
    }

    /// Number of distinct declared JSON paths
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Declared patterns with their types, sorted by pattern
    pub fn patterns(&self) -> Vec<(&str, TargetType)> {
        let mut patterns: Vec<(&str, TargetType)> =
            self.exact.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        patterns.sort_by(|a, b| a.0.cmp(b.0));
        patterns
    }

    /// Prefix set entries, sorted
    pub fn prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = self.prefixes.iter().map(String::as_str).collect();
        prefixes.sort_unstable();
        prefixes
    }

    /// Prefix steps of the longest declared pattern. Visitor recursion never
    /// goes deeper than this plus one.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Drop trailing empty pieces left by a split, keeping at least one
fn trim_trailing_empty(mut pieces: Vec<&str>) -> Vec<&str> {
    while pieces.len() > 1 && pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces
}
