//! Declared JSON paths and their compiled indexes
//!
//! Paths use a dot/bracket notation rooted at `$`: `$.a.b[0].c`, `$.tags[*]`.
//! A declaration whose name does not start with `$.` addresses a whole
//! record column and is ignored here.
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license

pub mod spec;
pub mod validate;

pub use spec::PathSpec;
pub use validate::validate_pattern;

/// Root of every path
pub const ROOT: &str = "$";

/// Prefix that marks a declaration as a JSON path
pub const JSON_PATH_PREFIX: &str = "$.";

/// Array wildcard token
pub const WILDCARD: &str = "[*]";

/// Whether a declared name is a JSON path rather than a column name
pub fn is_json_path(name: &str) -> bool {
    name.starts_with(JSON_PATH_PREFIX)
}

/// Path of a top-level record column, as seen by the visitor
pub fn column_path(column: &str) -> String {
    format!("{}.{}", ROOT, column)
}
