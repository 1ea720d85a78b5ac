//! Core types shared by the compiler, the visitor and the casters
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Scalar type a declared path or column is cast to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetType {
    Boolean,
    Long,
    Double,
    String,
    Timestamp,
    Json,
}

impl TargetType {
    /// Identifier used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::Boolean => "boolean",
            TargetType::Long => "long",
            TargetType::Double => "double",
            TargetType::String => "string",
            TargetType::Timestamp => "timestamp",
            TargetType::Json => "json",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "boolean" => Ok(TargetType::Boolean),
            "long" => Ok(TargetType::Long),
            "double" => Ok(TargetType::Double),
            "string" => Ok(TargetType::String),
            "timestamp" => Ok(TargetType::Timestamp),
            "json" => Ok(TargetType::Json),
            other => Err(format!(
                "unknown type '{}', expected one of boolean, long, double, string, timestamp, json",
                other
            )),
        }
    }
}

impl TryFrom<String> for TargetType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetType> for String {
    fn from(value: TargetType) -> Self {
        value.as_str().to_string()
    }
}

/// Runtime kind of a value node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Map,
    Array,
    Boolean,
    Integer,
    Float,
    String,
    Other,
}

impl ValueKind {
    /// Classify a JSON value. Numbers representable as `i64` or `u64` are
    /// integers, every other number is a float.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Map,
            Value::Array(_) => ValueKind::Array,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Null => ValueKind::Other,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::Map | ValueKind::Array)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Map => "map",
            ValueKind::Array => "array",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Other => "null",
        };
        f.write_str(name)
    }
}
