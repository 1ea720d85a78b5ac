//! Scalar casting
//!
//! The visitor never converts values itself. It hands each declared scalar
//! leaf to a [`Caster`], one method per source kind, and wraps any
//! [`CastFailure`] into a path-aware conversion error.
//!
//! - [`json`] - the default caster producing JSON values
//! - [`timestamp`] - timestamp parsing and rendering settings
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license

pub mod json;
pub mod timestamp;

pub use json::JsonCaster;
pub use timestamp::TimestampSettings;

use crate::types::TargetType;
use serde_json::Value;
use thiserror::Error;

/// Reason a caster refused a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CastFailure {
    pub message: String,
}

impl CastFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The source kind has no conversion to `target`
    pub fn unsupported(source: &str, target: TargetType) -> Self {
        Self::new(format!("{} cannot be cast to {}", source, target))
    }
}

/// Result of a single scalar cast
pub type CastResult = std::result::Result<Value, CastFailure>;

/// Conversion of scalar values to a target type.
///
/// Implementations must be stateless with respect to the values they convert
/// so one instance can serve concurrent visitors.
pub trait Caster: Send + Sync {
    fn from_boolean(&self, target: TargetType, value: bool) -> CastResult;

    fn from_long(&self, target: TargetType, value: i64) -> CastResult;

    fn from_double(&self, target: TargetType, value: f64) -> CastResult;

    fn from_string(&self, target: TargetType, value: &str) -> CastResult;

    /// Integers above `i64::MAX`. They stay exact for `json` and `string`;
    /// `double` goes through [`Caster::from_double`].
    fn from_unsigned(&self, target: TargetType, value: u64) -> CastResult {
        match target {
            TargetType::Json => Ok(Value::from(value)),
            TargetType::String => Ok(Value::String(value.to_string())),
            TargetType::Double => self.from_double(target, value as f64),
            TargetType::Boolean | TargetType::Long | TargetType::Timestamp => Err(
                CastFailure::new(format!("{} is out of range for {}", value, target)),
            ),
        }
    }
}

/// Hand a scalar to the caster method matching its kind.
///
/// Numbers representable as `i64` go to [`Caster::from_long`], larger
/// integers to [`Caster::from_unsigned`], all others to
/// [`Caster::from_double`]. Null and containers yield `None`.
pub fn cast_scalar(caster: &dyn Caster, target: TargetType, value: &Value) -> Option<CastResult> {
    match value {
        Value::Bool(b) => Some(caster.from_boolean(target, *b)),
        Value::Number(n) => {
            if let Some(long) = n.as_i64() {
                Some(caster.from_long(target, long))
            } else if let Some(unsigned) = n.as_u64() {
                Some(caster.from_unsigned(target, unsigned))
            } else {
                n.as_f64().map(|double| caster.from_double(target, double))
            }
        }
        Value::String(s) => Some(caster.from_string(target, s)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Column-level cast of a whole container.
///
/// Only `json` (kept as is) and `string` (serialised) are meaningful for a
/// map or array.
pub fn cast_container(target: TargetType, value: &Value) -> CastResult {
    match target {
        TargetType::Json => Ok(value.clone()),
        TargetType::String => serde_json::to_string(value)
            .map(Value::String)
            .map_err(|e| CastFailure::new(e.to_string())),
        other => {
            let kind = if value.is_array() { "array" } else { "map" };
            Err(CastFailure::unsupported(kind, other))
        }
    }
}
