//! Default caster producing JSON values
//!
//! Copyright (c) 2025 Typecast Team
//! Licensed under the Apache-2.0 license

use super::{CastFailure, CastResult, Caster, TimestampSettings};
use crate::types::TargetType;
use serde_json::{Number, Value};

const TRUE_STRINGS: &[&str] = &["true", "yes", "y", "on", "1", "t"];
const FALSE_STRINGS: &[&str] = &["false", "no", "n", "off", "0", "f"];

/// Casts scalars into JSON values; timestamps become formatted strings
#[derive(Debug, Clone, Default)]
pub struct JsonCaster {
    timestamps: TimestampSettings,
}

impl JsonCaster {
    pub fn new(timestamps: TimestampSettings) -> Self {
        Self { timestamps }
    }

    pub fn timestamps(&self) -> &TimestampSettings {
        &self.timestamps
    }
}

impl Caster for JsonCaster {
    fn from_boolean(&self, target: TargetType, value: bool) -> CastResult {
        match target {
            TargetType::Boolean | TargetType::Json => Ok(Value::Bool(value)),
            TargetType::Long => Ok(Value::from(if value { 1 } else { 0 })),
            TargetType::Double => double(if value { 1.0 } else { 0.0 }),
            TargetType::String => Ok(Value::String(value.to_string())),
            TargetType::Timestamp => Err(CastFailure::unsupported("boolean", target)),
        }
    }

    fn from_long(&self, target: TargetType, value: i64) -> CastResult {
        match target {
            TargetType::Boolean => match value {
                0 => Ok(Value::Bool(false)),
                1 => Ok(Value::Bool(true)),
                _ => Err(CastFailure::new(format!(
                    "only 0 and 1 can be cast to boolean, got {}",
                    value
                ))),
            },
            TargetType::Long | TargetType::Json => Ok(Value::from(value)),
            TargetType::Double => double(value as f64),
            TargetType::String => Ok(Value::String(value.to_string())),
            TargetType::Timestamp => self.timestamps.from_epoch_seconds(value).map(Value::String),
        }
    }

    fn from_double(&self, target: TargetType, value: f64) -> CastResult {
        match target {
            TargetType::Boolean => Err(CastFailure::unsupported("double", target)),
            TargetType::Long => truncate(value).map(Value::from),
            TargetType::Double | TargetType::Json => double(value),
            TargetType::String => match Number::from_f64(value) {
                Some(n) => Ok(Value::String(n.to_string())),
                None => Ok(Value::String(value.to_string())),
            },
            TargetType::Timestamp => self
                .timestamps
                .from_epoch_fractional(value)
                .map(Value::String),
        }
    }

    fn from_string(&self, target: TargetType, value: &str) -> CastResult {
        match target {
            TargetType::Boolean => {
                let lowered = value.to_ascii_lowercase();
                if TRUE_STRINGS.contains(&lowered.as_str()) {
                    Ok(Value::Bool(true))
                } else if FALSE_STRINGS.contains(&lowered.as_str()) {
                    Ok(Value::Bool(false))
                } else {
                    Err(CastFailure::new(format!("'{}' is not a boolean", value)))
                }
            }
            TargetType::Long => {
                if let Ok(n) = value.parse::<i64>() {
                    return Ok(Value::from(n));
                }
                let parsed = value
                    .parse::<f64>()
                    .map_err(|_| CastFailure::new(format!("'{}' is not a number", value)))?;
                truncate(parsed).map(Value::from)
            }
            TargetType::Double => {
                let parsed = value
                    .parse::<f64>()
                    .map_err(|_| CastFailure::new(format!("'{}' is not a number", value)))?;
                double(parsed)
            }
            TargetType::String => Ok(Value::String(value.to_string())),
            TargetType::Timestamp => {
                let instant = self.timestamps.parse(value)?;
                Ok(Value::String(self.timestamps.render(instant)))
            }
            TargetType::Json => serde_json::from_str(value)
                .map_err(|e| CastFailure::new(format!("'{}' is not valid JSON: {}", value, e))),
        }
    }
}

/// Wrap a float, rejecting values JSON cannot represent
fn double(value: f64) -> CastResult {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| CastFailure::new(format!("{} is not a finite number", value)))
}

/// Truncate toward zero, rejecting values outside the `i64` range
fn truncate(value: f64) -> Result<i64, CastFailure> {
    // 2^63 is exactly representable; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() || value >= LIMIT || value < -LIMIT {
        return Err(CastFailure::new(format!("{} is out of range for long", value)));
    }
    Ok(value.trunc() as i64)
}
