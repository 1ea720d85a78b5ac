//! Typecast configuration model
//!
//! ```yaml
//! columns:
//!   - {name: id, type: long}
//!   - {name: "$.payload.user.age", type: long}
//!   - {name: "$.payload.tags[*]", type: string}
//! stop_on_invalid_record: false
//! ```
//!
//! Declarations keep their order: when the same name is declared twice the
//! later one wins.

use crate::cast::timestamp::{DEFAULT_TIMESTAMP_FORMAT, DEFAULT_TIMEZONE};
use crate::cast::TimestampSettings;
use crate::path::is_json_path;
use crate::types::TargetType;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One declared cast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column name, or a JSON path starting with `$.`
    pub name: String,
    /// Target type
    #[serde(rename = "type")]
    pub target: TargetType,
}

impl ColumnConfig {
    pub fn new(name: impl Into<String>, target: TargetType) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Whether this declaration addresses a leaf inside a JSON column
    pub fn is_json_path(&self) -> bool {
        is_json_path(&self.name)
    }
}

/// Complete filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypecastConfig {
    /// Ordered cast declarations
    pub columns: Vec<ColumnConfig>,

    /// Abort on the first record that fails to cast instead of nulling the column
    pub stop_on_invalid_record: bool,

    /// Reject malformed JSON paths instead of silently registering them
    pub strict_paths: bool,

    /// strftime-style format used to parse and render timestamps
    pub default_timestamp_format: String,

    /// `UTC` or a fixed offset such as `+09:00`
    pub default_timezone: String,
}

impl Default for TypecastConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            stop_on_invalid_record: false,
            strict_paths: false,
            default_timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl TypecastConfig {
    pub fn new(columns: Vec<ColumnConfig>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Check the configuration for values the filter cannot work with
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.columns.iter().position(|c| c.name.trim().is_empty()) {
            return Err(Error::configuration(format!(
                "column {} has an empty name",
                index + 1
            )));
        }
        self.timestamp_settings().map(|_| ())
    }

    /// Timestamp settings derived from the defaults
    pub fn timestamp_settings(&self) -> Result<TimestampSettings> {
        TimestampSettings::new(&self.default_timestamp_format, &self.default_timezone)
            .map_err(Error::configuration)
    }

    /// Declarations addressing JSON leaves
    pub fn json_paths(&self) -> impl Iterator<Item = &ColumnConfig> {
        self.columns.iter().filter(|c| c.is_json_path())
    }

    /// Declarations addressing whole columns
    pub fn column_casts(&self) -> impl Iterator<Item = &ColumnConfig> {
        self.columns.iter().filter(|c| !c.is_json_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_defaults() {
        let config: TypecastConfig = serde_json::from_value(json!({
            "columns": [
                {"name": "id", "type": "long"},
                {"name": "$.payload.age", "type": "LONG"}
            ]
        }))
        .unwrap();

        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.columns[1].target, TargetType::Long);
        assert!(!config.stop_on_invalid_record);
        assert!(!config.strict_paths);
        assert_eq!(config.default_timezone, "UTC");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: std::result::Result<TypecastConfig, _> = serde_json::from_value(json!({
            "columns": [{"name": "id", "type": "int"}]
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown type 'int'"), "{}", err);
    }

    #[test]
    fn test_split_by_kind() {
        let config = TypecastConfig::new(vec![
            ColumnConfig::new("id", TargetType::Long),
            ColumnConfig::new("$.a.b", TargetType::String),
            ColumnConfig::new("$.a.c[*]", TargetType::Double),
        ]);
        assert_eq!(config.json_paths().count(), 2);
        let names: Vec<&str> = config.column_casts().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id"]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = TypecastConfig::new(vec![ColumnConfig::new(" ", TargetType::Long)]);
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));

        config.columns.clear();
        config.default_timezone = "Mars/Olympus".to_string();
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));

        config.default_timezone = "+02:00".to_string();
        config.default_timestamp_format = String::new();
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));
    }
}
