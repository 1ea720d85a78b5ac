//! Configuration loading for the CLI
//!
//! The typecast configuration comes from, in order of precedence:
//! - the `--config` flag or `TYPECAST_CONFIG`
//! - the first file found in the default locations
//!
//! Command-line switches are applied on top of the loaded file.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use typecast_core::TypecastConfig;

/// Load a configuration from a file, choosing the format by extension.
///
/// `.yaml`/`.yml` is YAML, `.toml` is TOML, anything else is JSON.
pub fn from_file(path: &Path) -> Result<TypecastConfig> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let format = ConfigFormat::of(path);
    let parsed: std::result::Result<TypecastConfig, String> = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };
    let config = parsed.map_err(|message| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: format.name().to_string(),
        message,
    })?;

    config.validate()?;
    tracing::info!(path = %path.display(), columns = config.columns.len(), "Loaded configuration");
    Ok(config)
}

/// Load from an explicit file, or from the first default location that exists
pub fn load_with_file(file: Option<&Path>) -> Result<TypecastConfig> {
    if let Some(path) = file {
        return from_file(path);
    }

    for path in default_config_paths() {
        if path.exists() {
            return from_file(&path);
        }
    }

    Err(Error::config(
        "no configuration file given; pass --config or set TYPECAST_CONFIG",
    ))
}

/// Default configuration file paths to check
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("typecast.yaml"),
        PathBuf::from("typecast.yml"),
        PathBuf::from("typecast.toml"),
        PathBuf::from("typecast.json"),
    ];

    if let Some(config_dir) = dirs::config_dir() {
        let typecast_dir = config_dir.join("typecast");
        paths.push(typecast_dir.join("config.yaml"));
        paths.push(typecast_dir.join("config.toml"));
        paths.push(typecast_dir.join("config.json"));
    }

    paths
}

/// Configuration file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;
    use typecast_core::TargetType;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_yaml() {
        let file = write_temp(
            ".yml",
            r#"
columns:
  - {name: id, type: long}
  - {name: "$.payload.tags[*]", type: string}
stop_on_invalid_record: true
"#,
        );
        let config = from_file(file.path()).unwrap();
        assert_eq!(config.columns.len(), 2);
        assert_eq!(config.columns[1].name, "$.payload.tags[*]");
        assert_eq!(config.columns[1].target, TargetType::String);
        assert!(config.stop_on_invalid_record);
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(
            ".json",
            r#"{"columns": [{"name": "$.a", "type": "double"}], "default_timezone": "-03:00"}"#,
        );
        let config = from_file(file.path()).unwrap();
        assert_eq!(config.columns[0].target, TargetType::Double);
        assert_eq!(config.default_timezone, "-03:00");
    }

    #[test]
    fn test_load_toml() {
        let file = write_temp(
            ".toml",
            r#"
strict_paths = true

[[columns]]
name = "$.items[0].price"
type = "double"
"#,
        );
        let config = from_file(file.path()).unwrap();
        assert!(config.strict_paths);
        assert_eq!(config.columns[0].name, "$.items[0].price");
        assert_eq!(config.columns[0].target, TargetType::Double);
    }

    #[test]
    fn test_format_by_extension() {
        assert_eq!(ConfigFormat::of(Path::new("a.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::of(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::of(Path::new("a.conf")), ConfigFormat::Json);
    }

    #[test]
    fn test_wrong_format_is_reported() {
        let file = write_temp(".json", "columns: []");
        assert!(matches!(
            from_file(file.path()),
            Err(Error::InvalidFormat { ref expected, .. }) if expected == "JSON"
        ));
    }

    #[test]
    fn test_yaml_parse_error_keeps_details() {
        let file = write_temp(".yaml", "columns:\n  - {name: id, type: integer}\n");
        match from_file(file.path()) {
            Err(Error::InvalidFormat {
                expected, message, ..
            }) => {
                assert_eq!(expected, "YAML");
                assert!(message.contains("unknown type 'integer'"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_temp(".yaml", "default_timezone: Somewhere/Else\n");
        assert!(matches!(from_file(file.path()), Err(Error::Core(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = from_file(Path::new("/definitely/not/here.yml"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
