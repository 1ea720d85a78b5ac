//! Strict validation of declared path patterns

use super::JSON_PATH_PREFIX;
use crate::{Error, Result};

/// Check that `pattern` is a well-formed JSON path.
///
/// Accepted shape: `$.` followed by `.`-separated segments, each a non-empty
/// base name optionally followed by bracket suffixes holding `*` or a
/// decimal index (`name`, `name[0]`, `name[*][3]`).
pub fn validate_pattern(pattern: &str) -> Result<()> {
    let rest = pattern
        .strip_prefix(JSON_PATH_PREFIX)
        .ok_or_else(|| invalid(pattern, "must start with '$.'"))?;

    for (index, segment) in rest.split('.').enumerate() {
        validate_segment(pattern, index + 1, segment)?;
    }
    Ok(())
}

fn validate_segment(pattern: &str, position: usize, segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(invalid(pattern, format!("segment {} is empty", position)));
    }

    let (base, mut suffixes) = match segment.find('[') {
        Some(at) => segment.split_at(at),
        None => (segment, ""),
    };
    if base.is_empty() {
        return Err(invalid(
            pattern,
            format!("segment {} has a bracket without a name", position),
        ));
    }
    if base.contains(']') {
        return Err(invalid(pattern, format!("unexpected ']' in segment {}", position)));
    }

    while !suffixes.is_empty() {
        let inner = suffixes
            .strip_prefix('[')
            .ok_or_else(|| invalid(pattern, format!("unexpected text after ']' in segment {}", position)))?;
        let close = inner
            .find(']')
            .ok_or_else(|| invalid(pattern, format!("unclosed '[' in segment {}", position)))?;
        let index = &inner[..close];
        if index != "*" && (index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit())) {
            return Err(invalid(
                pattern,
                format!("array index '{}' must be '*' or a non-negative integer", index),
            ));
        }
        suffixes = &inner[close + 1..];
    }
    Ok(())
}

fn invalid(pattern: &str, message: impl Into<String>) -> Error {
    Error::InvalidPath {
        pattern: pattern.to_string(),
        message: message.into(),
    }
}
