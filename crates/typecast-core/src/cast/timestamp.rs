//! Timestamp parsing and rendering
//!
//! JSON has no timestamp type, so timestamps are rendered as strings with a
//! strftime-style format in a fixed timezone.

use super::CastFailure;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

/// Default rendering format
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f %:z";

/// Default rendering timezone
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Format and timezone used to parse and render timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampSettings {
    format: String,
    timezone: FixedOffset,
}

impl Default for TimestampSettings {
    fn default() -> Self {
        Self {
            format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            timezone: utc(),
        }
    }
}

impl TimestampSettings {
    /// Build settings, validating both the format and the timezone
    pub fn new(format: &str, timezone: &str) -> Result<Self, String> {
        validate_format(format)?;
        let timezone = parse_timezone(timezone)
            .ok_or_else(|| format!("invalid timezone '{}', expected UTC or ±HH:MM", timezone))?;
        Ok(Self {
            format: format.to_string(),
            timezone,
        })
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn timezone(&self) -> FixedOffset {
        self.timezone
    }

    /// Render an instant in the configured timezone
    pub fn render(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.timezone)
            .format(&self.format)
            .to_string()
    }

    /// Interpret seconds since the Unix epoch
    pub fn from_epoch_seconds(&self, seconds: i64) -> Result<String, CastFailure> {
        DateTime::from_timestamp(seconds, 0)
            .map(|instant| self.render(instant))
            .ok_or_else(|| CastFailure::new(format!("epoch seconds {} out of range", seconds)))
    }

    /// Interpret fractional seconds since the Unix epoch
    pub fn from_epoch_fractional(&self, seconds: f64) -> Result<String, CastFailure> {
        let out_of_range = || CastFailure::new(format!("epoch seconds {} out of range", seconds));
        if !seconds.is_finite() {
            return Err(out_of_range());
        }
        let whole = seconds.floor();
        if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
            return Err(out_of_range());
        }
        let nanos = (((seconds - whole) * 1_000_000_000.0).round() as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
            .map(|instant| self.render(instant))
            .ok_or_else(out_of_range)
    }

    /// Parse text with the configured format, falling back to RFC 3339.
    ///
    /// A format without an offset is read as local time in the configured
    /// timezone.
    pub fn parse(&self, text: &str) -> Result<DateTime<Utc>, CastFailure> {
        if let Ok(parsed) = DateTime::parse_from_str(text, &self.format) {
            return Ok(parsed.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, &self.format) {
            if let Some(local) = self.timezone.from_local_datetime(&naive).single() {
                return Ok(local.with_timezone(&Utc));
            }
        }
        DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| {
                CastFailure::new(format!(
                    "'{}' does not match format '{}' or RFC 3339",
                    text, self.format
                ))
            })
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn validate_format(format: &str) -> Result<(), String> {
    if format.is_empty() {
        return Err("timestamp format must not be empty".to_string());
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid timestamp format '{}'", format));
    }
    Ok(())
}

/// Parse `UTC`, `Z` or a fixed offset such as `+09:00` / `-0530`
pub fn parse_timezone(text: &str) -> Option<FixedOffset> {
    if text.eq_ignore_ascii_case("utc") || text.eq_ignore_ascii_case("z") {
        return Some(utc());
    }

    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if !rest.is_ascii() {
        return None;
    }
    // HHMM or HH:MM
    let (hours, minutes) = match rest.len() {
        4 => rest.split_at(2),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("UTC"), Some(utc()));
        assert_eq!(parse_timezone("z"), Some(utc()));
        assert_eq!(parse_timezone("+09:00"), FixedOffset::east_opt(9 * 3600));
        assert_eq!(parse_timezone("-0530"), FixedOffset::east_opt(-(5 * 3600 + 30 * 60)));
        assert_eq!(parse_timezone("Asia/Tokyo"), None);
        assert_eq!(parse_timezone("+25:00"), None);
        assert_eq!(parse_timezone("+9"), None);
        assert_eq!(parse_timezone("+0:900"), None);
        assert_eq!(parse_timezone("+09:0:0"), None);
        assert_eq!(parse_timezone("+0900:"), None);
        assert_eq!(parse_timezone("-09+00"), None);
        assert_eq!(parse_timezone("+0é0"), None);
        assert_eq!(parse_timezone(""), None);
    }

    #[test]
    fn test_new_validates() {
        assert!(TimestampSettings::new("%Y-%m-%d", "UTC").is_ok());
        assert!(TimestampSettings::new("", "UTC").is_err());
        assert!(TimestampSettings::new("%Y-%m-%d", "nowhere").is_err());
    }

    #[test]
    fn test_epoch_seconds() {
        let settings = TimestampSettings::default();
        assert_eq!(
            settings.from_epoch_seconds(0).unwrap(),
            "1970-01-01 00:00:00.000000 +00:00"
        );
        assert_eq!(
            settings.from_epoch_fractional(1.5).unwrap(),
            "1970-01-01 00:00:01.500000 +00:00"
        );
        assert!(settings.from_epoch_fractional(f64::NAN).is_err());
        assert!(settings.from_epoch_seconds(i64::MAX).is_err());
    }

    #[test]
    fn test_render_in_timezone() {
        let settings = TimestampSettings::new("%Y-%m-%dT%H:%M:%S%:z", "+09:00").unwrap();
        assert_eq!(settings.from_epoch_seconds(0).unwrap(), "1970-01-01T09:00:00+09:00");
    }

    #[test]
    fn test_parse_with_format_and_fallback() {
        let settings = TimestampSettings::new("%Y-%m-%d %H:%M:%S", "+01:00").unwrap();
        let local = settings.parse("2024-03-01 10:00:00").unwrap();
        assert_eq!(local.to_rfc3339(), "2024-03-01T09:00:00+00:00");

        let rfc = settings.parse("2024-03-01T10:00:00Z").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-03-01T10:00:00+00:00");

        assert!(settings.parse("yesterday").is_err());
    }
}
