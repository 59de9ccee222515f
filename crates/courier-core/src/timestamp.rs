//! Lenient timestamp decoding.
//!
//! Services send RFC 3339 instants, but some records carry naive ISO 8601
//! timestamps with no offset. Naive timestamps are read as UTC.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an RFC 3339 timestamp, falling back to a naive one taken as UTC.
///
/// ```
/// use courier_core::timestamp;
///
/// let offset = timestamp::parse("2024-01-01T09:00:00+09:00").unwrap();
/// let naive = timestamp::parse("2024-01-01T00:00:00").unwrap();
/// assert_eq!(offset, naive);
/// ```
pub fn parse(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(at) => Ok(at.with_timezone(&Utc)),
        Err(err) => NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or(err),
    }
}

/// Deserializes a timestamp field with [`parse`].
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(|err| de::Error::custom(format!("invalid timestamp {text:?}: {err}")))
}

/// Deserializes a nullable timestamp field with [`parse`].
pub fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|text| {
            parse(&text).map_err(|err| de::Error::custom(format!("invalid timestamp {text:?}: {err}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[derive(Debug, Deserialize)]
    struct Ranked {
        #[serde(default, deserialize_with = "deserialize_option")]
        ranked_at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_rfc3339() {
        let at = parse("2024-03-01T12:00:00Z").unwrap();
        assert_eq!(at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let at = parse("2024-01-01T00:00:00").unwrap();
        assert_eq!(at, parse("2024-01-01T00:00:00Z").unwrap());
    }

    #[test]
    fn test_parse_naive_with_microseconds() {
        let at = parse("2024-01-01T00:00:00.123456").unwrap();
        assert_eq!(at.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(
            parse("2024-01-01 06:30:00").unwrap(),
            parse("2024-01-01T06:30:00Z").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("yesterday").is_err());
        assert!(parse("2024-01-01").is_err());
    }

    #[test]
    fn test_deserialize_option_handles_null_and_missing() {
        let ranked: Ranked = serde_json::from_str(r#"{"ranked_at": null}"#).unwrap();
        assert!(ranked.ranked_at.is_none());

        let ranked: Ranked = serde_json::from_str("{}").unwrap();
        assert!(ranked.ranked_at.is_none());

        let ranked: Ranked = serde_json::from_str(r#"{"ranked_at": "2014-05-18T17:16:30"}"#).unwrap();
        assert_eq!(ranked.ranked_at, Some(parse("2014-05-18T17:16:30Z").unwrap()));
    }

    #[test]
    fn test_deserialize_error_names_the_value() {
        let err = serde_json::from_str::<Ranked>(r#"{"ranked_at": "soon"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp \"soon\""));
    }
}
