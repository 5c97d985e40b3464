use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an RFC 3339 string or Unix epoch milliseconds and yields an RFC 3339 string.
///
/// Strings are validated and kept verbatim; numbers are rendered with millisecond precision
/// and a `Z` suffix. `null` yields `None`.
pub fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            let datetime = DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))?;
            Ok(Some(datetime.to_rfc3339_opts(SecondsFormat::Millis, true)))
        }
        Value::String(s) => {
            s.parse::<DateTime<Utc>>()
                .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e)))?;
            Ok(Some(s))
        }
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// Session ids must be non-empty when present
pub fn deserialize_optional_session_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if s.is_empty() => Err(Error::custom("session ID cannot be empty")),
        other => Ok(other),
    }
}
