use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Messages longer than this many characters count as "long" in the stats.
pub const LONG_MESSAGE_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMessage {
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
}

/// Spreadsheet-backed rows carry nulls for blank cells and numbers for cells
/// the sheet auto-typed. Both read as text; only nested values are rejected.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!("expected text, found {other}"))),
    }
}

impl GuestMessage {
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }

    pub fn is_long(&self) -> bool {
        self.message.chars().count() > LONG_MESSAGE_CHARS
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.message.to_lowercase().contains(needle)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("response was not valid JSON: {0}")]
    Decode(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    pub total: usize,
    pub long: usize,
}

/// Turns a response body into messages. Anything that is not an array is an
/// empty collection; rows without a usable name are dropped.
pub fn decode_collection(body: serde_json::Value) -> Vec<GuestMessage> {
    let serde_json::Value::Array(rows) = body else {
        tracing::debug!("message response is not an array, treating as empty");
        return Vec::new();
    };

    rows.into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value::<GuestMessage>(row) {
            Ok(msg) if !msg.name.trim().is_empty() => Some(msg),
            Ok(_) => {
                tracing::warn!(row = idx, "dropping guest message without a name");
                None
            }
            Err(e) => {
                tracing::warn!(row = idx, error = %e, "dropping malformed guest message");
                None
            }
        })
        .collect()
}

/// Parses a raw response body. Only text that is not JSON at all is an
/// error; the shape is checked later by [`decode_collection`].
pub fn parse_body(text: &str) -> Result<serde_json::Value, FetchError> {
    serde_json::from_str(text).map_err(|e| FetchError::Decode(e.to_string()))
}

pub fn filter<'a>(messages: &'a [GuestMessage], query: &str) -> Vec<&'a GuestMessage> {
    if query.trim().is_empty() {
        return messages.iter().collect();
    }
    let needle = query.to_lowercase();
    messages.iter().filter(|m| m.matches(&needle)).collect()
}

pub fn stats(messages: &[GuestMessage]) -> MessageStats {
    MessageStats {
        total: messages.len(),
        long: messages.iter().filter(|m| m.is_long()).count(),
    }
}

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";
const SHEET_FORMATS: [&str; 2] = ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"];

pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Recently".into();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    for fmt in SHEET_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(name: &str, message: &str) -> GuestMessage {
        GuestMessage {
            timestamp: String::new(),
            name: name.into(),
            message: message.into(),
        }
    }

    fn sample() -> Vec<GuestMessage> {
        vec![
            msg("Anna", "Congratulations!"),
            msg("Ben", "Say hi to Anna"),
            msg("Carla", "See you at the reception"),
        ]
    }

    #[test]
    fn blank_query_returns_everything_in_order() {
        let all = sample();
        for query in ["", "   ", "\t"] {
            let names: Vec<&str> = filter(&all, query).iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names, vec!["Anna", "Ben", "Carla"]);
        }
    }

    #[test]
    fn query_matches_name_or_message_ignoring_case() {
        let all = sample();
        let names: Vec<&str> = filter(&all, "anna").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Ben"]);

        let names: Vec<&str> = filter(&all, "RECEPTION").iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Carla"]);
        assert!(filter(&all, "zzz").is_empty());
    }

    #[test]
    fn long_messages_are_over_one_hundred_chars() {
        let set = vec![msg("a", &"x".repeat(101)), msg("b", "short"), msg("c", &"y".repeat(100))];
        assert_eq!(stats(&set), MessageStats { total: 3, long: 1 });
    }

    #[test]
    fn non_array_body_is_empty() {
        assert!(decode_collection(json!("not an array")).is_empty());
        assert!(decode_collection(json!({"messages": []})).is_empty());
        assert!(decode_collection(serde_json::Value::Null).is_empty());
        let body = parse_body("\"not an array\"").expect("valid json");
        assert!(decode_collection(body).is_empty());
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        assert!(matches!(parse_body("<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn decoding_defaults_missing_fields_and_drops_bad_rows() {
        let body = json!([
            {"name": "Anna", "message": "hi", "timestamp": "2025-01-05T15:04:00Z"},
            {"name": "Ben"},
            {"message": "no name"},
            {"name": "   ", "message": "blank name"},
            42,
            {"name": 7, "message": "numeric name"}
        ]);
        let decoded = decode_collection(body);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[1], msg("Ben", ""));
    }

    #[test]
    fn null_and_numeric_cells_read_as_text() {
        let body = json!([
            {"name": "Anna", "message": "hi", "timestamp": null},
            {"name": "Ben", "message": null, "timestamp": "2025-01-05T15:04:00Z"},
            {"name": "Carla", "timestamp": 1736089440000_u64},
            {"name": "Dee", "message": true},
            {"name": "Eli", "message": {"nested": "x"}}
        ]);
        let decoded = decode_collection(body);
        let names: Vec<&str> = decoded.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Ben", "Carla", "Dee"]);
        assert_eq!(decoded[0].timestamp, "");
        assert_eq!(decoded[1].message, "");
        assert_eq!(decoded[2].timestamp, "1736089440000");
        assert_eq!(decoded[3].message, "true");
    }

    #[test]
    fn initial_is_uppercased_first_letter() {
        assert_eq!(msg("anna", "").initial(), "A");
        assert_eq!(msg(" élodie", "").initial(), "É");
        assert_eq!(msg("", "").initial(), "");
    }

    #[test]
    fn timestamps_render_for_display() {
        assert_eq!(format_timestamp(""), "Recently");
        assert_eq!(format_timestamp("2025-01-05T15:04:00Z"), "Jan 5, 2025, 03:04 PM");
        assert_eq!(format_timestamp("3/14/2025 9:30:00"), "Mar 14, 2025, 09:30 AM");
        assert_eq!(format_timestamp("last summer"), "last summer");
    }
}
