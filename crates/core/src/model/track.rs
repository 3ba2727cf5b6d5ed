use serde::{Deserialize, Deserializer, Serialize};

/// A horizontal lane (e.g. a conference room) holding zero or more sessions.
///
/// Sessions are expected in ascending start order; layout reads them in
/// stored order and never reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Style class applied to the track's rows and title, if any.
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub style_class: Option<String>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl Track {
    pub fn new(title: impl Into<String>, sessions: Vec<Session>) -> Self {
        Self {
            title: title.into(),
            style_class: None,
            sessions,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.style_class = Some(class.into());
        self
    }

    /// The style class, if present and non-empty.
    pub fn class(&self) -> Option<&str> {
        self.style_class.as_deref().filter(|c| !c.is_empty())
    }
}

/// A single scheduled item.
///
/// Timestamps are epoch seconds (UTC). A timestamp that was missing or not
/// numeric in the source document is `None` and lays out as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_timestamp: Option<i64>,
}

impl Session {
    pub fn new(title: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            title: title.into(),
            start_timestamp: Some(start),
            end_timestamp: Some(end),
        }
    }

    /// Start in epoch seconds, NaN when absent.
    pub fn start_secs(&self) -> f64 {
        self.start_timestamp.map_or(f64::NAN, |t| t as f64)
    }

    /// End in epoch seconds, NaN when absent.
    pub fn end_secs(&self) -> f64 {
        self.end_timestamp.map_or(f64::NAN, |t| t as f64)
    }
}

/// Accept integers, integral floats, and decimal strings ("1368640800").
/// Anything else becomes `None` instead of failing the whole document.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => parse_leading_integer(&s),
        _ => None,
    })
}

/// Parse the leading base-10 integer of a string, ignoring leading
/// whitespace and any trailing garbage ("1368640800abc" -> 1368640800).
fn parse_leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_feed_shape() {
        let json = r#"{
            "title": "Room 1",
            "class": "room-1",
            "sessions": [
                {"title": "Keynote", "startTimestamp": "1368637200", "endTimestamp": 1368642600}
            ]
        }"#;
        let track: Track = serde_json::from_str(json).unwrap_or_else(|_| Track::new("", vec![]));
        assert_eq!(track.title, "Room 1");
        assert_eq!(track.class(), Some("room-1"));
        assert_eq!(track.sessions.len(), 1);
        assert_eq!(track.sessions[0].start_timestamp, Some(1_368_637_200));
        assert_eq!(track.sessions[0].end_timestamp, Some(1_368_642_600));
    }

    #[test]
    fn malformed_timestamps_become_absent() {
        let json = r#"{"title": "Broken", "startTimestamp": "soon", "endTimestamp": null}"#;
        let session: Option<Session> = serde_json::from_str(json).ok();
        let session = session.unwrap_or_else(|| Session::new("", 0, 0));
        assert_eq!(session.title, "Broken");
        assert_eq!(session.start_timestamp, None);
        assert_eq!(session.end_timestamp, None);
        assert!(session.start_secs().is_nan());
    }

    #[test]
    fn missing_timestamps_and_sessions_default() {
        let json = r#"{"title": "Empty"}"#;
        let track: Option<Track> = serde_json::from_str(json).ok();
        assert!(track.is_some_and(|t| t.sessions.is_empty() && t.class().is_none()));
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(parse_leading_integer("  42px"), Some(42));
        assert_eq!(parse_leading_integer("-7"), Some(-7));
        assert_eq!(parse_leading_integer("abc"), None);
        assert_eq!(parse_leading_integer(""), None);
    }

    #[test]
    fn empty_class_is_ignored() {
        let track = Track::new("A", vec![]).with_class("");
        assert_eq!(track.class(), None);
    }
}
