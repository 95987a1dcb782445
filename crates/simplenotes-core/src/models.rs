//! Data model shared by the note store client and the view controller.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Opaque note identifier assigned by the remote store.
///
/// The reference server hands out numeric ids; string ids are accepted as
/// well so the client never has to interpret them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NoteId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    /// Integers become [`NoteId::Number`], anything else non-empty is kept as text.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidInput("note id cannot be empty".to_string()));
        }
        Ok(match s.parse::<i64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

// =============================================================================
// TAGS
// =============================================================================

/// Category attached to every note.
///
/// The four known tags are fixed. Values the server returns outside that set
/// are kept verbatim in [`NoteTag::Unrecognized`] so that a single odd record
/// cannot break deserialization of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NoteTag {
    Work,
    Personal,
    Ideas,
    Reminders,
    Unrecognized(String),
}

impl NoteTag {
    /// Known tags, in the order the interface lists them.
    pub const KNOWN: [NoteTag; 4] = [
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Ideas,
        NoteTag::Reminders,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Ideas => "ideas",
            Self::Reminders => "reminders",
            Self::Unrecognized(other) => other,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Ideas => "Ideas",
            Self::Reminders => "Reminders",
            Self::Unrecognized(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Default for NoteTag {
    fn default() -> Self {
        crate::defaults::DRAFT_TAG
    }
}

impl From<String> for NoteTag {
    fn from(s: String) -> Self {
        match s.as_str() {
            "work" => Self::Work,
            "personal" => Self::Personal,
            "ideas" => Self::Ideas,
            "reminders" => Self::Reminders,
            _ => Self::Unrecognized(s),
        }
    }
}

impl From<NoteTag> for String {
    fn from(tag: NoteTag) -> Self {
        match tag {
            NoteTag::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTag {
    type Err = Error;

    /// Parses user input; only the four known tags are accepted.
    fn from_str(s: &str) -> Result<Self> {
        match NoteTag::from(s.trim().to_lowercase()) {
            NoteTag::Unrecognized(other) => Err(Error::InvalidInput(format!(
                "Invalid tag: {} (expected work, personal, ideas or reminders)",
                other
            ))),
            known => Ok(known),
        }
    }
}

// =============================================================================
// NOTES
// =============================================================================

/// A note as stored by the remote collection.
///
/// The server stores whatever it is sent, so everything but the id is read
/// leniently: a null or missing title, content or tag becomes empty, and a
/// date that cannot be read becomes `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default = "missing_tag", deserialize_with = "lenient_tag")]
    pub tag: NoteTag,
    /// Creation instant. Records written by other clients may lack one.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

fn missing_tag() -> NoteTag {
    NoteTag::Unrecognized(String::new())
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_tag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NoteTag, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => NoteTag::from(s),
        _ => missing_tag(),
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => parse_note_date(&s),
        _ => None,
    })
}

/// RFC 3339, or a local date-time without offset read as UTC
/// (`2024-01-01T00:00:00.123`).
pub fn parse_note_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Payload for creating a note.
///
/// Title and content are validated on construction, so a `NewNote` is
/// always fit to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewNote {
    title: String,
    content: String,
    tag: NoteTag,
    #[serde(serialize_with = "serialize_iso_millis")]
    date: DateTime<Utc>,
}

impl NewNote {
    /// Build a payload, rejecting blank title or content.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tag: NoteTag,
        date: DateTime<Utc>,
    ) -> Result<Self> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }
        if content.trim().is_empty() {
            return Err(Error::InvalidInput("content cannot be empty".to_string()));
        }

        Ok(Self {
            title,
            content,
            tag,
            date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tag(&self) -> &NoteTag {
        &self.tag
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Materialize the stored record once the server has assigned an id.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            tag: self.tag,
            date: Some(self.date),
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix, e.g.
/// `2024-01-02T03:04:05.678Z`.
fn serialize_iso_millis<S: Serializer>(
    date: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_note_deserializes_numeric_id() {
        let json = r#"{"id":1,"title":"Groceries","content":"milk, eggs","tag":"personal","date":"2024-01-01T00:00:00Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, NoteId::Number(1));
        assert_eq!(note.tag, NoteTag::Personal);
        assert_eq!(
            note.date,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_note_deserializes_string_id() {
        let json = r#"{"id":"abc-1","title":"t","content":"c","tag":"work","date":"2024-01-01T00:00:00.000Z"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, NoteId::Text("abc-1".to_string()));
    }

    #[test]
    fn test_note_keeps_unrecognized_tag() {
        let json = r#"{"id":7,"title":"t","content":"c","tag":"urgent","date":null}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.tag, NoteTag::Unrecognized("urgent".to_string()));
        assert!(!note.tag.is_known());
        assert_eq!(note.date, None);
    }

    #[test]
    fn test_note_missing_date_defaults_to_none() {
        let json = r#"{"id":7,"title":"t","content":"c","tag":"ideas"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.date, None);
    }

    #[test]
    fn test_note_date_without_offset_is_read_as_utc() {
        let json = r#"{"id":3,"title":"t","content":"c","tag":"work","date":"2024-01-01T00:00:00.123"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(
            note.date,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::milliseconds(123))
        );
    }

    #[test]
    fn test_note_unreadable_date_becomes_none() {
        for date in [r#""yesterday""#, "1704067200", r#"{"y":2024}"#] {
            let json = format!(
                r#"{{"id":3,"title":"t","content":"c","tag":"work","date":{}}}"#,
                date
            );
            let note: Note = serde_json::from_str(&json).unwrap();
            assert_eq!(note.date, None, "date {}", date);
        }
    }

    #[test]
    fn test_note_null_or_missing_fields_are_tolerated() {
        let json = r#"{"id":4,"title":null,"content":"c","tag":null,"date":null}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.tag, NoteTag::Unrecognized(String::new()));
        assert!(!note.tag.is_known());

        let note: Note = serde_json::from_str(r#"{"id":5}"#).unwrap();
        assert_eq!(note.content, "");
        assert_eq!(note.tag, NoteTag::Unrecognized(String::new()));
    }

    #[test]
    fn test_one_odd_record_does_not_break_collection() {
        let json = r#"[
            {"id":1,"title":"Groceries","content":"milk","tag":"personal","date":"2024-01-01T00:00:00Z"},
            {"id":2,"title":"Legacy","content":"x","tag":null,"date":"2024-01-01T00:00:00.123"}
        ]"#;
        let notes: Vec<Note> = serde_json::from_str(json).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].tag, NoteTag::Personal);
        assert!(notes[1].date.is_some());
    }

    #[test]
    fn test_parse_note_date_accepts_offsets() {
        assert_eq!(
            parse_note_date("2024-01-01T02:00:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_note_date("2024-01-01T00:00:00"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_note_date(""), None);
    }

    #[test]
    fn test_tag_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&NoteTag::Reminders).unwrap(), r#""reminders""#);
        assert_eq!(
            serde_json::to_string(&NoteTag::Unrecognized("misc".into())).unwrap(),
            r#""misc""#
        );
    }

    #[test]
    fn test_tag_default_is_ideas() {
        assert_eq!(NoteTag::default(), NoteTag::Ideas);
    }

    #[test]
    fn test_tag_from_str_accepts_known_case_insensitive() {
        assert_eq!("Work".parse::<NoteTag>().unwrap(), NoteTag::Work);
        assert_eq!(" reminders ".parse::<NoteTag>().unwrap(), NoteTag::Reminders);
    }

    #[test]
    fn test_tag_from_str_rejects_unknown() {
        let err = "urgent".parse::<NoteTag>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_tag_wire_match_is_exact() {
        assert_eq!(
            NoteTag::from("Work".to_string()),
            NoteTag::Unrecognized("Work".to_string())
        );
    }

    #[test]
    fn test_note_id_display_and_parse() {
        assert_eq!(NoteId::Number(42).to_string(), "42");
        assert_eq!("42".parse::<NoteId>().unwrap(), NoteId::Number(42));
        assert_eq!(
            "a1b2".parse::<NoteId>().unwrap(),
            NoteId::Text("a1b2".to_string())
        );
        assert!("  ".parse::<NoteId>().is_err());
    }

    #[test]
    fn test_new_note_serializes_wire_shape() {
        let note = NewNote::new("Launch plan", "ship v2", NoteTag::Work, fixed_date()).unwrap();
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Launch plan",
                "content": "ship v2",
                "tag": "work",
                "date": "2024-01-02T03:04:05.000Z",
            })
        );
    }

    #[test]
    fn test_new_note_rejects_blank_title() {
        let err = NewNote::new("   ", "body", NoteTag::Ideas, fixed_date()).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_new_note_rejects_blank_content() {
        let err = NewNote::new("title", "\n", NoteTag::Ideas, fixed_date()).unwrap_err();
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_into_note_keeps_fields() {
        let note = NewNote::new("t", "c", NoteTag::Personal, fixed_date())
            .unwrap()
            .into_note(NoteId::Number(3));
        assert_eq!(note.id, NoteId::Number(3));
        assert_eq!(note.title, "t");
        assert_eq!(note.tag, NoteTag::Personal);
        assert_eq!(note.date, Some(fixed_date()));
    }
}
