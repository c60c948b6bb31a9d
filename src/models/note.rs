use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored note, as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Body for note create/update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl Note {
    /// Case-insensitive substring match against title and content.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
    }
}

/// Filter a note list by a search query, preserving order.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    notes.iter().filter(|n| n.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user_id: "u_1".to_string(),
        }
    }

    #[test]
    fn test_note_deserializes_wire_format() {
        let json = r#"{
            "id": "n_7",
            "title": "Groceries",
            "content": "eggs, flour",
            "createdAt": "2025-06-01T09:00:00Z",
            "updatedAt": "2025-06-02T10:00:00Z",
            "userId": "u_42"
        }"#;
        let parsed: Note = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title, "Groceries");
        assert_eq!(parsed.user_id, "u_42");
    }

    #[test]
    fn test_matches_title_and_content() {
        let n = note("n_1", "Meeting notes", "discuss roadmap");
        assert!(n.matches("meeting"));
        assert!(n.matches("ROADMAP"));
        assert!(!n.matches("groceries"));
    }

    #[test]
    fn test_matches_empty_query() {
        let n = note("n_1", "Anything", "at all");
        assert!(n.matches(""));
        assert!(n.matches("   "));
    }

    #[test]
    fn test_filter_notes_preserves_order() {
        let notes = vec![
            note("n_1", "alpha", "first"),
            note("n_2", "beta", "second alpha"),
            note("n_3", "gamma", "third"),
        ];
        let hits = filter_notes(&notes, "alpha");
        let ids: Vec<&str> = hits.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n_1", "n_2"]);
    }
}
