//! Shared types for the notebook service and its RPC clients.

use serde::{Deserialize, Serialize};

/// Message returned by `get_notes` when the service has no database file.
pub const NO_DATABASE_MESSAGE: &str = "No database file found.";

// =====================================================
// RPC Request Types
// =====================================================

/// Add a note under a topic, optionally enriched from Wikipedia
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNoteRequest {
    pub topic: String,
    pub text: String,
    /// ISO-8601 timestamp supplied by the caller; stored verbatim
    pub timestamp: String,
    /// Phrase to look up on Wikipedia (blank = no enrichment)
    #[serde(default)]
    pub search_term: String,
}

/// Fetch every note recorded under a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNotesRequest {
    pub topic: String,
}

// =====================================================
// RPC Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// A note as seen over the wire. Missing enrichment is an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub timestamp: String,
    #[serde(default)]
    pub wikipedia_link: String,
    #[serde(default)]
    pub wikipedia_extract: String,
}

/// Result of `get_notes`: either the topic's notes (possibly none) or a
/// notice that the service has no database file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotesListing {
    Notes { notes: Vec<Note> },
    NoDatabase { message: String },
}

impl NotesListing {
    pub fn no_database() -> Self {
        NotesListing::NoDatabase {
            message: NO_DATABASE_MESSAGE.to_string(),
        }
    }
}

/// Service health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub topic_count: usize,
    pub note_count: usize,
    /// Notes appended since the service started
    pub notes_added: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_is_tagged_on_the_wire() {
        let json = serde_json::to_value(NotesListing::no_database()).unwrap();
        assert_eq!(json["kind"], "no_database");
        assert_eq!(json["message"], NO_DATABASE_MESSAGE);

        let json = serde_json::to_value(NotesListing::Notes { notes: vec![] }).unwrap();
        assert_eq!(json["kind"], "notes");
        assert!(json["notes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_add_note_search_term_defaults_to_blank() {
        let req: AddNoteRequest = serde_json::from_str(
            r#"{"topic":"Physics","text":"F=ma","timestamp":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(req.search_term, "");
    }

    #[test]
    fn test_error_response_omits_data() {
        let json = serde_json::to_value(RpcResponse::<String>::err("topic is empty")).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"], "topic is empty");
    }
}
