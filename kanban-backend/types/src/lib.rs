//! Shared types for the kanban notes backend and its HTTP clients.

use serde::{Deserialize, Serialize};

/// Column a freshly created note lands in.
pub const DEFAULT_NOTE_TYPE: &str = "ideas";

// =====================================================
// Domain Types
// =====================================================

/// A single note card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    /// Column/category label (e.g. "ideas", "doing", "done")
    #[serde(rename = "type")]
    pub note_type: String,
    pub text: String,
}

// =====================================================
// Request Types
// =====================================================

/// POST /notes
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// PUT /notes/text/{id}
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateNoteTextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// PUT /notes/type/{id}
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateNoteTypeRequest {
    #[serde(rename = "type", default)]
    pub note_type: Option<String>,
}

/// Strips leading/trailing whitespace, including the U+FEFF byte order mark.
pub fn trim_field(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Returns the value only if it holds something besides whitespace.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !trim_field(v).is_empty())
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub ok: bool,
    pub note: Note,
}

impl NoteResponse {
    pub fn ok(note: Note) -> Self {
        Self { ok: true, note }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListNotesResponse {
    pub ok: bool,
    /// Size of the whole collection
    pub total: i64,
    pub notes: Vec<Note>,
}

/// Error payload: a `{ message }` object for client errors, the raw error
/// text for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message { message: String },
    Raw(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

impl ErrorResponse {
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: ErrorDetail::Message { message: msg.into() },
        }
    }

    pub fn raw(err: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: ErrorDetail::Raw(err.into()),
        }
    }
}
