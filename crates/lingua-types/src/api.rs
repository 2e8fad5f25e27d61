//! Wire types for the backend HTTP API (`/api/v1`).

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::message::Message;
use crate::session::{self, ChatSession};

/// Query value the backend treats as "return the history, add nothing".
pub const HISTORY_SENTINEL: &str = "load history";

/// True if `query` would be interpreted by the backend as the history sentinel.
pub fn is_history_sentinel(query: &str) -> bool {
    query.trim().eq_ignore_ascii_case(HISTORY_SENTINEL)
}

// ─── Sessions ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub created: String,
    pub message_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: HashMap<String, SessionInfo>,
}

impl SessionsResponse {
    /// Flatten the id → info map into a list, newest first
    pub fn into_sessions(self) -> Vec<ChatSession> {
        let mut sessions: Vec<ChatSession> = self
            .sessions
            .into_iter()
            .map(|(id, info)| ChatSession::new(id, info.created, info.message_count))
            .collect();
        session::sort_newest_first(&mut sessions);
        sessions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSessionRequest {
    pub session_id: String,
}

/// Generic `{status, message}` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ─── Chat ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextQueryRequest {
    pub query: String,
    pub session_id: Option<String>,
    pub output_as_voice: bool,
}

impl TextQueryRequest {
    pub fn text(query: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            query: query.into(),
            session_id,
            output_as_voice: false,
        }
    }

    pub fn voice(query: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            output_as_voice: true,
            ..Self::text(query, session_id)
        }
    }

    pub fn load_history(session_id: impl Into<String>) -> Self {
        Self::text(HISTORY_SENTINEL, Some(session_id.into()))
    }
}

/// Reply to `POST /text-query/`. Every field is optional on the wire: the
/// backend's content filter answers with `text_response` alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextQueryResponse {
    #[serde(default)]
    pub text_response: Option<String>,
    #[serde(default)]
    pub chat_history: Option<Vec<Message>>,
    #[serde(default)]
    pub session_id: Option<String>,
    /// Base64-encoded audio, present when `output_as_voice` was set
    #[serde(default)]
    pub audio_response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessageRequest {
    pub session_id: String,
    pub message_index: usize,
    pub new_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessageResponse {
    pub status: String,
    #[serde(default)]
    pub chat_history: Vec<Message>,
}

impl EditMessageResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ─── Speech & translation ────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToSpeechRequest {
    pub text: String,
    /// ISO-639-1 code
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<String>,
}
