use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A server-side chat session as seen by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    /// Creation timestamp exactly as the server reported it
    pub created: String,
    pub message_count: usize,
}

impl ChatSession {
    pub fn new(id: impl Into<String>, created: impl Into<String>, message_count: usize) -> Self {
        Self {
            id: id.into(),
            created: created.into(),
            message_count,
        }
    }

    /// Parsed creation time. The server emits naive ISO-8601 timestamps;
    /// RFC 3339 with an offset is accepted too.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.created) {
            return Some(dt.naive_local());
        }
        NaiveDateTime::parse_from_str(&self.created, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    /// Human-readable creation time for the session list
    pub fn created_label(&self) -> String {
        match self.created_at() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => self.created.clone(),
        }
    }
}

/// Order sessions newest first. Unparseable timestamps sink to the end;
/// ties fall back to the id so the order is stable across reloads.
pub fn sort_newest_first(sessions: &mut [ChatSession]) {
    sessions.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id.cmp(&b.id))
    });
}
