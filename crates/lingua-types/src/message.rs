use serde::{Deserialize, Serialize};

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(&self) -> &str {
        match self {
            Role::User => "You",
            Role::Assistant => "Assistant",
        }
    }
}

/// A single message in a conversation, as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Wall-clock time the message was written, e.g. "14:05"
    #[serde(default)]
    pub time: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            time: clock_time(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            time: clock_time(),
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// A message in the local history cache.
///
/// `ticket` is set on optimistic entries and names the request that added
/// them, so a failed request removes exactly its own entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message: Message,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ticket: Option<u64>,
}

impl HistoryEntry {
    pub fn confirmed(message: Message) -> Self {
        Self { message, ticket: None }
    }

    pub fn provisional(message: Message, ticket: u64) -> Self {
        Self {
            message,
            ticket: Some(ticket),
        }
    }

    pub fn is_provisional(&self) -> bool {
        self.ticket.is_some()
    }
}

fn clock_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
