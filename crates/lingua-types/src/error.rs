use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinguaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Timeout after {0}ms")]
    Timeout(u32),

    #[error("Unexpected response: missing {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0} is not supported in this browser")]
    CapabilityMissing(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("\"{0}\" is reserved and cannot be sent as a message")]
    ReservedQuery(String),

    #[error("No active session")]
    NoActiveSession,

    #[error("No message at index {0}")]
    InvalidIndex(usize),

    #[error("Deletion of session {0} was not confirmed")]
    DeleteNotConfirmed(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Superseded by a newer request")]
    Superseded,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl LinguaError {
    /// Stale-response drops are expected under overlapping actions and are
    /// not shown to the user.
    pub fn is_superseded(&self) -> bool {
        matches!(self, LinguaError::Superseded)
    }
}

impl From<serde_json::Error> for LinguaError {
    fn from(e: serde_json::Error) -> Self {
        LinguaError::Serialization(e.to_string())
    }
}

impl From<base64::DecodeError> for LinguaError {
    fn from(e: base64::DecodeError) -> Self {
        LinguaError::Audio(format!("invalid base64 payload: {}", e))
    }
}
