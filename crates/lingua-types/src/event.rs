use serde::{Deserialize, Serialize};
use crate::message::HistoryEntry;
use crate::session::ChatSession;

/// A user-initiated action that is waiting on the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    LoadSessions,
    LoadHistory,
    Send,
    Edit,
    Delete,
    Speech,
    Translate,
    TextToSpeech,
}

impl Activity {
    pub fn label(&self) -> &str {
        match self {
            Activity::LoadSessions => "Loading sessions...",
            Activity::LoadHistory => "Loading history...",
            Activity::Send => "Thinking...",
            Activity::Edit => "Editing...",
            Activity::Delete => "Deleting...",
            Activity::Speech => "Generating speech...",
            Activity::Translate => "Translating...",
            Activity::TextToSpeech => "Generating speech...",
        }
    }
}

/// Events emitted by the client core.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A network round-trip started
    ActivityStart { activity: Activity },

    /// A network round-trip finished, successfully or not
    ActivityEnd { activity: Activity },

    /// The session list was (re)loaded
    SessionsLoaded { sessions: Vec<ChatSession> },

    /// Local history was replaced, extended or rolled back
    HistoryChanged {
        session_id: Option<String>,
        entries: Vec<HistoryEntry>,
    },

    /// Delete gate armed (`Some`) or disarmed (`None`)
    DeleteArmed { session_id: Option<String> },

    /// A session was deleted on the server
    SessionDeleted { session_id: String },

    /// Audio playback started / finished
    PlaybackStarted,
    PlaybackEnded,

    /// Microphone capture started / finished
    ListeningStarted,
    ListeningEnded,

    /// Translator produced output
    TranslationReady { text: String },

    /// Supported language names fetched from the backend
    LanguagesLoaded { languages: Vec<String> },

    /// Something the user must be told about right away
    Alert { message: String },

    /// An action failed
    Error { message: String },
}
