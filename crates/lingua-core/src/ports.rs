//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `lingua-core` (pure Rust).
//! Implementations live in `lingua-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::rc::Rc;
use async_trait::async_trait;
use lingua_types::{
    Result,
    api::{
        EditMessageRequest, EditMessageResponse, TextQueryRequest, TextQueryResponse,
        TextToSpeechRequest, TranslateRequest,
    },
    config::ClientConfig,
    session::ChatSession,
};

// ─── Chat Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait ChatPort {
    /// All sessions known to the backend, newest first
    async fn list_sessions(&self) -> Result<Vec<ChatSession>>;

    /// Full history of an existing session, without adding a message
    async fn load_history(&self, session_id: &str) -> Result<TextQueryResponse>;

    /// Send a query; the backend appends the exchange to the session
    async fn text_query(&self, req: TextQueryRequest) -> Result<TextQueryResponse>;

    async fn edit_message(&self, req: EditMessageRequest) -> Result<EditMessageResponse>;

    async fn delete_session(&self, session_id: &str) -> Result<()>;
}

// ─── Language Port ───────────────────────────────────────────

#[async_trait(?Send)]
pub trait LanguagePort {
    /// Synthesize speech; returns encoded audio bytes
    async fn text_to_speech(&self, req: TextToSpeechRequest) -> Result<Vec<u8>>;

    /// Translate text; returns the translated text only
    async fn translate(&self, req: TranslateRequest) -> Result<String>;

    /// Names of the languages the backend supports
    async fn languages(&self) -> Result<Vec<String>>;
}

// ─── Speech Recognition Port ─────────────────────────────────

#[async_trait(?Send)]
pub trait SpeechRecognizerPort {
    /// Run one recognition session. Resolves with the first transcript,
    /// `None` if capture ended without one, or the recognition error.
    async fn recognize(&self, locale: &str) -> Result<Option<String>>;

    /// Stop capturing; a pending `recognize` resolves with what it heard
    fn stop(&self);

    /// Tear the session down without delivering a result
    fn abort(&self);

    fn is_listening(&self) -> bool;
}

/// Whether the platform offers speech recognition at all
#[derive(Clone)]
pub enum SpeechCapability {
    Available(Rc<dyn SpeechRecognizerPort>),
    Unavailable,
}

impl SpeechCapability {
    pub fn is_available(&self) -> bool {
        matches!(self, SpeechCapability::Available(_))
    }
}

// ─── Audio Playback Port ─────────────────────────────────────

#[async_trait(?Send)]
pub trait AudioPlaybackPort {
    /// Play an encoded clip and resolve when playback ends.
    /// The adapter creates the playable object before playback and
    /// releases it when playback ends or fails.
    async fn play(&self, audio: &[u8], mime: &str) -> Result<()>;

    /// Stop the clip that is currently playing, if any
    fn stop(&self);
}

// ─── Config Store Port ───────────────────────────────────────

pub trait ConfigStorePort {
    fn load(&self) -> Result<Option<ClientConfig>>;

    fn save(&self, config: &ClientConfig) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}
