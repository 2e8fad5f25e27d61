use serde::{Deserialize, Serialize};
use crate::language::Language;

/// Top-level client configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Versioned base path or absolute URL of the backend
    pub base_url: String,
    /// Upper bound for a single request; 0 disables the bound
    pub request_timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    /// Join an endpoint path onto the base URL without doubling slashes
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Recognition locale for the chat microphone
    pub chat_locale: String,
    /// MIME type of audio returned by the backend
    pub audio_mime: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            chat_locale: "en-US".to_string(),
            audio_mime: "audio/mpeg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub source: Language,
    pub target: Language,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            source: Language::English,
            target: Language::Hindi,
        }
    }
}

const DEFAULT_BASE_URL: &str = "/api/v1";
const DEFAULT_TIMEOUT_MS: u32 = 30_000;
