//! Browser adapters for Lingua.
//!
//! Implements the `lingua-core` port traits on top of `fetch()`, the Web
//! Speech API, `HTMLAudioElement` and `localStorage`.

pub mod http;
pub mod speech;
pub mod audio;
pub mod config_store;

pub use http::HttpChatApi;
pub use speech::{detect_speech_capability, BrowserSpeechRecognizer};
pub use audio::HtmlAudioPlayer;
