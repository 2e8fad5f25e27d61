//! Audio output shared by the chat and translator workflows.

use std::rc::Rc;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lingua_types::{Result, event::ChatEvent};
use crate::event_bus::EventBus;
use crate::ports::AudioPlaybackPort;

/// Decode a base64 audio payload as returned by the text-query endpoint.
pub fn decode_audio(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}

#[derive(Clone)]
pub struct Speaker {
    audio: Rc<dyn AudioPlaybackPort>,
    mime: String,
    event_bus: EventBus,
}

impl Speaker {
    pub fn new(audio: Rc<dyn AudioPlaybackPort>, mime: impl Into<String>, event_bus: EventBus) -> Self {
        Self {
            audio,
            mime: mime.into(),
            event_bus,
        }
    }

    /// Play a clip to the end, bracketing it with playback events.
    pub async fn play(&self, clip: &[u8]) -> Result<()> {
        self.event_bus.emit(ChatEvent::PlaybackStarted);
        let result = self.audio.play(clip, &self.mime).await;
        self.event_bus.emit(ChatEvent::PlaybackEnded);
        if let Err(ref e) = result {
            log::error!("Audio playback failed: {}", e);
        }
        result
    }

    pub fn stop(&self) {
        self.audio.stop();
    }
}
