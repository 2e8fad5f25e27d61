//! Voice input: scoped speech recognition sessions.

use lingua_types::{LinguaError, Result, event::ChatEvent};
use crate::event_bus::EventBus;
use crate::ports::SpeechCapability;

const CAPABILITY: &str = "Speech recognition";

pub struct VoiceInput {
    capability: SpeechCapability,
    event_bus: EventBus,
}

impl VoiceInput {
    pub fn new(capability: SpeechCapability, event_bus: EventBus) -> Self {
        Self { capability, event_bus }
    }

    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    pub fn is_listening(&self) -> bool {
        match &self.capability {
            SpeechCapability::Available(recognizer) => recognizer.is_listening(),
            SpeechCapability::Unavailable => false,
        }
    }

    /// Capture one utterance in `locale`. Resolves with at most one
    /// transcript; `Ok(None)` when capture ended without speech.
    pub async fn listen(&self, locale: &str) -> Result<Option<String>> {
        let recognizer = match &self.capability {
            SpeechCapability::Available(recognizer) => recognizer.clone(),
            SpeechCapability::Unavailable => {
                let e = LinguaError::CapabilityMissing(CAPABILITY.to_string());
                self.event_bus.alert(&e);
                return Err(e);
            }
        };

        if recognizer.is_listening() {
            recognizer.abort();
        }

        self.event_bus.emit(ChatEvent::ListeningStarted);
        let result = recognizer.recognize(locale).await;
        self.event_bus.emit(ChatEvent::ListeningEnded);

        match result {
            Ok(Some(text)) if text.trim().is_empty() => Ok(None),
            Ok(transcript) => Ok(transcript.map(|t| t.trim().to_string())),
            Err(e) => {
                self.event_bus.report("Speech recognition error", &e);
                Err(e)
            }
        }
    }

    /// Stop listening; a pending `listen` resolves with what was heard.
    pub fn stop(&self) {
        if let SpeechCapability::Available(recognizer) = &self.capability {
            recognizer.stop();
        }
    }

    /// Abort any active session without delivering a result.
    pub fn shutdown(&self) {
        if let SpeechCapability::Available(recognizer) = &self.capability {
            if recognizer.is_listening() {
                recognizer.abort();
            }
        }
    }
}

impl Drop for VoiceInput {
    fn drop(&mut self) {
        self.shutdown();
    }
}
