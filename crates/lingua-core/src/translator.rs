//! Translator workflow: translate between two languages and read either
//! side aloud.

use std::rc::Rc;
use lingua_types::{
    LinguaError, Result,
    api::{TextToSpeechRequest, TranslateRequest},
    event::{Activity, ChatEvent},
    language::Language,
};
use crate::event_bus::EventBus;
use crate::playback::Speaker;
use crate::ports::LanguagePort;

pub struct Translator {
    api: Rc<dyn LanguagePort>,
    speaker: Speaker,
    event_bus: EventBus,
}

impl Translator {
    pub fn new(api: Rc<dyn LanguagePort>, speaker: Speaker, event_bus: EventBus) -> Self {
        Self { api, speaker, event_bus }
    }

    /// Translate `text`. Blank input is rejected without a request.
    pub async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LinguaError::EmptyMessage);
        }

        let req = TranslateRequest {
            text: text.to_string(),
            source_language: source.label().to_string(),
            target_language: target.label().to_string(),
        };

        self.event_bus.emit(ChatEvent::ActivityStart { activity: Activity::Translate });
        let result = self.api.translate(req).await;
        self.event_bus.emit(ChatEvent::ActivityEnd { activity: Activity::Translate });

        match result {
            Ok(translated) => {
                log::debug!("Translated {} -> {} ({} chars)", source, target, translated.len());
                self.event_bus.emit(ChatEvent::TranslationReady {
                    text: translated.clone(),
                });
                Ok(translated)
            }
            Err(e) => {
                self.event_bus.report("Translation failed", &e);
                Err(e)
            }
        }
    }

    /// Synthesize `text` in `language` and play it to the end.
    pub async fn speak(&self, text: &str, language: Language) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LinguaError::EmptyMessage);
        }

        let req = TextToSpeechRequest {
            text: text.to_string(),
            language: language.code().to_string(),
        };

        self.event_bus.emit(ChatEvent::ActivityStart { activity: Activity::TextToSpeech });
        let result = self.api.text_to_speech(req).await;
        self.event_bus.emit(ChatEvent::ActivityEnd { activity: Activity::TextToSpeech });

        let clip = match result {
            Ok(clip) => clip,
            Err(e) => {
                self.event_bus.report("Text to speech failed", &e);
                return Err(e);
            }
        };

        self.speaker.play(&clip).await
    }

    /// Languages offered by the backend. Falls back to the built-in list
    /// when the backend can't be reached.
    pub async fn languages(&self) -> Vec<String> {
        let languages = match self.api.languages().await {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => builtin_languages(),
            Err(e) => {
                log::warn!("Could not load languages, using built-in list: {}", e);
                builtin_languages()
            }
        };
        self.event_bus.emit(ChatEvent::LanguagesLoaded {
            languages: languages.clone(),
        });
        languages
    }

    pub fn stop(&self) {
        self.speaker.stop();
    }
}

fn builtin_languages() -> Vec<String> {
    Language::all().iter().map(|l| l.label().to_string()).collect()
}
