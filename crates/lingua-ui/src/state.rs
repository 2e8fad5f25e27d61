//! UI-level state that drives rendering.
//! This is a read-only projection of the client core, updated each frame
//! by draining the EventBus, plus the drafts the user is typing.

use lingua_types::event::{Activity, ChatEvent};
use lingua_types::language::Language;
use lingua_types::message::HistoryEntry;
use lingua_types::session::ChatSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Chat,
    Translator,
}

/// A message being edited in place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub index: usize,
    pub text: String,
}

/// Translator tab state
#[derive(Debug, Clone)]
pub struct TranslatorState {
    pub source: Language,
    pub target: Language,
    pub input: String,
    pub output: String,
    /// Language names reported by the backend
    pub languages: Vec<String>,
}

impl Default for TranslatorState {
    fn default() -> Self {
        Self {
            source: Language::English,
            target: Language::Hindi,
            input: String::new(),
            output: String::new(),
            languages: Vec::new(),
        }
    }
}

impl TranslatorState {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        std::mem::swap(&mut self.input, &mut self.output);
    }
}

/// State visible to UI panels
pub struct UiState {
    pub view: View,
    pub sessions: Vec<ChatSession>,
    pub active_session: Option<String>,
    pub history: Vec<HistoryEntry>,
    /// Session whose delete button is waiting for confirmation
    pub armed_delete: Option<String>,
    /// Network round-trips in flight, oldest first
    pub pending: Vec<Activity>,
    pub input_text: String,
    pub editing: Option<EditDraft>,
    pub playing: bool,
    pub listening: bool,
    pub translator: TranslatorState,
    /// Whether settings panel is open
    pub show_settings: bool,
    /// Modal message the user must dismiss
    pub alert: Option<String>,
    pub last_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            view: View::Chat,
            sessions: Vec::new(),
            active_session: None,
            history: Vec::new(),
            armed_delete: None,
            pending: Vec::new(),
            input_text: String::new(),
            editing: None,
            playing: false,
            listening: false,
            translator: TranslatorState::default(),
            show_settings: false,
            alert: None,
            last_error: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::ActivityStart { activity } => {
                    self.pending.push(activity);
                    if matches!(activity, Activity::Send | Activity::Translate) {
                        self.last_error = None;
                    }
                }
                ChatEvent::ActivityEnd { activity } => {
                    if let Some(pos) = self.pending.iter().position(|a| *a == activity) {
                        self.pending.remove(pos);
                    }
                }
                ChatEvent::SessionsLoaded { sessions } => {
                    self.sessions = sessions;
                    if let Some(armed) = &self.armed_delete {
                        if !self.sessions.iter().any(|s| &s.id == armed) {
                            self.armed_delete = None;
                        }
                    }
                }
                ChatEvent::HistoryChanged { session_id, entries } => {
                    if session_id != self.active_session {
                        self.editing = None;
                    } else if let Some(draft) = &self.editing {
                        if draft.index >= entries.len() {
                            self.editing = None;
                        }
                    }
                    self.active_session = session_id;
                    self.history = entries;
                }
                ChatEvent::DeleteArmed { session_id } => {
                    self.armed_delete = session_id;
                }
                ChatEvent::SessionDeleted { session_id } => {
                    self.sessions.retain(|s| s.id != session_id);
                    if self.armed_delete.as_deref() == Some(session_id.as_str()) {
                        self.armed_delete = None;
                    }
                }
                ChatEvent::PlaybackStarted => self.playing = true,
                ChatEvent::PlaybackEnded => self.playing = false,
                ChatEvent::ListeningStarted => self.listening = true,
                ChatEvent::ListeningEnded => self.listening = false,
                ChatEvent::TranslationReady { text } => {
                    self.translator.output = text;
                }
                ChatEvent::LanguagesLoaded { languages } => {
                    self.translator.languages = languages;
                }
                ChatEvent::Alert { message } => {
                    self.alert = Some(message);
                }
                ChatEvent::Error { message } => {
                    self.last_error = Some(message);
                }
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_pending(&self, activity: Activity) -> bool {
        self.pending.contains(&activity)
    }

    /// Status line text
    pub fn status_text(&self) -> &str {
        match self.pending.last() {
            Some(activity) => activity.label(),
            None if self.listening => "Listening...",
            None if self.playing => "Playing...",
            None => "Ready",
        }
    }

    pub fn begin_edit(&mut self, index: usize) {
        if let Some(entry) = self.history.get(index) {
            if !entry.is_provisional() {
                self.editing = Some(EditDraft {
                    index,
                    text: entry.message.content.clone(),
                });
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Take the draft for submission
    pub fn take_edit(&mut self) -> Option<EditDraft> {
        self.editing.take()
    }

    /// Forget work owned by services that were torn down. Their in-flight
    /// replies no longer reach this state, so pending activities and
    /// provisional entries would otherwise never settle.
    pub fn clear_activity(&mut self) {
        self.pending.clear();
        self.playing = false;
        self.listening = false;
        self.history.retain(|e| !e.is_provisional());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Take the chat input for sending; `None` if there is nothing to send
    pub fn take_input(&mut self) -> Option<String> {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.input_text.clear();
        Some(text)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
