//! Conversation manager: session list and message exchange.
//!
//! The backend owns sessions and histories. This side keeps a cache of the
//! session list and of the active session's history, applies optimistic
//! entries while a send is in flight, and reconciles with whatever the
//! backend returns.
//!
//! Every action that replaces the history takes a ticket from a monotonic
//! counter; a response is applied only while its ticket is the latest one,
//! so a slow response can never overwrite the result of a newer action.
//!
//! Methods take `&self` and no `RefCell` borrow is held across an await, so
//! overlapping actions spawned from the UI are safe.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use lingua_types::{
    LinguaError, Result,
    api::{is_history_sentinel, EditMessageRequest, TextQueryRequest, TextQueryResponse},
    event::{Activity, ChatEvent},
    message::{HistoryEntry, Message, Role},
    session::ChatSession,
};
use crate::event_bus::EventBus;
use crate::playback::{decode_audio, Speaker};
use crate::ports::ChatPort;

/// Result of a successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub session_id: String,
    pub history: Vec<Message>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Empty or identical content, nothing was sent
    Unchanged,
    Edited { regenerated: bool },
}

#[derive(Debug, Default)]
struct ConversationState {
    sessions: Vec<ChatSession>,
    active: Option<String>,
    history: Vec<HistoryEntry>,
    armed_delete: Option<String>,
    history_ticket: u64,
    sessions_ticket: u64,
}

impl ConversationState {
    fn next_history_ticket(&mut self) -> u64 {
        self.history_ticket += 1;
        self.history_ticket
    }

    fn next_sessions_ticket(&mut self) -> u64 {
        self.sessions_ticket += 1;
        self.sessions_ticket
    }

    fn rollback(&mut self, ticket: u64) {
        self.history.retain(|e| e.ticket != Some(ticket));
    }
}

pub struct ConversationManager {
    chat: Rc<dyn ChatPort>,
    speaker: Speaker,
    event_bus: EventBus,
    state: RefCell<ConversationState>,
}

impl ConversationManager {
    pub fn new(chat: Rc<dyn ChatPort>, speaker: Speaker, event_bus: EventBus) -> Self {
        Self {
            chat,
            speaker,
            event_bus,
            state: RefCell::new(ConversationState::default()),
        }
    }

    pub fn sessions(&self) -> Vec<ChatSession> {
        self.state.borrow().sessions.clone()
    }

    pub fn active_session(&self) -> Option<String> {
        self.state.borrow().active.clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.state.borrow().history.clone()
    }

    pub fn armed_delete(&self) -> Option<String> {
        self.state.borrow().armed_delete.clone()
    }

    // ─── Session list ────────────────────────────────────────

    /// Reload the session list. On failure the previous list is kept.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        let ticket = self.state.borrow_mut().next_sessions_ticket();

        match self.track(Activity::LoadSessions, self.chat.list_sessions()).await {
            Ok(sessions) => {
                {
                    let mut state = self.state.borrow_mut();
                    if state.sessions_ticket != ticket {
                        log::debug!("Dropping stale session list (ticket {})", ticket);
                        return Err(LinguaError::Superseded);
                    }
                    state.sessions = sessions.clone();
                }
                self.event_bus.emit(ChatEvent::SessionsLoaded {
                    sessions: sessions.clone(),
                });
                Ok(sessions)
            }
            Err(e) => {
                self.report("Error loading chat sessions", &e);
                Err(e)
            }
        }
    }

    /// Make `session_id` active and replace the local history with the
    /// backend's copy. A failed fetch leaves the history empty.
    pub async fn select_session(&self, session_id: &str) -> Result<()> {
        let ticket = {
            let mut state = self.state.borrow_mut();
            state.active = Some(session_id.to_string());
            state.history.clear();
            state.next_history_ticket()
        };
        self.publish_history();

        let result = self
            .track(Activity::LoadHistory, self.chat.load_history(session_id))
            .await
            .and_then(|resp| {
                resp.chat_history
                    .ok_or_else(|| LinguaError::MalformedResponse("chat_history".to_string()))
            });

        match result {
            Ok(history) => {
                if self.apply_history(ticket, Some(session_id.to_string()), history) {
                    Ok(())
                } else {
                    Err(LinguaError::Superseded)
                }
            }
            Err(_) if !self.is_current(ticket) => Err(LinguaError::Superseded),
            Err(e) => {
                self.report(&format!("Error loading chat {}", session_id), &e);
                Err(e)
            }
        }
    }

    /// Forget the active session locally; the backend creates a new one
    /// lazily on the first message.
    pub async fn start_new_session(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.next_history_ticket();
            state.active = None;
            state.history.clear();
        }
        self.publish_history();
        let _ = self.list_sessions().await;
    }

    // ─── Delete gate ─────────────────────────────────────────

    pub fn arm_delete(&self, session_id: &str) {
        self.state.borrow_mut().armed_delete = Some(session_id.to_string());
        self.event_bus.emit(ChatEvent::DeleteArmed {
            session_id: Some(session_id.to_string()),
        });
    }

    pub fn cancel_delete(&self) {
        self.state.borrow_mut().armed_delete = None;
        self.event_bus.emit(ChatEvent::DeleteArmed { session_id: None });
    }

    /// Delete a session. Only fires when `session_id` was armed first.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        if self.state.borrow().armed_delete.as_deref() != Some(session_id) {
            return Err(LinguaError::DeleteNotConfirmed(session_id.to_string()));
        }

        if let Err(e) = self
            .track(Activity::Delete, self.chat.delete_session(session_id))
            .await
        {
            self.report("Error deleting chat", &e);
            return Err(e);
        }

        let (sessions, was_active) = {
            let mut state = self.state.borrow_mut();
            state.sessions.retain(|s| s.id != session_id);
            if state.armed_delete.as_deref() == Some(session_id) {
                state.armed_delete = None;
            }
            let was_active = state.active.as_deref() == Some(session_id);
            if was_active {
                state.next_history_ticket();
                state.active = None;
                state.history.clear();
            }
            (state.sessions.clone(), was_active)
        };

        log::info!("Deleted chat session {}", session_id);
        self.event_bus.emit(ChatEvent::SessionDeleted {
            session_id: session_id.to_string(),
        });
        self.event_bus.emit(ChatEvent::SessionsLoaded { sessions });
        self.event_bus.emit(ChatEvent::DeleteArmed {
            session_id: self.armed_delete(),
        });
        if was_active {
            self.publish_history();
        }
        Ok(())
    }

    // ─── Message exchange ────────────────────────────────────

    /// Send a user message. The message shows up in the history right away
    /// and is replaced by the backend's history once the reply arrives, or
    /// removed again if the request fails.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome> {
        let query = text.trim();
        if query.is_empty() {
            log::debug!("Ignoring empty message");
            return Err(LinguaError::EmptyMessage);
        }
        if is_history_sentinel(query) {
            let e = LinguaError::ReservedQuery(query.to_string());
            self.report("Message not sent", &e);
            return Err(e);
        }

        let (ticket, session_id) = {
            let mut state = self.state.borrow_mut();
            let ticket = state.next_history_ticket();
            state
                .history
                .push(HistoryEntry::provisional(Message::user(query), ticket));
            (ticket, state.active.clone())
        };
        self.publish_history();

        let result = self
            .track(
                Activity::Send,
                self.chat.text_query(TextQueryRequest::text(query, session_id.clone())),
            )
            .await
            .and_then(|resp| into_outcome(resp, session_id));

        match result {
            Ok(outcome) => {
                let applied = self.apply_history(
                    ticket,
                    Some(outcome.session_id.clone()),
                    outcome.history.clone(),
                );
                if !applied {
                    self.state.borrow_mut().rollback(ticket);
                    self.publish_history();
                }
                let _ = self.list_sessions().await;
                if applied {
                    Ok(outcome)
                } else {
                    Err(LinguaError::Superseded)
                }
            }
            Err(e) => {
                self.state.borrow_mut().rollback(ticket);
                self.publish_history();
                self.report("Error sending message", &e);
                Err(e)
            }
        }
    }

    /// Edit a message in the active session. Editing a user message
    /// regenerates the reply: once the edit is acknowledged, the edited
    /// text is sent again as a query.
    pub async fn edit_message(&self, index: usize, new_content: &str) -> Result<EditOutcome> {
        if new_content.trim().is_empty() {
            return Ok(EditOutcome::Unchanged);
        }

        let (ticket, session_id, role) = {
            let mut state = self.state.borrow_mut();
            let entry = match state.history.get(index) {
                Some(entry) if !entry.is_provisional() => entry,
                _ => return Err(LinguaError::InvalidIndex(index)),
            };
            if entry.message.content == new_content {
                return Ok(EditOutcome::Unchanged);
            }
            let role = entry.message.role;
            let session_id = state.active.clone().ok_or(LinguaError::NoActiveSession)?;
            (state.next_history_ticket(), session_id, role)
        };

        let req = EditMessageRequest {
            session_id: session_id.clone(),
            message_index: index,
            new_content: new_content.to_string(),
        };
        let response = match self.track(Activity::Edit, self.chat.edit_message(req)).await {
            Ok(resp) if resp.is_success() => resp,
            Ok(resp) => {
                let e = LinguaError::Rejected(format!("Edit failed with status {}", resp.status));
                self.report("Error editing message", &e);
                return Err(e);
            }
            Err(e) => {
                self.report("Error editing message", &e);
                return Err(e);
            }
        };

        let mut applied = self.apply_history(ticket, Some(session_id.clone()), response.chat_history);
        let mut regenerated = false;

        if role == Role::User {
            let regen = self
                .track(
                    Activity::Send,
                    self.chat
                        .text_query(TextQueryRequest::text(new_content, Some(session_id.clone()))),
                )
                .await
                .and_then(|resp| into_outcome(resp, Some(session_id.clone())));

            match regen {
                Ok(outcome) => {
                    applied = self.apply_history(ticket, Some(outcome.session_id), outcome.history);
                    regenerated = true;
                }
                Err(e) => {
                    self.report("Error regenerating response", &e);
                    let _ = self.list_sessions().await;
                    return Err(e);
                }
            }
        }

        let _ = self.list_sessions().await;
        if applied {
            Ok(EditOutcome::Edited { regenerated })
        } else {
            Err(LinguaError::Superseded)
        }
    }

    // ─── Speech ──────────────────────────────────────────────

    /// Ask the backend to voice `content` and return the decoded audio.
    pub async fn request_speech(&self, content: &str, session_id: Option<String>) -> Result<Vec<u8>> {
        if content.trim().is_empty() {
            return Err(LinguaError::EmptyMessage);
        }
        if is_history_sentinel(content) {
            return Err(LinguaError::ReservedQuery(content.trim().to_string()));
        }

        let response = self
            .track(
                Activity::Speech,
                self.chat.text_query(TextQueryRequest::voice(content, session_id)),
            )
            .await?;

        let encoded = response
            .audio_response
            .filter(|a| !a.is_empty())
            .ok_or_else(|| LinguaError::MalformedResponse("audio_response".to_string()))?;
        decode_audio(&encoded)
    }

    /// Voice the message at `index` and play it to the end.
    pub async fn speak_message(&self, index: usize) -> Result<()> {
        let (content, session_id) = {
            let state = self.state.borrow();
            let entry = state
                .history
                .get(index)
                .ok_or(LinguaError::InvalidIndex(index))?;
            (entry.message.content.clone(), state.active.clone())
        };

        let clip = match self.request_speech(&content, session_id).await {
            Ok(clip) => clip,
            Err(e) => {
                self.report("Error requesting speech", &e);
                return Err(e);
            }
        };

        if let Err(e) = self.speaker.play(&clip).await {
            self.report("Error playing audio", &e);
            return Err(e);
        }
        Ok(())
    }

    pub fn stop_playback(&self) {
        self.speaker.stop();
    }

    // ─── Internals ───────────────────────────────────────────

    async fn track<T>(&self, activity: Activity, fut: impl Future<Output = T>) -> T {
        self.event_bus.emit(ChatEvent::ActivityStart { activity });
        let out = fut.await;
        self.event_bus.emit(ChatEvent::ActivityEnd { activity });
        out
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.state.borrow().history_ticket == ticket
    }

    /// Replace the history with the backend's copy if `ticket` is still current.
    fn apply_history(&self, ticket: u64, session_id: Option<String>, history: Vec<Message>) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.history_ticket != ticket {
                log::debug!("Dropping stale history (ticket {}, latest {})", ticket, state.history_ticket);
                return false;
            }
            if session_id.is_some() {
                state.active = session_id;
            }
            state.history = history.into_iter().map(HistoryEntry::confirmed).collect();
        }
        self.publish_history();
        true
    }

    fn publish_history(&self) {
        let (session_id, entries) = {
            let state = self.state.borrow();
            (state.active.clone(), state.history.clone())
        };
        self.event_bus
            .emit(ChatEvent::HistoryChanged { session_id, entries });
    }

    fn report(&self, context: &str, e: &LinguaError) {
        self.event_bus.report(context, e);
    }
}

/// Turn a text-query reply into an exchange result. A reply without history
/// but with text is the backend declining the query.
fn into_outcome(resp: TextQueryResponse, fallback_session: Option<String>) -> Result<SendOutcome> {
    let history = match resp.chat_history {
        Some(history) => history,
        None => {
            return Err(match resp.text_response {
                Some(text) if !text.trim().is_empty() => LinguaError::Rejected(text),
                _ => LinguaError::MalformedResponse("chat_history".to_string()),
            })
        }
    };
    let session_id = resp
        .session_id
        .or(fallback_session)
        .ok_or_else(|| LinguaError::MalformedResponse("session_id".to_string()))?;
    Ok(SendOutcome { session_id, history })
}
