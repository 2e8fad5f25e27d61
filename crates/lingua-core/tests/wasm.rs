//! WASM-target tests for lingua-core.
//!
//! Runs the renderer, EventBus and ConversationManager against an
//! in-memory backend under wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use lingua_core::conversation::{ConversationManager, EditOutcome};
use lingua_core::event_bus::EventBus;
use lingua_core::markup::render_to_markup;
use lingua_core::playback::Speaker;
use lingua_core::ports::*;
use lingua_core::voice::VoiceInput;
use lingua_types::api::*;
use lingua_types::event::ChatEvent;
use lingua_types::message::*;
use lingua_types::session::ChatSession;
use lingua_types::{LinguaError, Result};

use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

/// Backend with a single session that echoes queries
#[derive(Default)]
struct EchoBackend {
    history: RefCell<Vec<Message>>,
    calls: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl ChatPort for EchoBackend {
    async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        Ok(vec![ChatSession::new("s1", "2024-05-01T10:00:00", self.history.borrow().len())])
    }

    async fn load_history(&self, session_id: &str) -> Result<TextQueryResponse> {
        Ok(TextQueryResponse {
            chat_history: Some(self.history.borrow().clone()),
            session_id: Some(session_id.to_string()),
            ..Default::default()
        })
    }

    async fn text_query(&self, req: TextQueryRequest) -> Result<TextQueryResponse> {
        self.calls.borrow_mut().push(format!("query:{}", req.query));
        let mut history = self.history.borrow_mut();
        history.push(Message::user(req.query.clone()));
        history.push(Message::assistant(req.query.to_uppercase()));
        Ok(TextQueryResponse {
            chat_history: Some(history.clone()),
            session_id: Some("s1".to_string()),
            ..Default::default()
        })
    }

    async fn edit_message(&self, req: EditMessageRequest) -> Result<EditMessageResponse> {
        self.calls.borrow_mut().push(format!("edit:{}", req.message_index));
        let mut history = self.history.borrow_mut();
        history[req.message_index].content = req.new_content;
        Ok(EditMessageResponse {
            status: "success".to_string(),
            chat_history: history.clone(),
        })
    }

    async fn delete_session(&self, _session_id: &str) -> Result<()> {
        self.calls.borrow_mut().push("delete".to_string());
        Ok(())
    }
}

struct SilentAudio;

#[async_trait(?Send)]
impl AudioPlaybackPort for SilentAudio {
    async fn play(&self, _audio: &[u8], _mime: &str) -> Result<()> {
        Ok(())
    }

    fn stop(&self) {}
}

fn manager(backend: Rc<EchoBackend>) -> (ConversationManager, EventBus) {
    let bus = EventBus::new();
    let speaker = Speaker::new(Rc::new(SilentAudio), "audio/mpeg", bus.clone());
    (ConversationManager::new(backend, speaker, bus.clone()), bus)
}

// ─── Renderer ────────────────────────────────────────────

#[wasm_bindgen_test]
fn render_list_and_code() {
    let html = render_to_markup("Steps:\n1. open\n2. close\n```\n  x\n```");
    assert_eq!(
        html,
        "<p>Steps:</p><ol><li>open</li><li>close</li></ol>\
         <pre><button class=\"copy-btn\">Copy</button><code>x</code></pre>"
    );
}

#[wasm_bindgen_test]
fn render_escapes() {
    assert_eq!(render_to_markup("a < b"), "<p>a &lt; b</p>");
}

// ─── EventBus ────────────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.emit(ChatEvent::PlaybackStarted);
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 1);
    assert!(!bus.has_pending());
}

// ─── ConversationManager ─────────────────────────────────

#[wasm_bindgen_test]
async fn send_then_edit_regenerates() {
    let backend = Rc::new(EchoBackend::default());
    let (manager, _) = manager(backend.clone());

    let outcome = manager.send_message("hello").await.unwrap();
    assert_eq!(outcome.session_id, "s1");
    assert_eq!(manager.history().len(), 2);

    let edited = manager.edit_message(0, "bye").await.unwrap();
    assert_eq!(edited, EditOutcome::Edited { regenerated: true });
    assert_eq!(
        *backend.calls.borrow(),
        vec!["query:hello", "edit:0", "query:bye"]
    );
    assert_eq!(manager.history().last().unwrap().message.content, "BYE");
}

#[wasm_bindgen_test]
async fn empty_send_is_rejected() {
    let backend = Rc::new(EchoBackend::default());
    let (manager, _) = manager(backend.clone());

    assert_eq!(manager.send_message(" ").await, Err(LinguaError::EmptyMessage));
    assert!(backend.calls.borrow().is_empty());
}

#[wasm_bindgen_test]
async fn unarmed_delete_is_refused() {
    let backend = Rc::new(EchoBackend::default());
    let (manager, _) = manager(backend.clone());

    assert!(manager.delete_session("s1").await.is_err());
    manager.arm_delete("s1");
    assert!(manager.delete_session("s1").await.is_ok());
    assert_eq!(*backend.calls.borrow(), vec!["delete"]);
}

// ─── VoiceInput ──────────────────────────────────────────

#[wasm_bindgen_test]
async fn voice_unavailable_alerts() {
    let bus = EventBus::new();
    let voice = VoiceInput::new(SpeechCapability::Unavailable, bus.clone());

    let result = voice.listen("en-US").await;
    assert!(matches!(result, Err(LinguaError::CapabilityMissing(_))));
    assert!(bus.drain().iter().any(|e| matches!(e, ChatEvent::Alert { .. })));
}
