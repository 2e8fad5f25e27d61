//! WASM-target tests for lingua-types.
//!
//! Runs under wasm32-unknown-unknown via `wasm-pack test --node`, where
//! chrono's clock comes from the JS `Date` object.

use wasm_bindgen_test::*;

use lingua_types::api::*;
use lingua_types::config::ClientConfig;
use lingua_types::language::Language;
use lingua_types::message::*;
use lingua_types::session::ChatSession;

#[wasm_bindgen_test]
fn message_user_has_clock_time() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.time.len(), 5);
    assert!(msg.time.contains(':'));
}

#[wasm_bindgen_test]
fn message_roundtrip_from_server() {
    let json = r#"[{"role":"user","content":"a","time":"1"},{"role":"assistant","content":"b","time":"2"}]"#;
    let history: Vec<Message> = serde_json::from_str(json).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, Role::Assistant);
}

#[wasm_bindgen_test]
fn session_label_parses_server_timestamp() {
    let s = ChatSession::new("id", "2025-05-05T05:05:05.5", 3);
    assert_eq!(s.created_label(), "2025-05-05 05:05");
}

#[wasm_bindgen_test]
fn sessions_response_sorted() {
    let json = r#"{"sessions":{"x":{"created":"2024-01-01T00:00:00","message_count":1},"y":{"created":"2024-02-01T00:00:00","message_count":1}}}"#;
    let resp: SessionsResponse = serde_json::from_str(json).unwrap();
    let ids: Vec<String> = resp.into_sessions().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["y", "x"]);
}

#[wasm_bindgen_test]
fn sentinel_detection() {
    assert!(is_history_sentinel("LOAD HISTORY"));
    assert!(!is_history_sentinel("load"));
}

#[wasm_bindgen_test]
fn language_locale() {
    assert_eq!(Language::Tamil.recognition_locale(), "ta-IN");
}

#[wasm_bindgen_test]
fn config_json_roundtrip() {
    let config = ClientConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let restored: ClientConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}
