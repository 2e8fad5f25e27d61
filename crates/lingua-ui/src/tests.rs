#[cfg(test)]
mod tests {
    use crate::panels::settings::validate;
    use crate::state::*;
    use lingua_types::config::ClientConfig;
    use lingua_types::event::{Activity, ChatEvent};
    use lingua_types::language::Language;
    use lingua_types::message::*;
    use lingua_types::session::ChatSession;

    fn history(contents: &[&str]) -> Vec<HistoryEntry> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let msg = if i % 2 == 0 { Message::user(*c) } else { Message::assistant(*c) };
                HistoryEntry::confirmed(msg)
            })
            .collect()
    }

    // ─── UiState Tests ───────────────────────────────────────

    #[test]
    fn test_ui_state_initial() {
        let state = UiState::new();
        assert_eq!(state.view, View::Chat);
        assert!(state.sessions.is_empty());
        assert!(state.history.is_empty());
        assert!(state.active_session.is_none());
        assert!(state.input_text.is_empty());
        assert!(!state.show_settings);
        assert_eq!(state.status_text(), "Ready");
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ui_state_activity_tracking() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::ActivityStart { activity: Activity::LoadSessions },
            ChatEvent::ActivityStart { activity: Activity::Send },
        ]);
        assert!(state.is_busy());
        assert!(state.is_pending(Activity::Send));
        assert_eq!(state.status_text(), "Thinking...");

        state.process_events(vec![ChatEvent::ActivityEnd { activity: Activity::Send }]);
        assert!(!state.is_pending(Activity::Send));
        assert_eq!(state.status_text(), "Loading sessions...");

        state.process_events(vec![ChatEvent::ActivityEnd { activity: Activity::LoadSessions }]);
        assert!(!state.is_busy());
    }

    #[test]
    fn test_ui_state_overlapping_same_activity() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::ActivityStart { activity: Activity::Send },
            ChatEvent::ActivityStart { activity: Activity::Send },
            ChatEvent::ActivityEnd { activity: Activity::Send },
        ]);
        assert!(state.is_pending(Activity::Send));
    }

    #[test]
    fn test_ui_state_history_changed() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::HistoryChanged {
            session_id: Some("s1".to_string()),
            entries: history(&["hi", "hello"]),
        }]);
        assert_eq!(state.active_session.as_deref(), Some("s1"));
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn test_ui_state_session_switch_drops_edit() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::HistoryChanged {
            session_id: Some("s1".to_string()),
            entries: history(&["hi", "hello"]),
        }]);
        state.begin_edit(0);
        assert!(state.editing.is_some());

        state.process_events(vec![ChatEvent::HistoryChanged {
            session_id: Some("s2".to_string()),
            entries: history(&["other"]),
        }]);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_ui_state_begin_edit() {
        let mut state = UiState::new();
        state.history = history(&["hi", "hello"]);
        state.history.push(HistoryEntry::provisional(Message::user("pending"), 3));

        state.begin_edit(1);
        assert_eq!(
            state.editing,
            Some(EditDraft { index: 1, text: "hello".to_string() })
        );

        state.cancel_edit();
        state.begin_edit(2);
        assert!(state.editing.is_none(), "provisional entries are not editable");

        state.begin_edit(9);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_ui_state_take_edit() {
        let mut state = UiState::new();
        state.history = history(&["hi"]);
        state.begin_edit(0);
        let draft = state.take_edit().unwrap();
        assert_eq!(draft.index, 0);
        assert!(state.editing.is_none());
    }

    #[test]
    fn test_ui_state_take_input() {
        let mut state = UiState::new();
        state.input_text = "   ".to_string();
        assert!(state.take_input().is_none());

        state.input_text = "  hello ".to_string();
        assert_eq!(state.take_input().as_deref(), Some("hello"));
        assert!(state.input_text.is_empty());
    }

    #[test]
    fn test_ui_state_delete_gate() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::SessionsLoaded {
                sessions: vec![
                    ChatSession::new("a", "2024-01-01T00:00:00", 2),
                    ChatSession::new("b", "2024-01-02T00:00:00", 4),
                ],
            },
            ChatEvent::DeleteArmed { session_id: Some("a".to_string()) },
        ]);
        assert_eq!(state.armed_delete.as_deref(), Some("a"));

        state.process_events(vec![ChatEvent::SessionDeleted { session_id: "a".to_string() }]);
        assert!(state.armed_delete.is_none());
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.sessions[0].id, "b");
    }

    #[test]
    fn test_ui_state_reload_drops_stale_arm() {
        let mut state = UiState::new();
        state.armed_delete = Some("gone".to_string());
        state.process_events(vec![ChatEvent::SessionsLoaded {
            sessions: vec![ChatSession::new("b", "2024-01-02T00:00:00", 4)],
        }]);
        assert!(state.armed_delete.is_none());
    }

    #[test]
    fn test_ui_state_playback_and_listening() {
        let mut state = UiState::new();
        state.process_events(vec![ChatEvent::ListeningStarted]);
        assert!(state.listening);
        assert_eq!(state.status_text(), "Listening...");

        state.process_events(vec![ChatEvent::ListeningEnded, ChatEvent::PlaybackStarted]);
        assert!(!state.listening);
        assert!(state.playing);

        state.process_events(vec![ChatEvent::PlaybackEnded]);
        assert!(!state.playing);
    }

    #[test]
    fn test_ui_state_alert_and_error() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::Alert { message: "Speech recognition is not supported in this browser".to_string() },
            ChatEvent::Error { message: "Error sending message: HTTP 500: boom".to_string() },
        ]);
        assert!(state.alert.is_some());
        assert!(state.last_error.as_deref().unwrap().contains("HTTP 500"));

        state.dismiss_alert();
        assert!(state.alert.is_none());

        // a new send clears the previous error
        state.process_events(vec![ChatEvent::ActivityStart { activity: Activity::Send }]);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_ui_state_clear_activity() {
        let mut state = UiState::new();
        state.history = history(&["hi", "hello"]);
        state.history.push(HistoryEntry::provisional(Message::user("in flight"), 4));
        state.process_events(vec![
            ChatEvent::ActivityStart { activity: Activity::Send },
            ChatEvent::ListeningStarted,
            ChatEvent::PlaybackStarted,
        ]);

        state.clear_activity();

        assert!(!state.is_busy());
        assert!(!state.listening);
        assert!(!state.playing);
        assert_eq!(state.status_text(), "Ready");
        assert_eq!(state.history.len(), 2);
        assert!(state.history.iter().all(|e| !e.is_provisional()));
    }

    // ─── Translator State Tests ──────────────────────────────

    #[test]
    fn test_translator_events() {
        let mut state = UiState::new();
        state.process_events(vec![
            ChatEvent::TranslationReady { text: "नमस्ते".to_string() },
            ChatEvent::LanguagesLoaded { languages: vec!["English".to_string(), "Hindi".to_string()] },
        ]);
        assert_eq!(state.translator.output, "नमस्ते");
        assert_eq!(state.translator.languages.len(), 2);
    }

    #[test]
    fn test_translator_swap() {
        let mut t = TranslatorState::default();
        t.input = "hello".to_string();
        t.output = "नमस्ते".to_string();
        t.swap();
        assert_eq!(t.source, Language::Hindi);
        assert_eq!(t.target, Language::English);
        assert_eq!(t.input, "नमस्ते");
        assert_eq!(t.output, "hello");
    }

    // ─── Theme Tests ─────────────────────────────────────────

    #[test]
    fn test_bubble_colors_mark_pending_messages() {
        use crate::theme::*;

        assert_eq!(bubble_colors(Role::User, false), (ACCENT, USER_BUBBLE));
        assert_eq!(bubble_colors(Role::User, true), (TEXT_SECONDARY, PENDING_BUBBLE));
        assert_eq!(bubble_colors(Role::Assistant, false), (SUCCESS, ASSISTANT_BUBBLE));
        assert_ne!(bubble_colors(Role::User, true).1, bubble_colors(Role::User, false).1);
    }

    // ─── Settings Validation Tests ───────────────────────────

    #[test]
    fn test_validate_default_config() {
        assert!(validate(&ClientConfig::default()).is_empty());
    }

    #[test]
    fn test_validate_same_languages() {
        let mut config = ClientConfig::default();
        config.translator.target = config.translator.source;
        assert_eq!(validate(&config), vec!["Translator languages are the same"]);
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let mut config = ClientConfig::default();
        config.api.base_url = " ".to_string();
        config.speech.audio_mime = "text/plain".to_string();

        let problems = validate(&config);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("base URL"));
        assert!(problems[1].contains("text/plain"));
    }
}
