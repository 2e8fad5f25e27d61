//! Main egui application: composes all panels and dispatches user actions
//! to the client core.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use lingua_core::conversation::ConversationManager;
use lingua_core::event_bus::EventBus;
use lingua_core::playback::Speaker;
use lingua_core::ports::{AudioPlaybackPort, ConfigStorePort};
use lingua_core::translator::Translator;
use lingua_core::voice::VoiceInput;
use lingua_platform::config_store::{auto_detect_config_store, load_or_default};
use lingua_platform::{detect_speech_capability, HtmlAudioPlayer, HttpChatApi};
use lingua_types::config::ClientConfig;
use lingua_ui::panels::chat::{self, ChatAction};
use lingua_ui::panels::sessions::{self, SessionAction};
use lingua_ui::panels::settings::{self, SaveFeedback, SettingsAction};
use lingua_ui::panels::translator::{self, TranslatorAction};
use lingua_ui::state::{UiState, View};
use lingua_ui::theme;

/// Fonts for the scripts the translator supports; egui only bundles Latin
const SCRIPT_FONTS: [(&str, &str); 4] = [
    ("noto_sans_devanagari", "fonts/NotoSansDevanagari-Regular.ttf"),
    ("noto_sans_telugu", "fonts/NotoSansTelugu-Regular.ttf"),
    ("noto_sans_kannada", "fonts/NotoSansKannada-Regular.ttf"),
    ("noto_sans_tamil", "fonts/NotoSansTamil-Regular.ttf"),
];

/// Core services built from the current config
struct Services {
    conversation: Rc<ConversationManager>,
    translator: Rc<Translator>,
    voice: Rc<VoiceInput>,
}

impl Services {
    fn build(config: &ClientConfig, event_bus: &EventBus) -> Self {
        let api = Rc::new(HttpChatApi::new(config.api.clone()));
        let audio: Rc<dyn AudioPlaybackPort> = Rc::new(HtmlAudioPlayer::new());
        let speaker = Speaker::new(audio, config.speech.audio_mime.clone(), event_bus.clone());

        Self {
            conversation: Rc::new(ConversationManager::new(
                api.clone(),
                speaker.clone(),
                event_bus.clone(),
            )),
            translator: Rc::new(Translator::new(api, speaker, event_bus.clone())),
            voice: Rc::new(VoiceInput::new(detect_speech_capability(), event_bus.clone())),
        }
    }
}

/// The main application state
pub struct LinguaApp {
    ui_state: UiState,
    config: ClientConfig,
    config_store: Rc<dyn ConfigStorePort>,
    save_feedback: Option<SaveFeedback>,
    event_bus: EventBus,
    services: Services,
    /// Translator dictation lands here and is moved into the input box
    dictation: Rc<RefCell<Option<String>>>,
    first_frame: bool,
}

impl LinguaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config_store = auto_detect_config_store();
        let config = load_or_default(config_store.as_ref());
        let event_bus = EventBus::new();
        let services = Services::build(&config, &event_bus);

        let mut ui_state = UiState::new();
        ui_state.translator.source = config.translator.source;
        ui_state.translator.target = config.translator.target;

        log::info!(
            "Backend {} (timeout {}ms), config from {}",
            config.api.base_url,
            config.api.request_timeout_ms,
            config_store.backend_name()
        );

        Self {
            ui_state,
            config,
            config_store,
            save_feedback: None,
            event_bus,
            services,
            dictation: Rc::new(RefCell::new(None)),
            first_frame: true,
        }
    }

    /// Run a core action in the background and repaint when it settles
    fn spawn(ctx: &egui::Context, fut: impl Future<Output = ()> + 'static) {
        let ctx = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            fut.await;
            ctx.request_repaint();
        });
    }

    fn load_initial_data(&self, ctx: &egui::Context) {
        let conversation = self.services.conversation.clone();
        Self::spawn(ctx, async move {
            let _ = conversation.list_sessions().await;
        });

        let translator = self.services.translator.clone();
        Self::spawn(ctx, async move {
            translator.languages().await;
        });
    }

    /// Fetch script fonts from the server and install them into egui
    fn load_script_fonts(ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            let mut fonts = egui::FontDefinitions::default();
            let mut installed = 0;

            for (name, path) in SCRIPT_FONTS {
                let bytes = match fetch_bytes(path).await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        log::warn!("Failed to fetch font {}: {}", path, e);
                        continue;
                    }
                };
                fonts
                    .font_data
                    .insert(name.to_owned(), egui::FontData::from_owned(bytes).into());
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    fonts.families.entry(family).or_default().push(name.to_owned());
                }
                installed += 1;
            }

            if installed > 0 {
                ctx.set_fonts(fonts);
                ctx.request_repaint();
                log::info!("{} script fonts loaded", installed);
            }
        });
    }

    /// Swap in services for a new config, keeping the user on the same chat.
    /// The new services get their own bus, so late replies to the old ones
    /// are never shown.
    fn apply_config(&mut self, ctx: &egui::Context) {
        let active = self.services.conversation.active_session();
        self.services.voice.shutdown();
        self.services.conversation.stop_playback();

        self.ui_state.process_events(self.event_bus.drain());
        self.ui_state.clear_activity();
        self.event_bus = EventBus::new();
        self.services = Services::build(&self.config, &self.event_bus);

        let conversation = self.services.conversation.clone();
        Self::spawn(ctx, async move {
            let _ = conversation.list_sessions().await;
            if let Some(id) = active {
                let _ = conversation.select_session(&id).await;
            }
        });
    }

    fn save_config(&mut self) {
        let problems = settings::validate(&self.config);
        if !problems.is_empty() {
            self.save_feedback = Some(SaveFeedback {
                message: problems.join("; "),
                success: false,
            });
            return;
        }

        self.save_feedback = Some(match self.config_store.save(&self.config) {
            Ok(()) => {
                log::info!("Config saved to {}", self.config_store.backend_name());
                SaveFeedback {
                    message: "Saved".to_string(),
                    success: true,
                }
            }
            Err(e) => {
                log::error!("Failed to save config: {}", e);
                SaveFeedback {
                    message: format!("Save failed: {}", e),
                    success: false,
                }
            }
        });
    }
}

impl eframe::App for LinguaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            Self::load_script_fonts(ctx.clone());
            self.load_initial_data(ctx);
            self.first_frame = false;
        }

        // Drain events from the client core
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        if let Some(text) = self.dictation.borrow_mut().take() {
            self.ui_state.translator.input = text;
        }

        if self.ui_state.is_busy() || self.ui_state.listening {
            ctx.request_repaint();
        }

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Lingua")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.selectable_value(&mut self.ui_state.view, View::Chat, "Chat");
                ui.selectable_value(&mut self.ui_state.view, View::Translator, "Translator");
                ui.separator();
                ui.label(
                    RichText::new(&self.config.api.base_url)
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .selectable_label(self.ui_state.show_settings, "Settings")
                        .clicked()
                    {
                        self.ui_state.show_settings = !self.ui_state.show_settings;
                    }
                });
            });
        });

        // ── Settings side panel ──────────────────────────────
        if self.ui_state.show_settings {
            let store_name = self.config_store.backend_name().to_string();
            let mut action = SettingsAction::None;
            SidePanel::right("settings_panel")
                .min_width(280.0)
                .max_width(350.0)
                .show(ctx, |ui| {
                    action = settings::settings_panel(
                        ui,
                        &mut self.config,
                        &store_name,
                        self.save_feedback.as_ref(),
                    );
                });

            match action {
                SettingsAction::None => {}
                SettingsAction::Changed => self.save_feedback = None,
                SettingsAction::SaveClicked => {
                    self.save_config();
                    if self.save_feedback.as_ref().is_some_and(|fb| fb.success) {
                        self.apply_config(ctx);
                    }
                }
                SettingsAction::ResetClicked => {
                    self.config = ClientConfig::default();
                    self.save_feedback = None;
                }
            }
        }

        // ── Session sidebar ──────────────────────────────────
        if self.ui_state.view == View::Chat {
            let mut action = SessionAction::None;
            SidePanel::left("sessions_panel")
                .min_width(200.0)
                .max_width(280.0)
                .show(ctx, |ui| {
                    action = sessions::sessions_panel(ui, &self.ui_state);
                });
            self.dispatch_session_action(action, ctx);
        }

        // ── Main content ─────────────────────────────────────
        let voice_available = self.services.voice.is_available();
        let mut chat_action = None;
        let mut translator_action = None;
        CentralPanel::default().show(ctx, |ui| match self.ui_state.view {
            View::Chat => {
                chat_action = chat::chat_panel(ui, &mut self.ui_state, voice_available);
            }
            View::Translator => {
                translator_action = translator::translator_panel(ui, &mut self.ui_state, voice_available);
            }
        });

        if let Some(action) = chat_action {
            self.dispatch_chat_action(action, ctx);
        }
        if let Some(action) = translator_action {
            self.dispatch_translator_action(action, ctx);
        }

        // ── Alerts ───────────────────────────────────────────
        if let Some(message) = self.ui_state.alert.clone() {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.ui_state.dismiss_alert();
                    }
                });
        }
    }
}

impl LinguaApp {
    fn dispatch_session_action(&self, action: SessionAction, ctx: &egui::Context) {
        let conversation = self.services.conversation.clone();
        match action {
            SessionAction::None => {}
            SessionAction::NewChat => Self::spawn(ctx, async move {
                conversation.start_new_session().await;
            }),
            SessionAction::Select(id) => Self::spawn(ctx, async move {
                let _ = conversation.select_session(&id).await;
            }),
            SessionAction::ArmDelete(id) => conversation.arm_delete(&id),
            SessionAction::CancelDelete => conversation.cancel_delete(),
            SessionAction::ConfirmDelete(id) => Self::spawn(ctx, async move {
                let _ = conversation.delete_session(&id).await;
            }),
        }
    }

    fn dispatch_chat_action(&self, action: ChatAction, ctx: &egui::Context) {
        let conversation = self.services.conversation.clone();
        match action {
            ChatAction::Send(text) => Self::spawn(ctx, async move {
                let _ = conversation.send_message(&text).await;
            }),
            ChatAction::Edit { index, content } => Self::spawn(ctx, async move {
                let _ = conversation.edit_message(index, &content).await;
            }),
            ChatAction::Speak(index) => Self::spawn(ctx, async move {
                let _ = conversation.speak_message(index).await;
            }),
            ChatAction::StopAudio => conversation.stop_playback(),
            ChatAction::Listen => {
                let voice = self.services.voice.clone();
                let locale = self.config.speech.chat_locale.clone();
                Self::spawn(ctx, async move {
                    if let Ok(Some(text)) = voice.listen(&locale).await {
                        let _ = conversation.send_message(&text).await;
                    }
                });
            }
            ChatAction::StopListening => self.services.voice.stop(),
        }
    }

    fn dispatch_translator_action(&self, action: TranslatorAction, ctx: &egui::Context) {
        let translator = self.services.translator.clone();
        match action {
            TranslatorAction::Translate => {
                let state = &self.ui_state.translator;
                let (text, source, target) = (state.input.clone(), state.source, state.target);
                Self::spawn(ctx, async move {
                    let _ = translator.translate(&text, source, target).await;
                });
            }
            TranslatorAction::Speak { text, language } => Self::spawn(ctx, async move {
                let _ = translator.speak(&text, language).await;
            }),
            TranslatorAction::Listen(language) => {
                let voice = self.services.voice.clone();
                let dictation = self.dictation.clone();
                Self::spawn(ctx, async move {
                    if let Ok(Some(text)) = voice.listen(&language.recognition_locale()).await {
                        *dictation.borrow_mut() = Some(text);
                    }
                });
            }
            TranslatorAction::StopListening => self.services.voice.stop(),
        }
    }
}

async fn fetch_bytes(path: &str) -> Result<Vec<u8>, gloo_net::Error> {
    let response = gloo_net::http::Request::get(path).send().await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!("HTTP {}", response.status())));
    }
    response.binary().await
}
