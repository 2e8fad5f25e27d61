//! Settings panel: backend endpoint, request timeout, speech and
//! translator defaults, with an explicit Save button.

use egui::{self, RichText, Vec2};
use lingua_types::config::ClientConfig;
use crate::panels::translator::language_picker;
use crate::theme::*;

/// Chat microphone locales offered in the picker
pub const CHAT_LOCALES: [&str; 6] = ["en-US", "en-IN", "hi-IN", "te-IN", "kn-IN", "ta-IN"];

/// What the caller should do after rendering the settings panel
pub enum SettingsAction {
    /// Nothing changed
    None,
    /// A field was changed
    Changed,
    /// The user clicked the explicit Save button
    SaveClicked,
    /// The user asked to go back to defaults
    ResetClicked,
}

/// Save feedback passed in from the app layer
#[derive(Clone)]
pub struct SaveFeedback {
    pub message: String,
    pub success: bool,
}

/// Render the settings panel. Returns an action for the caller to handle.
pub fn settings_panel(
    ui: &mut egui::Ui,
    config: &mut ClientConfig,
    store_name: &str,
    save_feedback: Option<&SaveFeedback>,
) -> SettingsAction {
    let mut changed = false;
    let mut save_clicked = false;
    let mut reset_clicked = false;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .corner_radius(PANEL_ROUNDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Settings").color(TEXT_PRIMARY));
            ui.separator();

            // ── Backend Section ──────────────────────────────
            ui.label(RichText::new("Backend").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("API Base URL").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::TextEdit::singleline(&mut config.api.base_url).hint_text("/api/v1"))
                .changed()
            {
                changed = true;
            }

            ui.add_space(4.0);

            ui.label(RichText::new("Request timeout (ms)").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::Slider::new(&mut config.api.request_timeout_ms, 0..=120_000).step_by(1_000.0))
                .changed()
            {
                changed = true;
            }
            if config.api.request_timeout_ms == 0 {
                ui.label(RichText::new("No timeout").color(WARNING).small().italics());
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Speech Section ───────────────────────────────
            ui.label(RichText::new("Speech").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Chat microphone language").color(TEXT_SECONDARY).small());
            egui::ComboBox::from_id_salt("chat_locale")
                .selected_text(config.speech.chat_locale.as_str())
                .show_ui(ui, |ui| {
                    for locale in CHAT_LOCALES {
                        if ui
                            .selectable_value(&mut config.speech.chat_locale, locale.to_string(), locale)
                            .changed()
                        {
                            changed = true;
                        }
                    }
                });

            ui.add_space(4.0);

            ui.label(RichText::new("Audio format").color(TEXT_SECONDARY).small());
            if ui
                .add(egui::TextEdit::singleline(&mut config.speech.audio_mime).hint_text("audio/mpeg"))
                .changed()
            {
                changed = true;
            }

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(4.0);

            // ── Translator Section ───────────────────────────
            ui.label(RichText::new("Translator defaults").color(ACCENT).strong());
            ui.add_space(2.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("From").color(TEXT_SECONDARY).small());
                changed |= language_picker(ui, "default_source", &mut config.translator.source);
                ui.label(RichText::new("To").color(TEXT_SECONDARY).small());
                changed |= language_picker(ui, "default_target", &mut config.translator.target);
            });

            // ── Save Button ──────────────────────────────────
            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn = ui.add(
                    egui::Button::new(RichText::new("Save Settings").color(TEXT_PRIMARY).strong())
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 28.0)),
                );
                if btn.clicked() {
                    save_clicked = true;
                }
                if ui.button("Reset").clicked() {
                    reset_clicked = true;
                }

                // Show save feedback
                if let Some(fb) = save_feedback {
                    let color = if fb.success { SUCCESS } else { ERROR };
                    ui.label(RichText::new(&fb.message).color(color).small());
                }
            });

            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Stored in {}", store_name))
                    .color(TEXT_SECONDARY)
                    .small()
                    .italics(),
            );
        });

    if save_clicked {
        SettingsAction::SaveClicked
    } else if reset_clicked {
        SettingsAction::ResetClicked
    } else if changed {
        SettingsAction::Changed
    } else {
        SettingsAction::None
    }
}

/// Problems that would make the config unusable; empty when valid
pub fn validate(config: &ClientConfig) -> Vec<String> {
    let mut problems = Vec::new();
    if config.api.base_url.trim().is_empty() {
        problems.push("API base URL is empty".to_string());
    }
    if !config.speech.audio_mime.starts_with("audio/") {
        problems.push(format!("\"{}\" is not an audio type", config.speech.audio_mime));
    }
    if config.translator.source == config.translator.target {
        problems.push("Translator languages are the same".to_string());
    }
    problems
}
