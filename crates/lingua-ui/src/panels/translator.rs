//! Translator panel: two text areas with language pickers, speech in
//! and speech out.

use egui::{self, RichText, Vec2};
use lingua_types::event::Activity;
use lingua_types::language::Language;
use crate::state::UiState;
use crate::theme::*;

pub enum TranslatorAction {
    Translate,
    /// Read text aloud in a language
    Speak { text: String, language: Language },
    /// Dictate into the input box in the source language
    Listen(Language),
    StopListening,
}

pub fn translator_panel(ui: &mut egui::Ui, state: &mut UiState, voice_available: bool) -> Option<TranslatorAction> {
    let mut action = None;
    let busy = state.is_pending(Activity::Translate);
    let listening = state.listening;
    let playing = state.playing;
    let t = &mut state.translator;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Translator").color(TEXT_PRIMARY).strong());
            ui.separator();

            ui.horizontal(|ui| {
                language_picker(ui, "translator_source", &mut t.source);
                if ui.button("⇄").on_hover_text("Swap languages").clicked() {
                    t.swap();
                }
                language_picker(ui, "translator_target", &mut t.target);
            });

            ui.add_space(6.0);
            let half = (ui.available_width() - 12.0) / 2.0;

            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut t.input)
                            .hint_text("Enter text")
                            .desired_rows(8)
                            .desired_width(half),
                    );
                    ui.horizontal(|ui| {
                        let mic_label = if listening { "⏺ Stop" } else { "🎤" };
                        let mic = ui
                            .add_enabled(voice_available, egui::Button::new(mic_label))
                            .on_disabled_hover_text("Speech recognition is not supported in this browser");
                        if mic.clicked() {
                            action = Some(if listening {
                                TranslatorAction::StopListening
                            } else {
                                TranslatorAction::Listen(t.source)
                            });
                        }
                        let can_speak = !t.input.trim().is_empty() && !playing;
                        if ui.add_enabled(can_speak, egui::Button::new("🔊")).clicked() {
                            action = Some(TranslatorAction::Speak {
                                text: t.input.clone(),
                                language: t.source,
                            });
                        }
                    });
                });

                ui.vertical(|ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut t.output)
                            .hint_text("Translation")
                            .desired_rows(8)
                            .desired_width(half)
                            .interactive(false),
                    );
                    let can_speak = !t.output.trim().is_empty() && !playing;
                    if ui.add_enabled(can_speak, egui::Button::new("🔊")).clicked() {
                        action = Some(TranslatorAction::Speak {
                            text: t.output.clone(),
                            language: t.target,
                        });
                    }
                });
            });

            ui.add_space(8.0);
            let enabled = !busy && !t.input.trim().is_empty();
            let label = if busy { "Translating..." } else { "Translate" };
            let btn = ui.add_enabled(
                enabled,
                egui::Button::new(RichText::new(label).color(TEXT_PRIMARY).strong())
                    .fill(if enabled { ACCENT } else { BG_SURFACE })
                    .corner_radius(PANEL_ROUNDING)
                    .min_size(Vec2::new(120.0, 28.0)),
            );
            if btn.clicked() {
                action = Some(TranslatorAction::Translate);
            }

            if !t.languages.is_empty() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Supported: {}", t.languages.join(", ")))
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            }
        });

    action
}

pub fn language_picker(ui: &mut egui::Ui, id: &str, selected: &mut Language) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.label())
        .show_ui(ui, |ui| {
            for language in Language::all() {
                if ui
                    .selectable_value(selected, *language, language.label())
                    .changed()
                {
                    changed = true;
                }
            }
        });
    changed
}
