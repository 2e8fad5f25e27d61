//! Chat panel: displays the active conversation and the input row.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use lingua_core::markup::{parse_blocks, Block, ListKind};
use lingua_types::event::Activity;
use lingua_types::message::{HistoryEntry, Role};
use crate::state::UiState;
use crate::theme::*;

pub enum ChatAction {
    Send(String),
    Edit { index: usize, content: String },
    Speak(usize),
    StopAudio,
    Listen,
    StopListening,
}

/// Render the chat panel. Returns an action when the user asks for one.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, voice_available: bool) -> Option<ChatAction> {
    let mut action = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if state.is_busy() { WARNING } else { SUCCESS };
                        ui.label(RichText::new(state.status_text()).color(status_color).small());
                        if state.playing && ui.small_button("⏹ Stop audio").clicked() {
                            action = Some(ChatAction::StopAudio);
                        }
                    });
                });

                if let Some(error) = &state.last_error {
                    ui.label(RichText::new(error).color(ERROR).small());
                }

                ui.separator();

                // Messages area
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.history.is_empty() && !state.is_pending(Activity::LoadHistory) {
                            ui.label(
                                RichText::new("Start a conversation by typing below.")
                                    .color(TEXT_SECONDARY)
                                    .italics(),
                            );
                        }

                        for index in 0..state.history.len() {
                            if let Some(a) = render_entry(ui, state, index) {
                                action = Some(a);
                            }
                            ui.add_space(4.0);
                        }

                        if state.is_pending(Activity::Send) {
                            ui.label(RichText::new("▌").color(ACCENT).strong());
                        }
                    });

                ui.add_space(8.0);

                // Input area
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 110.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add(input);

                    let mic_label = if state.listening { "⏺" } else { "🎤" };
                    let mic = ui
                        .add_enabled(voice_available, egui::Button::new(mic_label).min_size(Vec2::new(32.0, 0.0)))
                        .on_disabled_hover_text("Speech recognition is not supported in this browser");
                    if mic.clicked() {
                        action = Some(if state.listening {
                            ChatAction::StopListening
                        } else {
                            ChatAction::Listen
                        });
                    }

                    let send_enabled = !state.input_text.trim().is_empty() && !state.is_pending(Activity::Send);
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if (enter && send_enabled) || send_btn.clicked() {
                        if let Some(text) = state.take_input() {
                            action = Some(ChatAction::Send(text));
                        }
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_entry(ui: &mut egui::Ui, state: &mut UiState, index: usize) -> Option<ChatAction> {
    let mut action = None;
    let entry: &HistoryEntry = &state.history[index];
    let role = entry.message.role;
    let provisional = entry.is_provisional();
    let editing = state.editing.as_ref().map(|d| d.index) == Some(index);

    let (label_color, bg) = bubble_colors(role, provisional);
    let content = entry.message.content.clone();
    let time = entry.message.time.clone();

    egui::Frame::default()
        .fill(bg)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(BUBBLE_MARGIN)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(role.label()).color(label_color).strong().small());
                ui.label(RichText::new(&time).color(TEXT_SECONDARY).small());

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if provisional || editing {
                        return;
                    }
                    if ui.small_button("✏").on_hover_text("Edit").clicked() {
                        state.begin_edit(index);
                    }
                    if role == Role::Assistant {
                        let speak = ui.add_enabled(!state.playing, egui::Button::new("🔊").small());
                        if speak.on_hover_text("Read aloud").clicked() {
                            action = Some(ChatAction::Speak(index));
                        }
                    }
                });
            });

            if editing {
                action = render_editor(ui, state).or(action.take());
            } else {
                render_content(ui, &content);
            }
        });

    action
}

fn render_editor(ui: &mut egui::Ui, state: &mut UiState) -> Option<ChatAction> {
    let mut action = None;
    let mut cancel = false;

    if let Some(draft) = state.editing.as_mut() {
        ui.add(
            egui::TextEdit::multiline(&mut draft.text)
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                action = Some(());
            }
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });
    }

    if cancel {
        state.cancel_edit();
        return None;
    }
    action
        .and_then(|_| state.take_edit())
        .map(|draft| ChatAction::Edit {
            index: draft.index,
            content: draft.text,
        })
}

/// Draw message text from the renderer's block list.
pub fn render_content(ui: &mut egui::Ui, content: &str) {
    for block in parse_blocks(content) {
        match block {
            Block::Paragraph(text) => {
                ui.label(RichText::new(text).color(TEXT_PRIMARY));
            }
            Block::Spacer => ui.add_space(6.0),
            Block::List { kind, items } => {
                for (i, item) in items.iter().enumerate() {
                    let marker = match kind {
                        ListKind::Ordered => format!("{}.", i + 1),
                        ListKind::Unordered => "•".to_string(),
                    };
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new(marker).color(TEXT_SECONDARY));
                        ui.label(RichText::new(item).color(TEXT_PRIMARY));
                    });
                }
            }
            Block::Code(code) => {
                egui::Frame::default()
                    .fill(CODE_BG)
                    .corner_radius(PANEL_ROUNDING)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                            if ui.small_button("Copy").clicked() {
                                ui.ctx().copy_text(code.clone());
                            }
                            ui.with_layout(Layout::left_to_right(Align::Min), |ui| {
                                ui.label(RichText::new(&code).monospace().color(CODE_FG));
                            });
                        });
                    });
            }
        }
    }
}
