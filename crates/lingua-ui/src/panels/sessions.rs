//! Session sidebar: session list, new chat and two-step delete.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use crate::state::UiState;
use crate::theme::*;

pub enum SessionAction {
    None,
    NewChat,
    Select(String),
    /// First click on a delete button
    ArmDelete(String),
    /// Second click on the same delete button
    ConfirmDelete(String),
    CancelDelete,
}

/// Render the session sidebar. Returns what the user asked for.
pub fn sessions_panel(ui: &mut egui::Ui, state: &UiState) -> SessionAction {
    let mut action = SessionAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            let new_chat = ui.add_sized(
                Vec2::new(ui.available_width(), 28.0),
                egui::Button::new(RichText::new("+ New Chat").color(TEXT_PRIMARY).strong())
                    .fill(ACCENT)
                    .corner_radius(PANEL_ROUNDING),
            );
            if new_chat.clicked() {
                action = SessionAction::NewChat;
            }

            ui.add_space(6.0);
            ui.label(RichText::new("Chats").color(TEXT_SECONDARY).small());
            ui.separator();

            if state.sessions.is_empty() {
                let text = if state.is_pending(lingua_types::event::Activity::LoadSessions) {
                    "Loading..."
                } else {
                    "No chats yet"
                };
                ui.label(RichText::new(text).color(TEXT_SECONDARY).italics());
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for session in &state.sessions {
                        let is_active = state.active_session.as_deref() == Some(session.id.as_str());
                        let is_armed = state.armed_delete.as_deref() == Some(session.id.as_str());

                        egui::Frame::default()
                            .fill(if is_active { BG_SURFACE } else { BG_SECONDARY })
                            .corner_radius(PANEL_ROUNDING)
                            .inner_margin(6.0)
                            .show(ui, |ui| {
                                ui.horizontal(|ui| {
                                    let title = RichText::new(session.created_label())
                                        .color(if is_active { TEXT_PRIMARY } else { TEXT_SECONDARY });
                                    let row = ui
                                        .selectable_label(is_active, title)
                                        .on_hover_text(format!("{} messages", session.message_count));
                                    if row.clicked() && !is_active {
                                        action = SessionAction::Select(session.id.clone());
                                    }

                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                        if is_armed {
                                            if ui.small_button("✕").on_hover_text("Cancel").clicked() {
                                                action = SessionAction::CancelDelete;
                                            }
                                            let confirm = egui::Button::new(
                                                RichText::new("Delete?").color(TEXT_PRIMARY).small(),
                                            )
                                            .fill(ERROR);
                                            if ui.add(confirm).clicked() {
                                                action = SessionAction::ConfirmDelete(session.id.clone());
                                            }
                                        } else if ui
                                            .small_button("🗑")
                                            .on_hover_text("Delete chat")
                                            .clicked()
                                        {
                                            action = SessionAction::ArmDelete(session.id.clone());
                                        }
                                    });
                                });
                            });
                        ui.add_space(2.0);
                    }
                });
        });

    action
}
