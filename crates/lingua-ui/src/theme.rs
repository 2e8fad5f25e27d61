//! Palette and spacing for the chat and translator views.

use egui::{Color32, CornerRadius, Stroke, Vec2};
use lingua_types::message::Role;

// Surfaces
pub const BG_PRIMARY: Color32 = Color32::from_rgb(24, 24, 27);
pub const BG_SECONDARY: Color32 = Color32::from_rgb(39, 39, 42);
pub const BG_SURFACE: Color32 = Color32::from_rgb(52, 52, 56);

// Text and status
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 228, 231);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(161, 161, 170);
pub const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);

// Message bubbles
pub const USER_BUBBLE: Color32 = Color32::from_rgb(49, 46, 129);
pub const PENDING_BUBBLE: Color32 = Color32::from_rgb(45, 45, 60);
pub const ASSISTANT_BUBBLE: Color32 = BG_SECONDARY;

// Fenced code inside replies
pub const CODE_BG: Color32 = Color32::from_rgb(15, 15, 18);
pub const CODE_FG: Color32 = Color32::from_rgb(180, 230, 180);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);
pub const BUBBLE_MARGIN: f32 = 8.0;

/// Role label color and fill for a history entry. A user message still
/// waiting for the backend is drawn muted.
pub fn bubble_colors(role: Role, provisional: bool) -> (Color32, Color32) {
    match (role, provisional) {
        (Role::User, false) => (ACCENT, USER_BUBBLE),
        (Role::User, true) => (TEXT_SECONDARY, PENDING_BUBBLE),
        (Role::Assistant, _) => (SUCCESS, ASSISTANT_BUBBLE),
    }
}

/// Dark visuals used by every panel
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let visuals = &mut style.visuals;

    visuals.dark_mode = true;
    visuals.panel_fill = BG_PRIMARY;
    visuals.window_fill = BG_SECONDARY;
    // TextEdit backgrounds, so the chat input matches code blocks
    visuals.extreme_bg_color = CODE_BG;

    for (widgets, fill, text) in [
        (&mut visuals.widgets.inactive, BG_SURFACE, TEXT_SECONDARY),
        (&mut visuals.widgets.hovered, BG_SURFACE, TEXT_PRIMARY),
        (&mut visuals.widgets.active, ACCENT, TEXT_PRIMARY),
    ] {
        widgets.bg_fill = fill;
        widgets.fg_stroke = Stroke::new(1.0, text);
    }

    visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
