//! egui panels for Lingua.
//!
//! Panels read [`state::UiState`] and return actions; the app crate turns
//! actions into calls on the client core.

pub mod state;
pub mod theme;
pub mod panels;

#[cfg(test)]
mod tests;
