pub mod sessions;
pub mod chat;
pub mod translator;
pub mod settings;
