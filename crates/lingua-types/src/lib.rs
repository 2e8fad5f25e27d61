pub mod message;
pub mod session;
pub mod api;
pub mod language;
pub mod event;
pub mod config;
pub mod error;


pub use error::LinguaError;
pub type Result<T> = std::result::Result<T, LinguaError>;
