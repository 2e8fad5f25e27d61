//! Client core for Lingua.
//!
//! Everything here is plain Rust over the port traits in [`ports`]; browser
//! adapters live in `lingua-platform`.

pub mod event_bus;
pub mod ports;
pub mod markup;
pub mod playback;
pub mod conversation;
pub mod translator;
pub mod voice;
