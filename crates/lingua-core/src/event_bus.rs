//! Queue of [`ChatEvent`]s from the conversation, translator and voice
//! components to the egui frame loop.
//!
//! Components publish as work progresses; the app drains the queue once per
//! frame and folds it into the UI state. Failures are published through
//! [`EventBus::report`] so every component logs and surfaces them the same way.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use lingua_types::{event::ChatEvent, LinguaError};

/// Cloned into every component built from one config; clones share a queue.
#[derive(Clone)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Log a failed action and publish it as an `Error` with `context` as
    /// prefix. Superseded work is only logged at debug level.
    pub fn report(&self, context: &str, error: &LinguaError) {
        if error.is_superseded() {
            log::debug!("{}: {}", context, error);
            return;
        }
        log::error!("{}: {}", context, error);
        self.emit(ChatEvent::Error {
            message: format!("{}: {}", context, error),
        });
    }

    /// Publish a condition the user has to acknowledge.
    pub fn alert(&self, error: &LinguaError) {
        log::warn!("{}", error);
        self.emit(ChatEvent::Alert {
            message: error.to_string(),
        });
    }

    /// Everything published since the last frame, oldest first.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
