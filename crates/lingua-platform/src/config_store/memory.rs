//! In-memory config store.
//! Used when localStorage is unavailable; settings last for the page only.

use std::cell::RefCell;
use lingua_core::ports::ConfigStorePort;
use lingua_types::{Result, config::ClientConfig};

#[derive(Default)]
pub struct MemoryConfigStore {
    config: RefCell<Option<ClientConfig>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStorePort for MemoryConfigStore {
    fn load(&self) -> Result<Option<ClientConfig>> {
        Ok(self.config.borrow().clone())
    }

    fn save(&self, config: &ClientConfig) -> Result<()> {
        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
