//! Auto-detect the best available config store.
//!
//! Priority: localStorage → Memory (fallback)

use std::rc::Rc;
use lingua_core::ports::ConfigStorePort;
use super::{LocalStorageConfigStore, MemoryConfigStore};

/// Open the best available store.
/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_config_store() -> Rc<dyn ConfigStorePort> {
    match LocalStorageConfigStore::open() {
        Ok(store) => {
            log::info!("Config store: localStorage");
            Rc::new(store)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryConfigStore::new())
        }
    }
}

/// Load the saved config, falling back to defaults when nothing is stored
/// or the stored document no longer parses.
pub fn load_or_default(store: &dyn ConfigStorePort) -> lingua_types::config::ClientConfig {
    match store.load() {
        Ok(Some(config)) => config,
        Ok(None) => Default::default(),
        Err(e) => {
            log::warn!("Ignoring saved config from {}: {}", store.backend_name(), e);
            Default::default()
        }
    }
}
