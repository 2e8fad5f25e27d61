//! localStorage config store.
//! The whole `ClientConfig` is kept as one JSON document under a single key.

use web_sys::Storage;
use lingua_core::ports::ConfigStorePort;
use lingua_types::{LinguaError, Result, config::ClientConfig};

pub const CONFIG_KEY: &str = "lingua:config";

pub struct LocalStorageConfigStore {
    storage: Storage,
    key: String,
}

impl LocalStorageConfigStore {
    /// Open the window's localStorage.
    pub fn open() -> Result<Self> {
        Self::open_with_key(CONFIG_KEY)
    }

    pub fn open_with_key(key: &str) -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| LinguaError::Config("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| LinguaError::Config(format!("{:?}", e)))?
            .ok_or_else(|| LinguaError::Config("localStorage not available".to_string()))?;

        Ok(Self {
            storage,
            key: key.to_string(),
        })
    }

    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove_item(&self.key)
            .map_err(|e| LinguaError::Config(format!("{:?}", e)))
    }
}

impl ConfigStorePort for LocalStorageConfigStore {
    fn load(&self) -> Result<Option<ClientConfig>> {
        let raw = self
            .storage
            .get_item(&self.key)
            .map_err(|e| LinguaError::Config(format!("{:?}", e)))?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, config: &ClientConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        self.storage
            .set_item(&self.key, &json)
            .map_err(|e| LinguaError::Config(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
