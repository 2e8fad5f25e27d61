pub mod memory;
pub mod local;
pub mod auto;

pub use memory::MemoryConfigStore;
pub use local::LocalStorageConfigStore;
pub use auto::{auto_detect_config_store, load_or_default};
