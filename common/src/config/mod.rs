mod config_content_provider;
mod config_manager;
mod config_serializer;

pub use config_content_provider::{
    ConfigContentProvider, FileContentConfigProvider, MemoryContentConfigProvider,
};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};

/// Checked whenever a document is loaded or stored.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
