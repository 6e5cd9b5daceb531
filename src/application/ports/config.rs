//! Configuration storage port

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persistent configuration.
///
/// A missing backing file is not an error: `load` returns an empty config
/// and the defaults take over at merge time.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration, empty if none exists yet
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the given configuration, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file
    fn path(&self) -> PathBuf;

    /// Whether the backing file exists
    fn exists(&self) -> bool;

    /// Write a fresh config with default values.
    /// Fails with `AlreadyExists` rather than clobbering an existing file.
    async fn init(&self) -> Result<(), ConfigError>;
}
