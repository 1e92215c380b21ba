//! Ports used by the configuration resolver.

use std::path::Path;

use chatline_types::config::ChatConfig;
use chatline_types::error::ConfigError;

/// Access to configuration files.
///
/// Implementations live in chatline-infra (`FsConfigStore`).
pub trait ConfigStore: Send + Sync {
    /// Whether a configuration file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read and parse the configuration file at `path`.
    fn load(&self, path: &Path) -> Result<ChatConfig, ConfigError>;

    /// Write a minimal default configuration to `path` and return it.
    fn create_default(&self, path: &Path) -> Result<ChatConfig, ConfigError>;
}

/// Read-only view of environment variables.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}
