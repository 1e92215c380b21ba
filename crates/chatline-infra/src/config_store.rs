//! JSON configuration file store.
//!
//! Reads `ChatConfig` documents with serde_json and writes new ones
//! atomically: the contents go to a temp file in the target directory, which
//! is then persisted over the final path.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use chatline_core::config::ConfigStore;
use chatline_types::config::ChatConfig;
use chatline_types::error::ConfigError;

/// Filesystem-backed [`ConfigStore`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FsConfigStore;

impl FsConfigStore {
    /// Serialize `config` pretty-printed and write it atomically to `path`,
    /// creating parent directories as needed.
    pub fn save(&self, path: &Path, config: &ChatConfig) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        let contents = serde_json::to_string_pretty(config)?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut temp_file = NamedTempFile::new_in(dir).map_err(write_err)?;
        temp_file.write_all(contents.as_bytes()).map_err(write_err)?;
        temp_file.as_file_mut().sync_all().map_err(write_err)?;
        temp_file.persist(path).map_err(|e| write_err(e.error))?;

        debug!(path = %path.display(), "config file written");
        Ok(())
    }
}

impl ConfigStore for FsConfigStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn load(&self, path: &Path) -> Result<ChatConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn create_default(&self, path: &Path) -> Result<ChatConfig, ConfigError> {
        let config = ChatConfig::default();
        self.save(path, &config)?;
        info!(path = %path.display(), "created default config file");
        Ok(config)
    }
}
