//! Layered configuration resolution.
//!
//! Precedence, lowest to highest:
//! 1. the base document (explicit path, conventional `config.json`, or empty)
//! 2. environment variables, only for API keys the base left empty
//! 3. command-line flags, only when non-empty
//! 4. the fixed default model when nothing named one

use std::path::{Path, PathBuf};

use chatline_types::config::{ChatConfig, CredentialProvider, DEFAULT_MODEL};
use chatline_types::error::ConfigError;
use tracing::{debug, info};

use super::store::{ConfigStore, EnvSource};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Values supplied on the command line.
///
/// `None` and empty strings both mean "not supplied". A `message_window`
/// of 0 and `debug = false` are likewise treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    pub model: Option<String>,
    pub message_window: usize,
    pub debug: bool,
    pub openai_url: Option<String>,
    pub anthropic_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
}

impl FlagValues {
    fn apply(&self, config: &mut ChatConfig) {
        if self.debug {
            config.debug_mode = true;
        }
        if self.message_window > 0 {
            config.message_window = self.message_window;
        }
        overwrite(&mut config.model, &self.model);
        overwrite(&mut config.openai.base_url, &self.openai_url);
        overwrite(&mut config.anthropic.base_url, &self.anthropic_url);
        overwrite(&mut config.openai.api_key, &self.openai_api_key);
        overwrite(&mut config.anthropic.api_key, &self.anthropic_api_key);
        overwrite(&mut config.google.api_key, &self.google_api_key);
    }
}

fn overwrite(target: &mut String, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        *target = value.to_string();
    }
}

/// Merges file, environment and flags into the effective configuration.
pub struct ConfigResolver<S, E> {
    store: S,
    env: E,
    default_path: PathBuf,
}

impl<S: ConfigStore, E: EnvSource> ConfigResolver<S, E> {
    pub fn new(store: S, env: E) -> Self {
        Self {
            store,
            env,
            default_path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    /// Override the conventional location consulted when no path is given.
    pub fn with_default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = path.into();
        self
    }

    /// Resolve the effective configuration.
    ///
    /// A missing explicit `path` is created with default contents. Fails
    /// only when the file to load cannot be read or parsed, or a new file
    /// cannot be written.
    pub fn resolve(
        &self,
        flags: &FlagValues,
        path: Option<&Path>,
    ) -> Result<ChatConfig, ConfigError> {
        let mut config = self.load_base(path)?;
        self.apply_env(&mut config);
        flags.apply(&mut config);
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        info!(
            model = %config.model,
            message_window = config.message_window,
            servers = config.mcp_servers.len(),
            debug = config.debug_mode,
            "configuration resolved"
        );
        Ok(config)
    }

    fn load_base(&self, path: Option<&Path>) -> Result<ChatConfig, ConfigError> {
        match path {
            Some(path) if self.store.exists(path) => self.store.load(path),
            Some(path) => {
                info!(path = %path.display(), "config file not found, creating default");
                self.store.create_default(path)
            }
            None if self.store.exists(&self.default_path) => {
                debug!(path = %self.default_path.display(), "using conventional config file");
                self.store.load(&self.default_path)
            }
            None => Ok(ChatConfig::default()),
        }
    }

    fn apply_env(&self, config: &mut ChatConfig) {
        for provider in CredentialProvider::ALL {
            let credentials = config.credentials_mut(provider);
            if !credentials.api_key.is_empty() {
                continue;
            }
            let found = provider
                .api_key_env_vars()
                .iter()
                .find_map(|name| self.env.var(name).filter(|value| !value.is_empty()));
            if let Some(key) = found {
                debug!(%provider, "api key taken from environment");
                credentials.api_key = key;
            }
        }
    }
}
