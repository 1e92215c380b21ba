use std::path::PathBuf;

use thiserror::Error;

use crate::llm::LlmError;

/// Errors from reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write config file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from a chat engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid model '{0}': expected provider:model")]
    InvalidModel(String),

    #[error("unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: String },

    #[error(transparent)]
    Prompt(#[from] LlmError),

    #[error("engine has been shut down")]
    ShutDown,
}
