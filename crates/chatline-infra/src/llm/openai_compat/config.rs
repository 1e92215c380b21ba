//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! Every provider chatline talks to is reached through its OpenAI chat
//! completions endpoint. [`ProviderKind`] names them and knows their default
//! base URL and which configured credentials they use.

use std::fmt;

use secrecy::SecretString;

use chatline_types::config::CredentialProvider;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "google").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication; `None` for local servers.
    pub api_key: Option<SecretString>,
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,
}

/// Providers accepted in the `provider:model` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    Google,
    Ollama,
}

impl ProviderKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "anthropic" => Some(ProviderKind::Anthropic),
            "openai" => Some(ProviderKind::OpenAi),
            "google" => Some(ProviderKind::Google),
            "ollama" => Some(ProviderKind::Ollama),
            _ => None,
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Google => "https://generativelanguage.googleapis.com/v1beta/openai",
            ProviderKind::Ollama => "http://localhost:11434/v1",
        }
    }

    /// Credentials section in the config, or `None` when no key is needed.
    pub fn credentials(self) -> Option<CredentialProvider> {
        match self {
            ProviderKind::Anthropic => Some(CredentialProvider::Anthropic),
            ProviderKind::OpenAi => Some(CredentialProvider::OpenAi),
            ProviderKind::Google => Some(CredentialProvider::Google),
            ProviderKind::Ollama => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Google => write!(f, "google"),
            ProviderKind::Ollama => write!(f, "ollama"),
        }
    }
}
