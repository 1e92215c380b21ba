//! Configuration types for chatline.
//!
//! `ChatConfig` is both the on-disk JSON document and, once resolved, the
//! effective configuration for a run. Every field is optional on read so a
//! partial file (or `{}`) deserializes cleanly.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Model used when neither the file nor the command line names one.
pub const DEFAULT_MODEL: &str = "anthropic:claude-3-5-sonnet-latest";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Path of the log file; empty means log to stderr.
    pub log_file_path: String,
    /// Model identifier in `provider:model` form.
    pub model: String,
    /// System instruction sent with every prompt; empty means none.
    pub system_instruction: String,
    /// Number of history messages sent per prompt; 0 sends all of them.
    pub message_window: usize,
    pub debug_mode: bool,
    pub anthropic: ProviderCredentials,
    pub openai: ProviderCredentials,
    pub google: ProviderCredentials,
    /// External tool servers keyed by name.
    #[serde(rename = "mcpServers")]
    pub mcp_servers: BTreeMap<String, ToolServerConfig>,
}

impl ChatConfig {
    pub fn log_path(&self) -> Option<&str> {
        non_empty(&self.log_file_path)
    }

    pub fn system_instruction(&self) -> Option<&str> {
        non_empty(&self.system_instruction)
    }

    pub fn credentials(&self, provider: CredentialProvider) -> &ProviderCredentials {
        match provider {
            CredentialProvider::Anthropic => &self.anthropic,
            CredentialProvider::OpenAi => &self.openai,
            CredentialProvider::Google => &self.google,
        }
    }

    pub fn credentials_mut(&mut self, provider: CredentialProvider) -> &mut ProviderCredentials {
        match provider {
            CredentialProvider::Anthropic => &mut self.anthropic,
            CredentialProvider::OpenAi => &mut self.openai,
            CredentialProvider::Google => &mut self.google,
        }
    }
}

/// Credentials and endpoint overrides for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCredentials {
    pub api_key: String,
    pub base_url: String,
    pub default_model: String,
}

/// Providers that carry credentials in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialProvider {
    Anthropic,
    OpenAi,
    Google,
}

impl CredentialProvider {
    pub const ALL: [CredentialProvider; 3] = [
        CredentialProvider::Anthropic,
        CredentialProvider::OpenAi,
        CredentialProvider::Google,
    ];

    /// Environment variables consulted, in order, for the API key.
    pub fn api_key_env_vars(self) -> &'static [&'static str] {
        match self {
            CredentialProvider::Anthropic => &["ANTHROPIC_API_KEY"],
            CredentialProvider::OpenAi => &["OPENAI_API_KEY"],
            // AI Studio calls the same key GEMINI_API_KEY.
            CredentialProvider::Google => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        }
    }
}

impl fmt::Display for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialProvider::Anthropic => write!(f, "anthropic"),
            CredentialProvider::OpenAi => write!(f, "openai"),
            CredentialProvider::Google => write!(f, "google"),
        }
    }
}

/// Definition of an external tool server.
///
/// A server with a `url` is a network endpoint; anything else is a local
/// process started from `command` and `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolServerConfig {
    Network(NetworkServerConfig),
    Process(ProcessServerConfig),
}

impl ToolServerConfig {
    pub fn interface(&self) -> Option<InterfaceRole> {
        match self {
            ToolServerConfig::Network(server) => server.interface,
            ToolServerConfig::Process(server) => server.interface,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkServerConfig {
    pub url: String,
    /// Raw `Name: value` header lines.
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<InterfaceRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessServerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<InterfaceRole>,
}

/// Special role a tool server plays for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceRole {
    Memory,
    Rag,
}

impl fmt::Display for InterfaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceRole::Memory => write!(f, "memory"),
            InterfaceRole::Rag => write!(f, "rag"),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_deserializes_to_default() {
        let config: ChatConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ChatConfig::default());
        assert!(config.log_path().is_none());
        assert!(config.system_instruction().is_none());
    }

    #[test]
    fn test_tool_servers_parse_by_shape() {
        let json = r#"{
            "model": "openai:gpt-4o",
            "mcpServers": {
                "files": { "command": "npx", "args": ["-y", "server-fs"] },
                "memory": {
                    "url": "http://localhost:8000/sse",
                    "headers": ["Authorization: Bearer secret"],
                    "interface": "memory"
                }
            }
        }"#;
        let config: ChatConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.model, "openai:gpt-4o");
        assert_eq!(config.mcp_servers.len(), 2);

        match &config.mcp_servers["files"] {
            ToolServerConfig::Process(server) => {
                assert_eq!(server.command, "npx");
                assert_eq!(server.args, vec!["-y", "server-fs"]);
                assert!(server.interface.is_none());
            }
            other => panic!("expected process server, got {other:?}"),
        }
        match &config.mcp_servers["memory"] {
            ToolServerConfig::Network(server) => {
                assert_eq!(server.url, "http://localhost:8000/sse");
                assert_eq!(server.headers.len(), 1);
            }
            other => panic!("expected network server, got {other:?}"),
        }
        assert_eq!(
            config.mcp_servers["memory"].interface(),
            Some(InterfaceRole::Memory)
        );
    }

    #[test]
    fn test_credentials_accessors_select_provider() {
        let mut config = ChatConfig::default();
        config.credentials_mut(CredentialProvider::Google).api_key = "g-key".to_string();
        assert_eq!(config.google.api_key, "g-key");
        assert_eq!(config.credentials(CredentialProvider::Google).api_key, "g-key");
        assert!(config.credentials(CredentialProvider::OpenAi).api_key.is_empty());
    }

    #[test]
    fn test_google_accepts_two_env_names() {
        assert_eq!(
            CredentialProvider::Google.api_key_env_vars(),
            &["GOOGLE_API_KEY", "GEMINI_API_KEY"]
        );
        assert_eq!(CredentialProvider::OpenAi.to_string(), "openai");
    }
}
