//! Read-only views of the engine's tool servers and their tools.

use serde::{Deserialize, Serialize};

use crate::config::{InterfaceRole, ToolServerConfig};

/// A configured tool server as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub transport: ServerTransport,
    pub interface: Option<InterfaceRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerTransport {
    Network { url: String, headers: Vec<String> },
    Process { command: String, args: Vec<String> },
}

impl ServerInfo {
    pub fn from_config(name: &str, config: &ToolServerConfig) -> Self {
        let transport = match config {
            ToolServerConfig::Network(server) => ServerTransport::Network {
                url: server.url.clone(),
                headers: server.headers.clone(),
            },
            ToolServerConfig::Process(server) => ServerTransport::Process {
                command: server.command.clone(),
                args: server.args.clone(),
            },
        };
        Self {
            name: name.to_string(),
            transport,
            interface: config.interface(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Tool listing for one server, or the reason it could not be listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTools {
    pub server: String,
    pub tools: Result<Vec<ToolInfo>, String>,
}
