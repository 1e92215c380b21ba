//! Chat engine built on a single LLM provider.
//!
//! `ProviderEngine` keeps the conversation in memory, trims it to the
//! configured message window for each request, and reports progress through
//! the registered `LifecycleHandler`.

use std::sync::Arc;

use tracing::{Instrument, debug, info, info_span};

use chatline_types::config::ChatConfig;
use chatline_types::error::EngineError;
use chatline_types::history::ConversationMessage;
use chatline_types::llm::{CompletionRequest, Message};
use chatline_types::tool::{ServerInfo, ServerTools};

use crate::engine::ChatEngine;
use crate::lifecycle::{LifecycleHandler, NoopHandler};

use super::provider::LlmProvider;

/// Upper bound on generated tokens per reply.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Reported for every configured server, since this engine never connects
/// to tool servers.
pub const TOOLS_UNAVAILABLE: &str = "tool server connections are not available in this client";

/// A `provider:model` identifier split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub provider: String,
    pub model: String,
}

impl ModelSpec {
    /// Split at the first colon. Both halves must be non-empty.
    pub fn parse(identifier: &str) -> Result<Self, EngineError> {
        match identifier.split_once(':') {
            Some((provider, model)) if !provider.is_empty() && !model.is_empty() => Ok(Self {
                provider: provider.to_string(),
                model: model.to_string(),
            }),
            _ => Err(EngineError::InvalidModel(identifier.to_string())),
        }
    }
}

impl std::fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

pub struct ProviderEngine<P> {
    provider: P,
    model: String,
    system_instruction: Option<String>,
    message_window: usize,
    max_tokens: u32,
    servers: Vec<ServerInfo>,
    history: Vec<Message>,
    handler: Arc<dyn LifecycleHandler>,
    shut_down: bool,
}

impl<P: LlmProvider> ProviderEngine<P> {
    pub fn new(provider: P, spec: &ModelSpec, config: &ChatConfig) -> Self {
        let servers = config
            .mcp_servers
            .iter()
            .map(|(name, server)| ServerInfo::from_config(name, server))
            .collect();
        info!(
            provider = provider.name(),
            model = %spec.model,
            message_window = config.message_window,
            "chat engine created"
        );
        Self {
            provider,
            model: spec.model.clone(),
            system_instruction: config.system_instruction().map(str::to_string),
            message_window: config.message_window,
            max_tokens: DEFAULT_MAX_TOKENS,
            servers,
            history: Vec::new(),
            handler: Arc::new(NoopHandler),
            shut_down: false,
        }
    }

    /// Messages sent with the next request: the last `message_window`
    /// entries, or all of them when the window is 0.
    fn windowed_history(&self) -> &[Message] {
        if self.message_window == 0 || self.history.len() <= self.message_window {
            &self.history
        } else {
            &self.history[self.history.len() - self.message_window..]
        }
    }

    fn build_request(&self) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: self.windowed_history().to_vec(),
            system: self.system_instruction.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

impl<P: LlmProvider> ChatEngine for ProviderEngine<P> {
    fn set_lifecycle_handler(&mut self, handler: Arc<dyn LifecycleHandler>) {
        self.handler = handler;
    }

    async fn submit_prompt(&mut self, prompt: &str) -> Result<String, EngineError> {
        if self.shut_down {
            return Err(EngineError::ShutDown);
        }

        self.handler.on_prompt_submitted(prompt);
        self.history.push(Message::user(prompt));
        self.handler.on_thinking();

        let request = self.build_request();
        let span = info_span!(
            "chat.complete",
            provider = self.provider.name(),
            model = %request.model,
            messages = request.messages.len(),
        );
        debug!(history = self.history.len(), sent = request.messages.len(), "submitting prompt");

        match self.provider.complete(&request).instrument(span).await {
            Ok(response) => {
                debug!(
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    stop_reason = %response.stop_reason,
                    "prompt completed"
                );
                self.history.push(Message::assistant(response.content.clone()));
                self.handler.on_response(&response.content);
                Ok(response.content)
            }
            Err(e) => {
                // The unanswered prompt is not part of the conversation.
                self.history.pop();
                Err(e.into())
            }
        }
    }

    fn servers(&self) -> Vec<ServerInfo> {
        self.servers.clone()
    }

    async fn tools(&self) -> Vec<ServerTools> {
        self.servers
            .iter()
            .map(|server| ServerTools {
                server: server.name.clone(),
                tools: Err(TOOLS_UNAVAILABLE.to_string()),
            })
            .collect()
    }

    fn history(&self) -> Vec<ConversationMessage> {
        self.history
            .iter()
            .map(|message| ConversationMessage::text(message.role, message.content.clone()))
            .collect()
    }

    async fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        info!(turns = self.history.len() / 2, "chat engine shut down");
    }
}

impl<P> std::fmt::Debug for ProviderEngine<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEngine")
            .field("model", &self.model)
            .field("message_window", &self.message_window)
            .field("history_len", &self.history.len())
            .field("shut_down", &self.shut_down)
            .finish()
    }
}
