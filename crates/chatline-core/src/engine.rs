//! ChatEngine trait definition.
//!
//! The chat engine performs model calls and tool orchestration. The session
//! only needs prompt submission, read-only introspection for the in-session
//! commands, and a shutdown hook.

use std::future::Future;
use std::sync::Arc;

use chatline_types::error::EngineError;
use chatline_types::history::ConversationMessage;
use chatline_types::tool::{ServerInfo, ServerTools};

use crate::lifecycle::LifecycleHandler;

/// Contract between the session and a chat engine.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatEngine: Send + Sync {
    /// Register the callbacks invoked during `submit_prompt`.
    fn set_lifecycle_handler(&mut self, handler: Arc<dyn LifecycleHandler>);

    /// Run one prompt turn and return the final response text.
    ///
    /// Emits `PromptSubmitted` first and `ResponseReceived` last on success,
    /// with thinking and tool events in between.
    fn submit_prompt(
        &mut self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, EngineError>> + Send;

    /// Configured tool servers.
    fn servers(&self) -> Vec<ServerInfo>;

    /// Tools per server, or the per-server listing error.
    fn tools(&self) -> impl Future<Output = Vec<ServerTools>> + Send;

    /// The conversation so far.
    fn history(&self) -> Vec<ConversationMessage>;

    /// Release engine resources. Idempotent.
    fn shutdown(&mut self) -> impl Future<Output = ()> + Send;
}
