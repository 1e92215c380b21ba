//! Lifecycle events emitted by a chat engine during one prompt turn.

/// One notification from the engine.
///
/// Within a turn the engine emits `PromptSubmitted` first, then any mix of
/// `ThinkingStarted`, `ToolCallStarted` and `ToolCallFailed`, and finally
/// one `ResponseReceived`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    PromptSubmitted(String),
    ThinkingStarted,
    ToolCallStarted(String),
    ToolCallFailed { tool: String, error: String },
    ResponseReceived(String),
}
