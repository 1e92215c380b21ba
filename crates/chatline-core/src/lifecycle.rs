//! Lifecycle event handling.
//!
//! A chat engine reports progress through a `LifecycleHandler`, one method
//! per event. `LifecycleEventRouter` is the session's handler: it drives the
//! busy indicator and writes prompt echoes, tool errors and responses.

use std::sync::Arc;

use chatline_types::event::LifecycleEvent;
use tracing::warn;

use crate::console::{Console, OutputBlock};
use crate::indicator::BusyIndicator;

pub const THINKING_LABEL: &str = "Thinking...";

/// Callback set invoked by a chat engine during a prompt turn.
pub trait LifecycleHandler: Send + Sync {
    fn on_prompt_submitted(&self, prompt: &str);
    fn on_thinking(&self);
    fn on_tool_call(&self, tool: &str);
    fn on_tool_call_failed(&self, tool: &str, error: &str);
    fn on_response(&self, response: &str);

    /// Route a tagged event to the matching callback.
    fn handle(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::PromptSubmitted(prompt) => self.on_prompt_submitted(prompt),
            LifecycleEvent::ThinkingStarted => self.on_thinking(),
            LifecycleEvent::ToolCallStarted(tool) => self.on_tool_call(tool),
            LifecycleEvent::ToolCallFailed { tool, error } => self.on_tool_call_failed(tool, error),
            LifecycleEvent::ResponseReceived(response) => self.on_response(response),
        }
    }
}

/// Handler that ignores every event. Engines start with this until the
/// session registers its router.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl LifecycleHandler for NoopHandler {
    fn on_prompt_submitted(&self, _prompt: &str) {}
    fn on_thinking(&self) {}
    fn on_tool_call(&self, _tool: &str) {}
    fn on_tool_call_failed(&self, _tool: &str, _error: &str) {}
    fn on_response(&self, _response: &str) {}
}

pub fn tool_label(tool: &str) -> String {
    format!("Using tool: {tool}")
}

/// Translates engine events into indicator transitions and console output.
///
/// Terminal events (`ToolCallFailed`, `ResponseReceived`) hide the indicator
/// before writing, so output never interleaves with a running spinner.
pub struct LifecycleEventRouter {
    indicator: Arc<BusyIndicator>,
    console: Arc<dyn Console>,
}

impl LifecycleEventRouter {
    pub fn new(indicator: Arc<BusyIndicator>, console: Arc<dyn Console>) -> Self {
        Self { indicator, console }
    }
}

impl LifecycleHandler for LifecycleEventRouter {
    fn on_prompt_submitted(&self, prompt: &str) {
        self.console.emit(OutputBlock::PromptEcho(prompt.to_string()));
    }

    fn on_thinking(&self) {
        self.indicator.show(THINKING_LABEL);
    }

    fn on_tool_call(&self, tool: &str) {
        self.indicator.show(tool_label(tool));
    }

    fn on_tool_call_failed(&self, tool: &str, error: &str) {
        self.indicator.hide();
        warn!(tool, error, "tool call failed");
        self.console
            .emit(OutputBlock::Error(format!("Error using tool: {tool}")));
    }

    fn on_response(&self, response: &str) {
        self.indicator.hide();
        self.console.emit(OutputBlock::Response(response.to_string()));
    }
}
