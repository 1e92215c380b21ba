//! In-session command interpretation.
//!
//! Lines starting with `/` are reserved commands and never reach the chat
//! engine. Every other non-empty line is forwarded as a prompt.

pub mod views;

use std::sync::Arc;

use tracing::debug;

use crate::console::{Console, OutputBlock};
use crate::engine::ChatEngine;
use crate::indicator::BusyIndicator;

pub const COMMAND_PREFIX: char = '/';
pub const SERVERS_LOADING_LABEL: &str = "Loading server configuration...";

/// A recognized slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservedCommand {
    Tools,
    Help,
    History,
    Servers,
    Quit,
    /// Any other slash-prefixed line, kept as typed.
    Unknown(String),
}

impl ReservedCommand {
    /// Parse user input as a slash command.
    ///
    /// Returns `None` if the first non-space character is not `/`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if !trimmed.starts_with(COMMAND_PREFIX) {
            return None;
        }

        let command = match trimmed.to_lowercase().as_str() {
            "/tools" => ReservedCommand::Tools,
            "/help" => ReservedCommand::Help,
            "/history" => ReservedCommand::History,
            "/servers" => ReservedCommand::Servers,
            "/quit" => ReservedCommand::Quit,
            _ => ReservedCommand::Unknown(trimmed.to_string()),
        };
        Some(command)
    }
}

/// What the session should do with a line after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Not a command; send it to the engine.
    Forward,
    /// Handled locally; read the next line.
    Handled,
    /// Blank line; read the next line.
    Ignored,
    /// The user asked to leave.
    Quit,
}

/// Executes reserved commands against the engine's read-only surface.
pub struct CommandDispatcher {
    console: Arc<dyn Console>,
    indicator: Arc<BusyIndicator>,
}

impl CommandDispatcher {
    pub fn new(console: Arc<dyn Console>, indicator: Arc<BusyIndicator>) -> Self {
        Self { console, indicator }
    }

    /// Decide what to do with `line`. Never fails; views that cannot be
    /// produced degrade to inline error text.
    pub async fn dispatch<E: ChatEngine>(&self, line: &str, engine: &E) -> Dispatch {
        if line.trim().is_empty() {
            return Dispatch::Ignored;
        }
        let Some(command) = ReservedCommand::parse(line) else {
            return Dispatch::Forward;
        };

        debug!(?command, "reserved command");
        match command {
            ReservedCommand::Help => self.markdown(views::help()),
            ReservedCommand::Servers => self.show_servers(engine),
            ReservedCommand::Tools => self.show_tools(engine).await,
            ReservedCommand::History => self.markdown(views::history(&engine.history())),
            ReservedCommand::Quit => return Dispatch::Quit,
            ReservedCommand::Unknown(text) => {
                self.console
                    .emit(OutputBlock::Error(format!("Unknown command: {text}")));
                self.console.emit(OutputBlock::Notice(
                    "Type /help to see available commands".to_string(),
                ));
            }
        }
        Dispatch::Handled
    }

    fn markdown(&self, md: String) {
        self.console.emit(OutputBlock::Markdown(md));
    }

    fn show_servers<E: ChatEngine>(&self, engine: &E) {
        self.indicator.show(SERVERS_LOADING_LABEL);
        let servers = engine.servers();
        let md = views::servers(&servers);
        self.indicator.hide();
        self.markdown(md);
    }

    async fn show_tools<E: ChatEngine>(&self, engine: &E) {
        let listing = engine.tools().await;
        match views::tools(&listing) {
            None => self
                .console
                .emit(OutputBlock::Notice(views::TOOLS_DISABLED.to_string())),
            Some((md, errors)) => {
                for error in errors {
                    self.console.emit(OutputBlock::Error(error));
                }
                if !md.is_empty() {
                    self.markdown(md);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleHandler;
    use crate::lifecycle::tests::journaled;
    use chatline_types::error::EngineError;
    use chatline_types::history::ConversationMessage;
    use chatline_types::llm::MessageRole;
    use chatline_types::tool::{ServerInfo, ServerTools, ServerTransport};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine that only answers introspection calls and counts prompts.
    #[derive(Default)]
    struct StaticEngine {
        servers: Vec<ServerInfo>,
        tools: Vec<ServerTools>,
        prompts: AtomicUsize,
    }

    impl ChatEngine for StaticEngine {
        fn set_lifecycle_handler(&mut self, _handler: Arc<dyn LifecycleHandler>) {}

        async fn submit_prompt(&mut self, _prompt: &str) -> Result<String, EngineError> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        }

        fn servers(&self) -> Vec<ServerInfo> {
            self.servers.clone()
        }

        async fn tools(&self) -> Vec<ServerTools> {
            self.tools.clone()
        }

        fn history(&self) -> Vec<ConversationMessage> {
            vec![ConversationMessage::text(MessageRole::User, "earlier")]
        }

        async fn shutdown(&mut self) {}
    }

    #[test]
    fn test_parse_commands_case_and_space_insensitive() {
        assert_eq!(ReservedCommand::parse("/help"), Some(ReservedCommand::Help));
        assert_eq!(ReservedCommand::parse("  /QUIT \n"), Some(ReservedCommand::Quit));
        assert_eq!(ReservedCommand::parse("/Tools"), Some(ReservedCommand::Tools));
        assert_eq!(ReservedCommand::parse("/servers"), Some(ReservedCommand::Servers));
        assert_eq!(ReservedCommand::parse("/history"), Some(ReservedCommand::History));
    }

    #[test]
    fn test_parse_non_commands() {
        assert_eq!(ReservedCommand::parse("hello /help"), None);
        assert_eq!(ReservedCommand::parse(""), None);
    }

    #[test]
    fn test_parse_unknown_keeps_text() {
        assert_eq!(
            ReservedCommand::parse(" /Bogus "),
            Some(ReservedCommand::Unknown("/Bogus".into()))
        );
        assert_eq!(
            ReservedCommand::parse("/help me"),
            Some(ReservedCommand::Unknown("/help me".into()))
        );
    }

    #[tokio::test]
    async fn test_plain_text_is_forwarded() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine::default();

        let outcome = dispatcher.dispatch("what is rust?", &engine).await;
        assert_eq!(outcome, Dispatch::Forward);
        assert!(journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_blank_line_is_ignored_silently() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine::default();

        assert_eq!(dispatcher.dispatch("", &engine).await, Dispatch::Ignored);
        assert_eq!(dispatcher.dispatch("   \t", &engine).await, Dispatch::Ignored);
        assert!(journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_command_is_handled_not_forwarded() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine::default();

        let outcome = dispatcher.dispatch("/bogus", &engine).await;
        assert_eq!(outcome, Dispatch::Handled);
        assert_eq!(engine.prompts.load(Ordering::SeqCst), 0);
        assert_eq!(
            journal.entries(),
            vec![
                "error: Unknown command: /bogus",
                "notice: Type /help to see available commands",
            ]
        );
    }

    #[tokio::test]
    async fn test_quit_returns_quit() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine::default();

        assert_eq!(dispatcher.dispatch("  /Quit  ", &engine).await, Dispatch::Quit);
        assert!(journal.entries().is_empty());
    }

    #[tokio::test]
    async fn test_servers_view_wraps_indicator() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, Arc::clone(&indicator));
        let engine = StaticEngine {
            servers: vec![ServerInfo {
                name: "time".into(),
                transport: ServerTransport::Process {
                    command: "uvx".into(),
                    args: vec!["mcp-server-time".into()],
                },
                interface: None,
            }],
            ..StaticEngine::default()
        };

        assert_eq!(dispatcher.dispatch("/servers", &engine).await, Dispatch::Handled);
        let entries = journal.entries();
        assert_eq!(entries[0], format!("show: {SERVERS_LOADING_LABEL}"));
        assert_eq!(entries[1], format!("hide: {SERVERS_LOADING_LABEL}"));
        assert!(entries[2].starts_with("markdown: # time"));
        assert!(!indicator.is_active());
    }

    #[tokio::test]
    async fn test_tools_view_without_servers() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine::default();

        dispatcher.dispatch("/tools", &engine).await;
        assert_eq!(
            journal.entries(),
            vec![format!("notice: {}", views::TOOLS_DISABLED)]
        );
    }

    #[tokio::test]
    async fn test_tools_view_reports_server_errors_inline() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine {
            tools: vec![ServerTools {
                server: "time".into(),
                tools: Err("not connected".into()),
            }],
            ..StaticEngine::default()
        };

        dispatcher.dispatch("/tools", &engine).await;
        assert_eq!(
            journal.entries(),
            vec!["error: Error fetching tools from time: not connected"]
        );
    }

    #[tokio::test]
    async fn test_history_and_help_render_markdown() {
        let (journal, indicator, console) = journaled();
        let dispatcher = CommandDispatcher::new(console, indicator);
        let engine = StaticEngine::default();

        dispatcher.dispatch("/history", &engine).await;
        dispatcher.dispatch("/HELP", &engine).await;

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("markdown: # Conversation History"));
        assert!(entries[0].contains("earlier"));
        assert!(entries[1].starts_with("markdown: # Available Commands"));
    }
}
