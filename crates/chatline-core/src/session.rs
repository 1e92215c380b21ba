//! The interactive session loop.
//!
//! `SessionLoop` reads one line at a time, lets the `CommandDispatcher`
//! handle reserved commands, and forwards everything else to the chat
//! engine. Whatever ends the session (quit command, interrupt, end of input
//! or a failed prompt) the engine's shutdown hook runs exactly once.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use chatline_types::error::EngineError;

use crate::command::{CommandDispatcher, Dispatch};
use crate::console::{Console, OutputBlock};
use crate::engine::ChatEngine;
use crate::indicator::BusyIndicator;
use crate::lifecycle::LifecycleEventRouter;

pub const FAREWELL: &str = "Goodbye!";

/// One result of waiting for user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// The user pressed Ctrl+C.
    Interrupted,
    /// The input stream closed (Ctrl+D).
    Eof,
}

/// Source of user input lines.
pub trait LineSource: Send {
    fn read_line(&mut self) -> impl Future<Output = Result<InputEvent, std::io::Error>> + Send;
}

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Quit,
    Interrupted,
    EndOfInput,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("prompt failed: {0}")]
    Prompt(#[from] EngineError),

    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

pub struct SessionLoop<E, I> {
    engine: E,
    input: I,
    console: Arc<dyn Console>,
    indicator: Arc<BusyIndicator>,
    dispatcher: CommandDispatcher,
}

impl<E: ChatEngine, I: LineSource> SessionLoop<E, I> {
    /// Build the loop and register the lifecycle router with the engine.
    pub fn new(
        mut engine: E,
        input: I,
        console: Arc<dyn Console>,
        indicator: Arc<BusyIndicator>,
    ) -> Self {
        let router = LifecycleEventRouter::new(Arc::clone(&indicator), Arc::clone(&console));
        engine.set_lifecycle_handler(Arc::new(router));
        let dispatcher = CommandDispatcher::new(Arc::clone(&console), Arc::clone(&indicator));
        Self {
            engine,
            input,
            console,
            indicator,
            dispatcher,
        }
    }

    /// Run until the user leaves or a prompt fails.
    pub async fn run(mut self) -> Result<SessionExit, SessionError> {
        let outcome = self.drive().await;

        self.indicator.hide();
        self.engine.shutdown().await;

        match &outcome {
            Ok(exit) => {
                info!(?exit, "session ended");
                self.console.emit(OutputBlock::Notice(FAREWELL.to_string()));
            }
            Err(e) => error!(error = %e, "session terminated"),
        }
        outcome
    }

    async fn drive(&mut self) -> Result<SessionExit, SessionError> {
        loop {
            let line = match self.input.read_line().await? {
                InputEvent::Line(line) => line,
                InputEvent::Interrupted => return Ok(SessionExit::Interrupted),
                InputEvent::Eof => return Ok(SessionExit::EndOfInput),
            };

            match self.dispatcher.dispatch(&line, &self.engine).await {
                Dispatch::Forward => {}
                Dispatch::Handled | Dispatch::Ignored => continue,
                Dispatch::Quit => return Ok(SessionExit::Quit),
            }

            let result = self.engine.submit_prompt(&line).await;
            // Never leave a spinner running while waiting for input.
            self.indicator.hide();
            result?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::IndicatorState;
    use crate::lifecycle::LifecycleHandler;
    use crate::lifecycle::tests::journaled;
    use chatline_types::event::LifecycleEvent;
    use chatline_types::history::ConversationMessage;
    use chatline_types::llm::LlmError;
    use chatline_types::tool::{ServerInfo, ServerTools};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Input that replays a fixed script, then reports end of input.
    struct ScriptedInput(VecDeque<InputEvent>);

    impl ScriptedInput {
        fn lines(lines: &[&str]) -> Self {
            Self(lines.iter().map(|l| InputEvent::Line(l.to_string())).collect())
        }

        fn then(mut self, event: InputEvent) -> Self {
            self.0.push_back(event);
            self
        }
    }

    impl LineSource for ScriptedInput {
        async fn read_line(&mut self) -> Result<InputEvent, std::io::Error> {
            Ok(self.0.pop_front().unwrap_or(InputEvent::Eof))
        }
    }

    /// Engine that plays back lifecycle events for each prompt.
    #[derive(Default)]
    struct ScriptedEngine {
        handler: Option<Arc<dyn LifecycleHandler>>,
        turns: VecDeque<Result<Vec<LifecycleEvent>, EngineError>>,
        prompts: Arc<Mutex<Vec<String>>>,
        shutdowns: Arc<AtomicUsize>,
    }

    impl ScriptedEngine {
        fn turn(mut self, events: Vec<LifecycleEvent>) -> Self {
            self.turns.push_back(Ok(events));
            self
        }

        fn failing(mut self, error: EngineError) -> Self {
            self.turns.push_back(Err(error));
            self
        }
    }

    impl ChatEngine for ScriptedEngine {
        fn set_lifecycle_handler(&mut self, handler: Arc<dyn LifecycleHandler>) {
            self.handler = Some(handler);
        }

        async fn submit_prompt(&mut self, prompt: &str) -> Result<String, EngineError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let handler = self.handler.clone().unwrap();
            handler.on_prompt_submitted(prompt);
            let events = match self.turns.pop_front() {
                Some(Ok(events)) => events,
                Some(Err(e)) => {
                    handler.on_thinking();
                    return Err(e);
                }
                None => vec![LifecycleEvent::ResponseReceived("ok".into())],
            };
            let mut reply = String::new();
            for event in &events {
                if let LifecycleEvent::ResponseReceived(text) = event {
                    reply = text.clone();
                }
                handler.handle(event);
            }
            Ok(reply)
        }

        fn servers(&self) -> Vec<ServerInfo> {
            Vec::new()
        }

        async fn tools(&self) -> Vec<ServerTools> {
            Vec::new()
        }

        fn history(&self) -> Vec<ConversationMessage> {
            Vec::new()
        }

        async fn shutdown(&mut self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_quit_ends_session_without_prompting() {
        let (journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default();
        let prompts = Arc::clone(&engine.prompts);
        let shutdowns = Arc::clone(&engine.shutdowns);

        let session = SessionLoop::new(
            engine,
            ScriptedInput::lines(&["  /QUIT ", "never read"]),
            console,
            indicator,
        );
        let exit = session.run().await.unwrap();

        assert_eq!(exit, SessionExit::Quit);
        assert!(prompts.lock().unwrap().is_empty());
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
        assert_eq!(journal.entries(), vec![format!("notice: {FAREWELL}")]);
    }

    #[tokio::test]
    async fn test_interrupt_is_a_clean_exit() {
        let (journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default();
        let shutdowns = Arc::clone(&engine.shutdowns);

        let input = ScriptedInput::lines(&[]).then(InputEvent::Interrupted);
        let exit = SessionLoop::new(engine, input, console, indicator)
            .run()
            .await
            .unwrap();

        assert_eq!(exit, SessionExit::Interrupted);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
        assert_eq!(journal.entries().last().unwrap(), "notice: Goodbye!");
    }

    #[tokio::test]
    async fn test_prompt_turn_output_order() {
        let (journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default().turn(vec![
            LifecycleEvent::ThinkingStarted,
            LifecycleEvent::ToolCallStarted("x".into()),
            LifecycleEvent::ToolCallFailed {
                tool: "x".into(),
                error: "boom".into(),
            },
            LifecycleEvent::ResponseReceived("ok".into()),
        ]);

        let exit = SessionLoop::new(
            engine,
            ScriptedInput::lines(&["hello"]),
            console,
            Arc::clone(&indicator),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(exit, SessionExit::EndOfInput);
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert_eq!(
            journal.entries(),
            vec![
                "echo: hello",
                "show: Thinking...",
                "hide: Thinking...",
                "show: Using tool: x",
                "hide: Using tool: x",
                "error: Error using tool: x",
                "response: ok",
                "notice: Goodbye!",
            ]
        );
    }

    #[tokio::test]
    async fn test_commands_and_blank_lines_are_not_forwarded() {
        let (journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default();
        let prompts = Arc::clone(&engine.prompts);

        SessionLoop::new(
            engine,
            ScriptedInput::lines(&["", "/bogus", "   ", "real question"]),
            console,
            indicator,
        )
        .run()
        .await
        .unwrap();

        assert_eq!(*prompts.lock().unwrap(), vec!["real question"]);
        let entries = journal.entries();
        assert_eq!(entries[0], "error: Unknown command: /bogus");
        assert_eq!(entries[2], "echo: real question");
    }

    #[tokio::test]
    async fn test_engine_busy_indicator_hidden_before_next_read() {
        // The engine starts thinking but never reports a response.
        let (_journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default().turn(vec![LifecycleEvent::ThinkingStarted]);

        SessionLoop::new(
            engine,
            ScriptedInput::lines(&["hello"]),
            console,
            Arc::clone(&indicator),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(indicator.state(), IndicatorState::Idle);
    }

    #[tokio::test]
    async fn test_prompt_failure_is_fatal_and_shuts_down_once() {
        let (journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default()
            .failing(EngineError::Prompt(LlmError::AuthenticationFailed));
        let prompts = Arc::clone(&engine.prompts);
        let shutdowns = Arc::clone(&engine.shutdowns);

        let err = SessionLoop::new(
            engine,
            ScriptedInput::lines(&["first", "second"]),
            console,
            Arc::clone(&indicator),
        )
        .run()
        .await
        .unwrap_err();

        assert!(matches!(err, SessionError::Prompt(EngineError::Prompt(_))));
        assert_eq!(*prompts.lock().unwrap(), vec!["first"]);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert!(!journal.entries().iter().any(|e| e.contains(FAREWELL)));
    }

    #[tokio::test]
    async fn test_input_error_is_fatal() {
        struct BrokenInput;

        impl LineSource for BrokenInput {
            async fn read_line(&mut self) -> Result<InputEvent, std::io::Error> {
                Err(std::io::Error::other("terminal closed"))
            }
        }

        let (_journal, indicator, console) = journaled();
        let engine = ScriptedEngine::default();
        let shutdowns = Arc::clone(&engine.shutdowns);

        let err = SessionLoop::new(engine, BrokenInput, console, indicator)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Input(_)));
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }
}
