//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! proper handling of EOF (Ctrl+D) and interrupt (Ctrl+C) signals.
//!
//! The `Readline` is shared with [`TerminalWriter`]. Bytes written to a
//! `SharedWriter` only reach the terminal while `Readline` is polled or
//! flushed, so the writer flushes it whenever the input side is idle.

use std::io::{self, Write};
use std::sync::Arc;

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};
use tokio::sync::Mutex;
use tracing::debug;

use chatline_core::session::{InputEvent, LineSource};

pub const INPUT_PROMPT: &str = "Enter your prompt (Type /help for commands, Ctrl+C to quit)";

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Arc<Mutex<Readline>>,
    prompt: String,
}

impl ChatInput {
    /// Create the input handler with the standard prompt.
    ///
    /// Returns the input handler and a [`TerminalWriter`] that prints output
    /// above the readline prompt without garbling it.
    pub fn new() -> Result<(Self, TerminalWriter), ReadlineError> {
        let prompt = format!("{INPUT_PROMPT} > ");
        let (mut rl, writer) = Readline::new(prompt.clone())?;
        // Submitted lines are echoed by the session itself.
        rl.should_print_line_on(false, false);

        let rl = Arc::new(Mutex::new(rl));
        let writer = TerminalWriter {
            writer,
            rl: Arc::clone(&rl),
        };
        Ok((Self { rl, prompt }, writer))
    }
}

impl LineSource for ChatInput {
    async fn read_line(&mut self) -> Result<InputEvent, io::Error> {
        let mut rl = self.rl.lock().await;
        // A flush during the last turn erased the prompt.
        rl.update_prompt(&self.prompt).map_err(readline_error)?;

        match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.clone());
                }
                Ok(InputEvent::Line(line))
            }
            Ok(ReadlineEvent::Eof) => Ok(InputEvent::Eof),
            Ok(ReadlineEvent::Interrupted) => Ok(InputEvent::Interrupted),
            Err(e) => Err(readline_error(e)),
        }
    }
}

impl Drop for ChatInput {
    fn drop(&mut self) {
        if let Ok(mut rl) = self.rl.try_lock() {
            if let Err(e) = rl.flush() {
                debug!(error = %e, "failed to flush pending output");
            }
        }
    }
}

fn readline_error(e: ReadlineError) -> io::Error {
    io::Error::other(e.to_string())
}

/// Output half of the terminal: a `SharedWriter` whose `flush` pushes the
/// queued bytes to the screen immediately.
pub struct TerminalWriter {
    writer: SharedWriter,
    rl: Arc<Mutex<Readline>>,
}

impl Write for TerminalWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        // While a read is pending the lock is held and `readline()` prints
        // the queue itself.
        match self.rl.try_lock() {
            Ok(mut rl) => rl.flush().map_err(readline_error),
            Err(_) => Ok(()),
        }
    }
}
