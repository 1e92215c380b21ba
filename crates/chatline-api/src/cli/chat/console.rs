//! Styled terminal output for the chat session.

use std::io::Write;
use std::sync::Mutex;

use console::style;
use tracing::warn;

use chatline_core::console::{Console, OutputBlock};

use super::renderer::ChatRenderer;

/// Writes session output to a terminal writer.
///
/// Every block is written as whole lines and flushed before `emit` returns,
/// so output is on screen in emit order. In the binary the writer is the
/// readline [`TerminalWriter`](super::input::TerminalWriter), so output lands
/// above the input prompt.
pub struct TerminalConsole<W> {
    writer: Mutex<W>,
    renderer: ChatRenderer,
}

impl<W: Write + Send> TerminalConsole<W> {
    pub fn new(writer: W, renderer: ChatRenderer) -> Self {
        Self {
            writer: Mutex::new(writer),
            renderer,
        }
    }

    fn format(&self, block: OutputBlock) -> String {
        match block {
            OutputBlock::PromptEcho(text) => {
                format!("\n{}{text}\n\n", style("You: ").green().bold())
            }
            OutputBlock::Response(text) => {
                format!(
                    "\n{}\n{}\n",
                    style("Assistant: ").cyan().bold(),
                    self.markdown(&text)
                )
            }
            OutputBlock::Error(text) => format!("{}\n", style(text).red().bold()),
            OutputBlock::Markdown(text) => self.markdown(&text),
            OutputBlock::Notice(text) => format!("{text}\n"),
        }
    }

    /// Rendered markdown, or the raw text after an inline error.
    fn markdown(&self, text: &str) -> String {
        match self.renderer.render(text) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!(error = %e, "failed to render markdown");
                format!(
                    "{}\n{text}\n",
                    style(format!("Error rendering markdown: {e}")).red()
                )
            }
        }
    }
}

impl<W: Write + Send> Console for TerminalConsole<W> {
    fn emit(&self, block: OutputBlock) {
        let mut text = self.format(block);
        if !text.ends_with('\n') {
            text.push('\n');
        }
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writer.write_all(text.as_bytes()).and_then(|()| writer.flush()) {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}
