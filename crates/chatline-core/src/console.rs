//! Output port for everything the session writes to the user.

/// A unit of user-visible output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBlock {
    /// The user's prompt echoed back with its label.
    PromptEcho(String),
    /// The engine's reply, rendered as markdown.
    Response(String),
    /// A styled, non-fatal error line.
    Error(String),
    /// A read-only view (help, servers, tools, history) as markdown.
    Markdown(String),
    /// Plain informational text.
    Notice(String),
}

/// Destination for session output.
///
/// Implementations must be callable from the thread that delivers lifecycle
/// events, which may not be the one reading input.
pub trait Console: Send + Sync {
    fn emit(&self, block: OutputBlock);
}
