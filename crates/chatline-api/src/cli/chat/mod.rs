//! Terminal side of the chat session.
//!
//! Provides the concrete ports `SessionLoop` runs on: line input via
//! rustyline-async, a console that renders markdown with termimad and
//! syntect, and an indicatif spinner for the busy indicator.

pub mod console;
pub mod input;
pub mod renderer;
pub mod spinner;
