//! Shared domain types for chatline.
//!
//! Configuration, lifecycle events, conversation history, tool server views,
//! LLM request shapes and the error enums used across the workspace.
//!
//! No infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod llm;
pub mod tool;
