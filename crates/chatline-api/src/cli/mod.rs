//! CLI flag definitions for the `chatline` binary.
//!
//! Uses clap derive macros for argument parsing. Every flag is optional;
//! values left out fall back to the environment and the config file.

pub mod chat;

use std::path::PathBuf;

use clap::Parser;

use chatline_core::config::FlagValues;

/// Chat with a language model from your terminal.
#[derive(Debug, Parser)]
#[command(name = "chatline", version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON config file (created with defaults if missing).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of history messages sent with each prompt (0 keeps the configured value).
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub message_window: usize,

    /// Model to use, as provider:model (e.g. openai:gpt-4o).
    #[arg(short, long, value_name = "PROVIDER:MODEL")]
    pub model: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    /// Base URL for the OpenAI API.
    #[arg(long, value_name = "URL")]
    pub openai_url: Option<String>,

    /// Base URL for the Anthropic API.
    #[arg(long, value_name = "URL")]
    pub anthropic_url: Option<String>,

    /// OpenAI API key.
    #[arg(long, value_name = "KEY")]
    pub openai_api_key: Option<String>,

    /// Anthropic API key.
    #[arg(long, value_name = "KEY")]
    pub anthropic_api_key: Option<String>,

    /// Google API key.
    #[arg(long, value_name = "KEY")]
    pub google_api_key: Option<String>,
}

impl Cli {
    /// The flag layer of configuration resolution.
    pub fn flag_values(&self) -> FlagValues {
        FlagValues {
            model: self.model.clone(),
            message_window: self.message_window,
            debug: self.debug,
            openai_url: self.openai_url.clone(),
            anthropic_url: self.anthropic_url.clone(),
            openai_api_key: self.openai_api_key.clone(),
            anthropic_api_key: self.anthropic_api_key.clone(),
            google_api_key: self.google_api_key.clone(),
        }
    }
}
