//! Infrastructure layer for chatline.
//!
//! Contains implementations of the ports defined in `chatline-core`: the
//! JSON config file store, the process environment, and the
//! OpenAI-compatible LLM provider with the engine factory built on it.

pub mod config_store;
pub mod env;
pub mod llm;

pub use config_store::FsConfigStore;
pub use env::ProcessEnv;
pub use llm::{DefaultEngine, create_engine};
