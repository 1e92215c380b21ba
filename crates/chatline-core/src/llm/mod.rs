//! LLM provider abstractions.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `ProviderEngine`: a `ChatEngine` driven by any `LlmProvider`

pub mod engine;
pub mod provider;
