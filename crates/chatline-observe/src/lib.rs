//! Observability setup for chatline: structured logging via `tracing`.

pub mod tracing_setup;
