//! Session logic and port definitions for chatline.
//!
//! This crate defines the ports (`ChatEngine`, `LlmProvider`, `ConfigStore`,
//! `EnvSource`, `Console`, `IndicatorSurface`, `LineSource`) that the
//! infrastructure and terminal layers implement. It depends only on
//! `chatline-types` -- never on `chatline-infra` or any terminal/network crate.

pub mod command;
pub mod config;
pub mod console;
pub mod engine;
pub mod indicator;
pub mod lifecycle;
pub mod llm;
pub mod session;
