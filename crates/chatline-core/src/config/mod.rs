//! Configuration resolution.
//!
//! `ConfigResolver` merges the configuration file, the environment and the
//! command-line flags into one effective `ChatConfig`. File and environment
//! access go through the `ConfigStore` and `EnvSource` ports so resolution
//! can be tested without touching the real filesystem or process env.
//! Implementations live in chatline-infra.

pub mod resolver;
pub mod store;

pub use resolver::{ConfigResolver, FlagValues, DEFAULT_CONFIG_FILE};
pub use store::{ConfigStore, EnvSource};
