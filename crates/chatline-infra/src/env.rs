//! Process environment adapter.

use chatline_core::config::EnvSource;

/// [`EnvSource`] backed by `std::env`. Non-UTF-8 values are treated as unset.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
