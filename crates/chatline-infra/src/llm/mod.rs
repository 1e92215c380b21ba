//! LLM provider implementations and the chat engine factory.
//!
//! [`create_engine`] turns the effective configuration into a
//! [`ProviderEngine`] backed by an [`OpenAiCompatibleProvider`].

pub mod openai_compat;

use secrecy::SecretString;
use tracing::info;

use chatline_core::llm::engine::{ModelSpec, ProviderEngine};
use chatline_types::config::ChatConfig;
use chatline_types::error::EngineError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, ProviderKind};

/// Concrete engine type used by the binary.
pub type DefaultEngine = ProviderEngine<OpenAiCompatibleProvider>;

/// Build the chat engine for `config.model`.
///
/// # Errors
///
/// - [`EngineError::InvalidModel`] when the model is not `provider:model`
/// - [`EngineError::UnknownProvider`] for providers other than anthropic,
///   openai, google and ollama
/// - [`EngineError::MissingApiKey`] when a hosted provider has no key
pub fn create_engine(config: &ChatConfig) -> Result<DefaultEngine, EngineError> {
    let spec = ModelSpec::parse(&config.model)?;
    let kind = ProviderKind::from_name(&spec.provider)
        .ok_or_else(|| EngineError::UnknownProvider(spec.provider.clone()))?;

    let (api_key, base_url) = match kind.credentials() {
        Some(section) => {
            let credentials = config.credentials(section);
            if credentials.api_key.is_empty() {
                return Err(EngineError::MissingApiKey {
                    provider: kind.to_string(),
                });
            }
            let base_url = if credentials.base_url.is_empty() {
                kind.default_base_url().to_string()
            } else {
                credentials.base_url.clone()
            };
            (
                Some(SecretString::from(credentials.api_key.clone())),
                base_url,
            )
        }
        None => (None, kind.default_base_url().to_string()),
    };

    info!(provider = %kind, model = %spec.model, base_url = %base_url, "creating provider");
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: kind.to_string(),
        base_url,
        api_key,
        model: spec.model.clone(),
    });
    Ok(ProviderEngine::new(provider, &spec, config))
}
