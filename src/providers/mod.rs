// Plan generation backends
//
// The generator is an external collaborator: it takes the user's
// preferences and returns free-form text that should contain one plan
// object. No schema is enforced on this side; see `plan::extractor`.

use async_trait::async_trait;

use crate::config::{GenerationConfig, GeneratorKind};
use crate::errors::{self, GenerationError};

pub mod gemini;
pub mod proxy;
pub mod types;

pub use gemini::GeminiGenerator;
pub use proxy::ProxyGenerator;
pub use types::{Preferences, PLAN_SYSTEM_INSTRUCTION};

/// Anything that can turn preferences into a raw model answer
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// One request/response round trip. Transport and HTTP failures map to
    /// `GenerationFailed`.
    async fn generate(&self, prefs: &Preferences) -> Result<String, GenerationError>;

    /// Backend name for logs ("gemini", "proxy")
    fn name(&self) -> &str;

    /// Model or endpoint in use
    fn model(&self) -> &str;
}

/// Build the configured generator
pub fn create_generator(config: &GenerationConfig) -> anyhow::Result<Box<dyn PlanGenerator>> {
    match config.provider {
        GeneratorKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!(errors::missing_api_key_error()))?;

            let mut generator = GeminiGenerator::new(api_key)?.with_model(config.model.clone());
            if let Some(base_url) = &config.base_url {
                generator = generator.with_base_url(base_url.clone());
            }
            Ok(Box::new(generator))
        }
        GeneratorKind::Proxy => {
            let endpoint = config.base_url.clone().ok_or_else(|| {
                anyhow::anyhow!("generation.provider = \"proxy\" needs generation.base_url")
            })?;
            Ok(Box::new(ProxyGenerator::new(endpoint)?))
        }
    }
}
