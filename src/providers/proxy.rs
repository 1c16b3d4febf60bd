// Plain HTTP generation endpoint
//
// POSTs the preferences as a JSON body and treats the response body as the
// model's free-form answer. This is the shape of a thin server-side proxy
// in front of a hosted model.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::types::Preferences;
use super::PlanGenerator;
use crate::config::constants::REQUEST_TIMEOUT_SECS;
use crate::errors::GenerationError;

#[derive(Clone)]
pub struct ProxyGenerator {
    client: Client,
    endpoint: String,
}

impl ProxyGenerator {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GenerationError::GenerationFailed(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl PlanGenerator for ProxyGenerator {
    async fn generate(&self, prefs: &Preferences) -> Result<String, GenerationError> {
        tracing::debug!("Sending plan request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(prefs)
            .send()
            .await
            .map_err(|e| GenerationError::GenerationFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::GenerationFailed(format!("unreadable response: {}", e)))?;

        if !status.is_success() {
            return Err(GenerationError::GenerationFailed(format!(
                "generation endpoint returned {}: {}",
                status, body
            )));
        }
        Ok(body)
    }

    fn name(&self) -> &str {
        "proxy"
    }

    fn model(&self) -> &str {
        &self.endpoint
    }
}
