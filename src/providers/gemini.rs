// Google Gemini generator
//
// Calls `models/{model}:generateContent` with the plan schema as the system
// instruction and returns the text of the first candidate verbatim; the
// extractor deals with whatever prose surrounds the JSON.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::types::{Preferences, PLAN_SYSTEM_INSTRUCTION};
use super::PlanGenerator;
use crate::config::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, REQUEST_TIMEOUT_SECS};
use crate::errors::GenerationError;

#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GenerationError::GenerationFailed(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API root (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn to_gemini_request(&self, prefs: &Preferences) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: PLAN_SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: prefs.to_prompt(),
                }],
            }],
        }
    }
}

#[async_trait]
impl PlanGenerator for GeminiGenerator {
    async fn generate(&self, prefs: &Preferences) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = self.to_gemini_request(prefs);

        tracing::debug!("Sending plan request to Gemini model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::GenerationFailed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GenerationError::GenerationFailed(format!(
                "Gemini API returned {}: {}",
                status, error_body
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            GenerationError::GenerationFailed(format!("unreadable Gemini response: {}", e))
        })?;

        let candidate = gemini_response.candidates.into_iter().next().ok_or_else(|| {
            GenerationError::GenerationFailed("Gemini returned no candidates".to_string())
        })?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        tracing::debug!(
            "Gemini answered ({} chars, finish reason {:?})",
            text.len(),
            candidate.finish_reason
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
