// Error taxonomy
//
// Library code returns these typed errors; the binary wraps them in
// anyhow with context. Nothing here is fatal: every failure means
// "nothing changed".

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Failure to pull a plan out of a model response
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in the model response")]
    NoJsonFound,

    #[error("model response contains malformed JSON: {0}")]
    MalformedJson(String),

    #[error("JSON does not describe a workout plan: {0}")]
    ShapeInvalid(String),
}

/// Failure reading or writing one of the local stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored data under '{key}' is corrupt: {reason}")]
    CorruptStorage { key: String, reason: String },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] std::io::Error),

    #[error("post index {index} out of range (feed has {len} posts)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failure producing a new plan
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("plan generation failed: {0}")]
    GenerationFailed(String),

    #[error("plan generation timed out after {0}s")]
    Timeout(u64),

    #[error("a plan is already being generated")]
    Busy,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure talking to the auth backend
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    AuthRejected(String),

    #[error("{0}")]
    AuthFailed(String),

    #[error("{0}")]
    Invalid(FormErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Per-field validation messages for the login/signup forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ok when no field failed, otherwise the collected errors
    pub fn into_result(self) -> Result<(), AuthError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AuthError::Invalid(self))
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Message shown when the config file cannot be read
pub fn file_not_found_error(path: &str, what: &str) -> String {
    format!(
        "{} not found or unreadable: {}\n\nCheck the path and file permissions.",
        what, path
    )
}

/// Message shown when the config file fails to parse
pub fn config_parse_error(detail: &str) -> String {
    format!(
        "Failed to parse ~/.pulseplan/config.toml\n\n{}\n\nFix the file or delete it to fall back to defaults.",
        detail
    )
}

/// Message shown when `generate` runs without an API key
pub fn missing_api_key_error() -> String {
    "No generation API key configured.\n\n\
    Set it in ~/.pulseplan/config.toml:\n\n\
    [generation]\n\
    api_key = \"...\"\n\n\
    or export GOOGLE_GEMINI_API_KEY=\"...\""
        .to_string()
}
