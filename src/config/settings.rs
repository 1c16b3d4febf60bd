// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::constants::*;
use crate::providers::Preferences;

/// Which backend produces plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Google Gemini `generateContent`
    #[default]
    Gemini,
    /// An HTTP endpoint taking the preferences JSON and answering with text
    Proxy,
}

/// Plan generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: GeneratorKind,

    /// API key (Gemini only). Required only when a plan is generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub model: String,

    /// API root for Gemini, or the full endpoint URL for the proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Deadline for one generation round trip
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GeneratorKind::Gemini,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            timeout_seconds: DEFAULT_GENERATION_TIMEOUT_SECS,
        }
    }
}

/// Auth backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub server_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

/// Feature flags for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append every generation attempt to logs/generations.jsonl
    pub log_generations: bool,

    /// Enable debug logging for troubleshooting
    pub debug: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_generations: true,
            debug: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Where the stores live (default ~/.pulseplan)
    pub data_dir: PathBuf,

    pub generation: GenerationConfig,

    pub auth: AuthConfig,

    pub logging: LoggingConfig,

    /// Profile used by `generate` unless overridden on the command line
    pub preferences: Preferences,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME));

        Self {
            data_dir,
            generation: GenerationConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.generation.timeout_seconds == 0 {
            anyhow::bail!("generation.timeout_seconds must be greater than 0");
        }
        if self.generation.timeout_seconds >= REQUEST_TIMEOUT_SECS {
            anyhow::bail!(
                "generation.timeout_seconds must be below {} (the HTTP request timeout), got {}",
                REQUEST_TIMEOUT_SECS,
                self.generation.timeout_seconds
            );
        }

        check_http_url("auth.server_url", &self.auth.server_url)?;
        if let Some(base_url) = &self.generation.base_url {
            check_http_url("generation.base_url", base_url)?;
        }

        if self.generation.model.trim().is_empty() {
            anyhow::bail!("generation.model must not be empty");
        }

        Ok(())
    }

    pub fn generation_log_path(&self) -> PathBuf {
        self.data_dir.join(GENERATION_LOG_FILE)
    }
}

fn check_http_url(field: &str, value: &str) -> anyhow::Result<()> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL ({}): {}", field, value, e))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{} must be an http(s) URL, got {}", field, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.data_dir.ends_with(CONFIG_DIR_NAME));
        assert!(config.generation_log_path().ends_with("logs/generations.jsonl"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.generation.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_must_stay_under_request_timeout() {
        let mut config = Config::default();
        config.generation.timeout_seconds = REQUEST_TIMEOUT_SECS;
        assert!(config.validate().is_err());

        config.generation.timeout_seconds = 90;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));

        config.generation.timeout_seconds = REQUEST_TIMEOUT_SECS - 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_urls_rejected() {
        let mut config = Config::default();
        config.auth.server_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generation.base_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }
}
