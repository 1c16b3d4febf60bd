// Configuration loader
// Reads ~/.pulseplan/config.toml (every section optional), then applies
// environment overrides.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::CONFIG_DIR_NAME;
use super::settings::{AuthConfig, Config, GenerationConfig, LoggingConfig};
use crate::errors;
use crate::providers::Preferences;

/// Load configuration from the default location and the environment
pub fn load_config() -> Result<Config> {
    let path = default_config_path();
    load_config_from(path.as_deref(), |name| std::env::var(name).ok())
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Load from an explicit file (absent is fine) with a pluggable env lookup
pub fn load_config_from<F>(path: Option<&Path>, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) if path.exists() => {
            let contents = fs::read_to_string(path).map_err(|_e| {
                anyhow::anyhow!(errors::file_not_found_error(
                    &path.display().to_string(),
                    "Configuration file"
                ))
            })?;
            parse_config(&contents)?
        }
        _ => Config::default(),
    };

    apply_env_overrides(&mut config, env);

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Parse the TOML file body into a Config
pub fn parse_config(contents: &str) -> Result<Config> {
    #[derive(serde::Deserialize)]
    struct TomlConfig {
        #[serde(default)]
        data_dir: Option<PathBuf>,
        #[serde(default)]
        generation: Option<GenerationConfig>,
        #[serde(default)]
        auth: Option<AuthConfig>,
        #[serde(default)]
        logging: Option<LoggingConfig>,
        #[serde(default)]
        preferences: Option<Preferences>,
    }

    let toml_config: TomlConfig = toml::from_str(contents)
        .map_err(|e| anyhow::anyhow!(errors::config_parse_error(&e.to_string())))?;

    let mut config = Config::default();
    if let Some(data_dir) = toml_config.data_dir {
        config.data_dir = expand_home(data_dir);
    }
    if let Some(generation) = toml_config.generation {
        config.generation = generation;
    }
    if let Some(auth) = toml_config.auth {
        config.auth = auth;
    }
    if let Some(logging) = toml_config.logging {
        config.logging = logging;
    }
    if let Some(preferences) = toml_config.preferences {
        config.preferences = preferences;
    }
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut Config, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(api_key) = non_empty("GOOGLE_GEMINI_API_KEY") {
        config.generation.api_key = Some(api_key);
    }
    if let Some(server_url) = non_empty("PULSEPLAN_SERVER_URL") {
        config.auth.server_url = server_url;
    }
    if let Some(data_dir) = non_empty("PULSEPLAN_DATA_DIR") {
        config.data_dir = expand_home(PathBuf::from(data_dir));
    }
}

fn expand_home(path: PathBuf) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorKind;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(Some(dir.path().join("config.toml").as_path()), env_of(&[])).unwrap();
        assert_eq!(config.generation.timeout_seconds, 30);
        assert!(config.generation.api_key.is_none());
    }

    #[test]
    fn test_partial_file() {
        let config = parse_config(
            r#"
data_dir = "/tmp/pulseplan-test"

[generation]
provider = "proxy"
base_url = "http://localhost:3000/api/generate"
timeout_seconds = 10

[preferences]
name = "Asha"
workoutsPerWeek = 3
"#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/pulseplan-test"));
        assert_eq!(config.generation.provider, GeneratorKind::Proxy);
        assert_eq!(config.generation.timeout_seconds, 10);
        assert_eq!(config.generation.model, "gemini-1.5-flash");
        assert_eq!(config.preferences.name, "Asha");
        assert_eq!(config.preferences.workouts_per_week, 3);
        assert_eq!(config.preferences.workout_duration, 45);
        assert!(config.logging.log_generations);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = parse_config("generation = [").unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[generation]\napi_key = \"from-file\"\n").unwrap();

        let config = load_config_from(
            Some(path.as_path()),
            env_of(&[
                ("GOOGLE_GEMINI_API_KEY", "from-env"),
                ("PULSEPLAN_SERVER_URL", "https://auth.example.com"),
                ("PULSEPLAN_DATA_DIR", ""),
            ]),
        )
        .unwrap();

        assert_eq!(config.generation.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.auth.server_url, "https://auth.example.com");
        assert!(config.data_dir.ends_with(".pulseplan"));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[generation]\ntimeout_seconds = 0\n").unwrap();
        assert!(load_config_from(Some(path.as_path()), env_of(&[])).is_err());
    }
}
