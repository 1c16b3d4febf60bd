// Project-wide constants
//
// Centralised here so defaults have one source of truth. Import via
// `use crate::config::constants::*;`.

/// Directory under $HOME holding config.toml and the data files
pub const CONFIG_DIR_NAME: &str = ".pulseplan";

/// Default Gemini model for plan generation
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default auth backend (`/user/login`, `/user/signup` live under it)
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Upper bound on one generation round trip, after which the pending
/// state is cleared and `Timeout` is reported.
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

/// Transport-level timeout on every HTTP client. `Config::validate` keeps
/// the generation timeout below it so the service-level deadline fires first.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Generation log file, relative to the data directory
pub const GENERATION_LOG_FILE: &str = "logs/generations.jsonl";
