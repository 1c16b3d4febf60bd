// Logging
//
// `init` wires tracing to stderr; `generation_logger` keeps a JSONL record
// of every plan generation attempt in the data directory.

pub mod generation_logger;

pub use generation_logger::{GenerationLogger, LogEntry, Outcome, PlanFeedback};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over `debug`.
pub fn init(debug: bool) {
    let default_level = if debug { "pulseplan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
