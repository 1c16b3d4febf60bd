// Generation log
//
// Every generation attempt (raw model answer, trailing commentary, what
// happened to it) is appended to a JSONL file in the data directory. Users
// can later attach a star rating and a note to a saved plan.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What became of one generation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Plan extracted and appended to history at this 1-based position
    Saved { position: usize },
    /// Model answered but no plan could be extracted
    Rejected { reason: String },
    /// No usable answer (transport failure, timeout)
    Failed { reason: String },
}

/// Star rating (1 to 5) and free-text note on a generated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFeedback {
    pub rating: u8,
    #[serde(default)]
    pub note: String,
}

impl PlanFeedback {
    pub fn new(rating: u8, note: impl Into<String>) -> Result<Self> {
        if !(1..=5).contains(&rating) {
            anyhow::bail!("Rating must be between 1 and 5, got {}", rating);
        }
        Ok(Self {
            rating,
            note: note.into(),
        })
    }
}

/// A single logged generation attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Backend name ("gemini", "proxy")
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<PlanFeedback>,
}

impl LogEntry {
    pub fn new(provider: &str, model: &str, outcome: Outcome) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            provider: provider.to_string(),
            model: model.to_string(),
            raw_response: None,
            commentary: None,
            outcome,
            feedback: None,
        }
    }

    pub fn with_response(mut self, raw: &str, commentary: Option<&str>) -> Self {
        self.raw_response = Some(raw.to_string());
        self.commentary = commentary.map(str::to_string);
        self
    }
}

/// Append-only JSONL writer for generation attempts
#[derive(Debug, Clone)]
pub struct GenerationLogger {
    log_path: PathBuf,
}

impl GenerationLogger {
    pub fn new(log_path: PathBuf) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create logging directory")?;
        }
        Ok(Self { log_path })
    }

    /// Append one entry, returning its id
    pub fn log(&self, entry: &LogEntry) -> Result<String> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .context("Failed to open generation log")?;

        let json = serde_json::to_string(entry).context("Failed to serialize log entry")?;
        writeln!(file, "{}", json).context("Failed to write log entry")?;

        debug!("Logged generation {} ({:?})", entry.id, entry.outcome);
        Ok(entry.id.clone())
    }

    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let contents =
            std::fs::read_to_string(&self.log_path).context("Failed to read generation log")?;

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).context("Failed to parse log entry"))
            .collect()
    }

    /// Id of the most recent attempt that produced a saved plan
    pub fn last_saved_id(&self) -> Result<Option<String>> {
        Ok(self
            .entries()?
            .into_iter()
            .rev()
            .find(|e| matches!(e.outcome, Outcome::Saved { .. }))
            .map(|e| e.id))
    }

    /// Attach feedback to a logged entry, rewriting the file
    pub fn add_feedback(&self, entry_id: &str, feedback: PlanFeedback) -> Result<()> {
        let mut entries = self.entries()?;

        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| anyhow::anyhow!("Log entry {} not found", entry_id))?;
        if !matches!(entry.outcome, Outcome::Saved { .. }) {
            anyhow::bail!("Log entry {} did not produce a plan", entry_id);
        }
        debug!("Updated feedback for entry {}: {:?}", entry_id, feedback);
        entry.feedback = Some(feedback);

        let mut file =
            File::create(&self.log_path).context("Failed to open log file for writing")?;
        for entry in entries {
            let json = serde_json::to_string(&entry)?;
            writeln!(file, "{}", json)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}
