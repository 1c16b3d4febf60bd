// Plan generation service
//
// One request at a time: a second `generate` while one is pending fails
// with `Busy` instead of queueing. The round trip is bounded by a deadline.
// Only a fully extracted plan touches the history or the current plan; any
// failure leaves both as they were.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::GenerationError;
use crate::logging::{GenerationLogger, LogEntry, Outcome};
use crate::plan::{extract_plan, WorkoutPlan};
use crate::providers::{PlanGenerator, Preferences};
use crate::storage::PlanStore;

/// A successfully generated and saved plan
#[derive(Debug, Clone)]
pub struct Generated {
    pub plan: WorkoutPlan,
    /// Prose the model added after the plan
    pub commentary: Option<String>,
    /// 1-based position in the plan history
    pub position: usize,
    /// Generation log id, when logging is enabled
    pub log_id: Option<String>,
}

pub struct PlanService {
    generator: Arc<dyn PlanGenerator>,
    plans: PlanStore,
    logger: Option<GenerationLogger>,
    timeout: Duration,
    in_flight: AtomicBool,
    current: Mutex<Option<WorkoutPlan>>,
}

/// Clears the in-flight flag however the request ends
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PlanService {
    pub fn new(generator: Arc<dyn PlanGenerator>, plans: PlanStore, timeout: Duration) -> Self {
        Self {
            generator,
            plans,
            logger: None,
            timeout,
            in_flight: AtomicBool::new(false),
            current: Mutex::new(None),
        }
    }

    pub fn with_logger(mut self, logger: GenerationLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// True while a request is pending
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The plan from the last successful generation in this session
    pub fn current(&self) -> Option<WorkoutPlan> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn generate(&self, prefs: &Preferences) -> Result<Generated, GenerationError> {
        let _flight = self.begin()?;

        tracing::info!(
            "Generating plan with {} ({})",
            self.generator.name(),
            self.generator.model()
        );

        let raw = match tokio::time::timeout(self.timeout, self.generator.generate(prefs)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::warn!("{}", e);
                self.record(LogEntry::new(
                    self.generator.name(),
                    self.generator.model(),
                    Outcome::Failed {
                        reason: e.to_string(),
                    },
                ));
                return Err(e);
            }
            Err(_) => {
                let err = GenerationError::Timeout(self.timeout.as_secs());
                tracing::warn!("{}", err);
                self.record(LogEntry::new(
                    self.generator.name(),
                    self.generator.model(),
                    Outcome::Failed {
                        reason: err.to_string(),
                    },
                ));
                return Err(err);
            }
        };

        let extraction = match extract_plan(&raw) {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::warn!("Discarding model response: {}", e);
                self.record(
                    LogEntry::new(
                        self.generator.name(),
                        self.generator.model(),
                        Outcome::Rejected {
                            reason: e.to_string(),
                        },
                    )
                    .with_response(&raw, None),
                );
                return Err(e.into());
            }
        };

        let position = self.plans.append(&extraction.plan)?;

        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(extraction.plan.clone());

        let log_id = self.record(
            LogEntry::new(
                self.generator.name(),
                self.generator.model(),
                Outcome::Saved { position },
            )
            .with_response(&raw, extraction.commentary.as_deref()),
        );

        Ok(Generated {
            plan: extraction.plan,
            commentary: extraction.commentary,
            position,
            log_id,
        })
    }

    fn begin(&self) -> Result<FlightGuard<'_>, GenerationError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GenerationError::Busy)?;
        Ok(FlightGuard(&self.in_flight))
    }

    /// Log an attempt; a logging failure never fails the generation
    fn record(&self, entry: LogEntry) -> Option<String> {
        let logger = self.logger.as_ref()?;
        match logger.log(&entry) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!("Failed to write generation log: {:#}", e);
                None
            }
        }
    }
}
