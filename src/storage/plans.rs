// Plan history store
//
// Every successfully generated plan is appended here. The only deletion
// path is `clear`, which wipes the whole history.

use crate::errors::StoreError;
use crate::plan::{PlanEnvelope, WorkoutPlan};

use super::local::LocalStorage;
use super::PLANS_KEY;

#[derive(Debug, Clone)]
pub struct PlanStore {
    storage: LocalStorage,
}

impl PlanStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Append a plan. Load-modify-store runs under the key's writer lock.
    ///
    /// A corrupt history is replaced rather than blocking new plans; the
    /// loss is logged.
    pub fn append(&self, plan: &WorkoutPlan) -> Result<usize, StoreError> {
        let _lock = self.storage.lock(PLANS_KEY)?;

        let mut plans: Vec<PlanEnvelope> = match self.storage.read(PLANS_KEY) {
            Ok(existing) => existing.unwrap_or_default(),
            Err(StoreError::CorruptStorage { reason, .. }) => {
                tracing::warn!("Plan history is corrupt, starting fresh: {}", reason);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        plans.push(PlanEnvelope::from(plan.clone()));
        self.storage.write_locked(PLANS_KEY, &plans)?;

        tracing::info!("Saved plan #{} to history", plans.len());
        Ok(plans.len())
    }

    /// All stored plans, oldest first
    pub fn load_all(&self) -> Result<Vec<WorkoutPlan>, StoreError> {
        let plans: Vec<PlanEnvelope> = self.storage.read(PLANS_KEY)?.unwrap_or_default();
        Ok(plans.into_iter().map(|p| p.workout_plan).collect())
    }

    /// Like `load_all`, but a corrupt or unreadable history reads as empty
    pub fn load_all_or_empty(&self) -> Vec<WorkoutPlan> {
        self.load_all().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable plan history: {}", e);
            Vec::new()
        })
    }

    pub fn latest(&self) -> Result<Option<WorkoutPlan>, StoreError> {
        Ok(self.load_all()?.pop())
    }

    /// Delete the whole history
    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(PLANS_KEY)?;
        tracing::info!("Cleared plan history");
        Ok(())
    }
}
