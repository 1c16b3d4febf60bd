// Application context
//
// Built once at startup from the loaded config and passed to every command
// handler. Owns the data directory handle and the session snapshot; there
// is no module-level state.

use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{self, Access, AuthClient, Decision, LoginForm, SessionStore, SignupForm, User};
use crate::config::Config;
use crate::errors::{AuthError, StoreError};
use crate::generation::PlanService;
use crate::logging::GenerationLogger;
use crate::providers::{create_generator, PlanGenerator};
use crate::storage::{FeedStore, Identity, LocalStorage, PlanStore};

pub struct AppContext {
    config: Config,
    storage: LocalStorage,
    sessions: SessionStore,
    identity: Identity,
    plans: PlanStore,
}

impl AppContext {
    /// Open the data directory and recover from interrupted writes
    pub fn init(config: Config) -> Result<Self> {
        let storage = LocalStorage::open(&config.data_dir).with_context(|| {
            format!("Failed to open data directory {}", config.data_dir.display())
        })?;

        let removed = sweep_temp_files(&storage);
        if removed > 0 {
            tracing::warn!("Removed {} partially written file(s) from {}", removed, storage.root().display());
        }

        tracing::debug!("Using data directory {}", storage.root().display());

        Ok(Self {
            sessions: SessionStore::new(storage.clone()),
            identity: Identity::new(storage.clone()),
            plans: PlanStore::new(storage.clone()),
            storage,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn plans(&self) -> &PlanStore {
        &self.plans
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn current_user(&self) -> Option<User> {
        self.sessions.current()
    }

    /// Whether a command with the given access level may run now
    pub fn guard(&self, access: Access) -> Decision {
        auth::check(access, self.current_user().as_ref())
    }

    pub async fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        let user = self.auth_client()?.login(form).await?;
        self.sessions.set(&user)?;
        Ok(user)
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<User, AuthError> {
        let user = self.auth_client()?.signup(form).await?;
        self.sessions.set(&user)?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.sessions.clear()
    }

    /// Hydrate the community feed
    pub fn open_feed(&self) -> Result<FeedStore, StoreError> {
        FeedStore::open(self.storage.clone())
    }

    pub fn generation_logger(&self) -> Result<GenerationLogger> {
        GenerationLogger::new(self.config.generation_log_path())
    }

    /// Plan service backed by the configured generator
    pub fn plan_service(&self) -> Result<PlanService> {
        let generator: Arc<dyn PlanGenerator> = Arc::from(create_generator(&self.config.generation)?);
        self.plan_service_with(generator)
    }

    /// Plan service backed by a caller-supplied generator
    pub fn plan_service_with(&self, generator: Arc<dyn PlanGenerator>) -> Result<PlanService> {
        let timeout = Duration::from_secs(self.config.generation.timeout_seconds);
        let mut service = PlanService::new(generator, self.plans.clone(), timeout);
        if self.config.logging.log_generations {
            service = service.with_logger(self.generation_logger()?);
        }
        Ok(service)
    }

    /// End of the application lifetime
    pub fn shutdown(self) {
        tracing::debug!(
            "Shutting down (signed in: {})",
            self.sessions.current().is_some()
        );
    }

    fn auth_client(&self) -> Result<AuthClient, AuthError> {
        AuthClient::new(self.config.auth.server_url.clone())
    }
}

/// Delete `*.tmp` files left by a write that never reached its rename
fn sweep_temp_files(storage: &LocalStorage) -> usize {
    let Ok(entries) = fs::read_dir(storage.root()) else {
        return 0;
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "tmp"))
        .filter(|path| fs::remove_file(path).is_ok())
        .count()
}
