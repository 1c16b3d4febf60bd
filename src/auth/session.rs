// Signed-in user snapshot, persisted in the data directory

use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::storage::{LocalStorage, SESSION_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: LocalStorage,
}

impl SessionStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Current user. A corrupt snapshot reads as signed out.
    pub fn current(&self) -> Option<User> {
        match self.storage.read::<User>(SESSION_KEY) {
            Ok(user) => user.filter(|u| !u.username.is_empty() || !u.email.is_empty()),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session: {}", e);
                None
            }
        }
    }

    pub fn set(&self, user: &User) -> Result<(), StoreError> {
        self.storage.write(SESSION_KEY, user)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(SESSION_KEY)
    }
}
