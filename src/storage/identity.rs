// Local display name used to stamp posts and comments

use crate::errors::StoreError;

use super::local::LocalStorage;
use super::NAME_KEY;

#[derive(Debug, Clone)]
pub struct Identity {
    storage: LocalStorage,
}

impl Identity {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .storage
            .read::<String>(NAME_KEY)?
            .filter(|name| !name.trim().is_empty()))
    }

    /// Store a trimmed display name. Blank names are ignored.
    pub fn set(&self, name: &str) -> Result<bool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        self.storage.write(NAME_KEY, &name)?;
        Ok(true)
    }
}
