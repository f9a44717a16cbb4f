use std::sync::Mutex;

use crate::utils::storage::{FileStorage, StorageError};

/// Storage key of the session token.
pub const TOKEN_KEY: &str = "token";

/// Persistence for the single opaque session token.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Durable store surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    storage: FileStorage,
}

impl FileTokenStore {
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)
    }
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot().clone())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}
