use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use crate::errors::StorageError;

use super::{Result, StorageBackend};

/// Process-local storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a blob, e.g. to simulate existing persisted state.
    pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        if let Ok(mut blobs) = storage.blobs.lock() {
            blobs.insert(key.into(), value.into());
        }
        storage
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.blobs
            .lock()
            .map_err(|_| StorageError::ReadFailure("memory storage lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.blobs()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
