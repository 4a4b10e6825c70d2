//! Persistence seam for the credential pair

use crate::credentials::CredentialPair;
use crate::error::StoreError;
use std::sync::{Mutex, PoisonError};

/// Fixed name of the persisted credential entry
pub const STORAGE_KEY: &str = "authTokens";

/// Durable storage for the current credential pair
///
/// Implementations treat the pair as opaque; token structure is never
/// validated here. All operations complete before returning.
pub trait CredentialStore: Send + Sync {
    /// Persist the pair, replacing any previous value
    fn save(&self, pair: &CredentialPair) -> Result<(), StoreError>;

    /// Last saved pair, if any
    fn load(&self) -> Result<Option<CredentialPair>, StoreError>;

    /// Remove the persisted pair. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-process store, used by tests and short-lived sessions
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    pair: Mutex<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a pair, as if saved by an earlier session
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            pair: Mutex::new(Some(pair)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
        *self.pair.lock().unwrap_or_else(PoisonError::into_inner) = Some(pair.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<CredentialPair>, StoreError> {
        Ok(self
            .pair
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.pair.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().unwrap().is_none());

        let pair = CredentialPair::new("access", "refresh");
        store.save(&pair).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn save_replaces_previous_pair() {
        let store = MemoryCredentialStore::with_pair(CredentialPair::new("a1", "r1"));
        store.save(&CredentialPair::new("a2", "r1")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().access, "a2");
    }
}
