//! localStorage-backed credential store

use quill_core::store::STORAGE_KEY;
use quill_core::{CredentialPair, CredentialStore, StoreError};
use web_sys::Storage;

/// Stores the credential pair as JSON under `localStorage["authTokens"]`
#[derive(Debug, Default)]
pub struct LocalStorageCredentialStore;

/// Get localStorage
fn local_storage() -> Result<Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StoreError::unavailable("localStorage is not available"))
}

impl CredentialStore for LocalStorageCredentialStore {
    fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(pair)?;
        local_storage()?
            .set_item(STORAGE_KEY, &serialized)
            .map_err(|_| StoreError::unavailable("localStorage rejected the write"))
    }

    fn load(&self) -> Result<Option<CredentialPair>, StoreError> {
        let stored = local_storage()?
            .get_item(STORAGE_KEY)
            .map_err(|_| StoreError::unavailable("localStorage could not be read"))?;

        match stored {
            Some(stored) => Ok(Some(serde_json::from_str(&stored)?)),
            None => Ok(None),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|_| StoreError::unavailable("localStorage rejected the removal"))
    }
}
