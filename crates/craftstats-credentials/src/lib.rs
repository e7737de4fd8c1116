//! OS keyring password store
//!
//! Passwords are keyed by `(app_id, username)` and never written to the
//! settings files. The keyring API is synchronous, so every call runs under
//! `spawn_blocking`.

use craftstats_core::{Error, Result};
use tracing::{debug, error};

/// Password store backed by the OS keyring
#[derive(Debug, Clone)]
pub struct CredentialStore {
    app_id: String,
}

impl CredentialStore {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }

    /// Look up the stored password for `username`, `None` when absent
    pub async fn get(&self, username: &str) -> Result<Option<String>> {
        let app_id = self.app_id.clone();
        let username = username.to_string();

        tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(&app_id, &username)
                .map_err(|e| Error::credential(e.to_string()))?;

            match entry.get_password() {
                Ok(password) => Ok(Some(password)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(Error::credential(e.to_string())),
            }
        })
        .await
        .map_err(|e| Error::credential(e.to_string()))?
    }

    /// Store `password` for `username`
    pub async fn set(&self, username: &str, password: &str) -> Result<()> {
        let app_id = self.app_id.clone();
        let username = username.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(&app_id, &username)
                .map_err(|e| Error::credential(e.to_string()))?;
            entry
                .set_password(&password)
                .map_err(|e| Error::credential(e.to_string()))
        })
        .await
        .map_err(|e| Error::credential(e.to_string()))?
    }

    /// Remove the stored password for `username`
    ///
    /// Deleting an absent credential is benign: the store is already in the
    /// requested state, so it is logged and swallowed rather than propagated.
    pub async fn delete(&self, username: &str) -> Result<()> {
        let app_id = self.app_id.clone();
        let username = username.to_string();

        tokio::task::spawn_blocking(move || {
            let entry = keyring::Entry::new(&app_id, &username)
                .map_err(|e| Error::credential(e.to_string()))?;

            match entry.delete_credential() {
                Ok(()) => {
                    debug!("Password removed from keyring");
                    Ok(())
                }
                Err(keyring::Error::NoEntry) => {
                    error!("Password cannot be deleted or already has been removed");
                    Ok(())
                }
                Err(e) => Err(Error::credential(e.to_string())),
            }
        })
        .await
        .map_err(|e| Error::credential(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The mock keyring backend is process-global, so the full lifecycle runs
    // in a single test to avoid ordering surprises.
    #[tokio::test]
    async fn test_credential_lifecycle_with_mock_backend() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());

        let store = CredentialStore::new("craftstats-test");

        // Absent before set
        assert_eq!(store.get("postgres").await.unwrap(), None);

        // Set then get
        store.set("postgres", "hunter2").await.unwrap();
        assert_eq!(
            store.get("postgres").await.unwrap(),
            Some("hunter2".to_string())
        );

        // Delete, then delete-when-absent must not raise
        store.delete("postgres").await.unwrap();
        assert_eq!(store.get("postgres").await.unwrap(), None);
        store.delete("postgres").await.unwrap();
    }
}
