//! Command implementations

pub mod clear_password;
pub mod configure;
pub mod list;
pub mod monitor;
pub mod report;

use anyhow::Result;
use craftstats_core::constants::{self, DB_KEYRING_APP_ID};
use craftstats_core::DbSettings;
use craftstats_credentials::CredentialStore;
use craftstats_db::ActivityLog;

/// Build the database gateway from settings.json and the keyring password,
/// then verify the login and make sure the table exists
pub async fn open_activity_log() -> Result<ActivityLog> {
    let settings = DbSettings::load_from(&constants::db_settings_path());
    let store = CredentialStore::new(DB_KEYRING_APP_ID);
    let password = store.get(&settings.username).await?.unwrap_or_default();

    let log = ActivityLog::new(&settings, &password);
    log.check().await?;
    log.ensure_schema().await?;
    Ok(log)
}
