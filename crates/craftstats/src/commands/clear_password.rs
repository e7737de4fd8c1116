//! Clear-password command implementation

use anyhow::Result;
use craftstats_core::constants::{self, DB_KEYRING_APP_ID, MAIL_KEYRING_APP_ID};
use craftstats_core::{DbSettings, EmailSettings};
use craftstats_credentials::CredentialStore;

use crate::cli::CredentialTarget;
use crate::output::print_success;

pub async fn execute(target: CredentialTarget) -> Result<()> {
    let (app_id, username) = match target {
        CredentialTarget::Db => {
            let settings = DbSettings::load_from(&constants::db_settings_path());
            (DB_KEYRING_APP_ID, settings.username)
        }
        CredentialTarget::Email => {
            let settings = EmailSettings::load_from(&constants::email_settings_path());
            (MAIL_KEYRING_APP_ID, settings.username)
        }
    };

    CredentialStore::new(app_id).delete(&username).await?;
    print_success("Password removed from keyring");
    Ok(())
}
