//! Configure command implementation
//!
//! Interactive prompts seeded with the current settings. Passwords go to the
//! OS keyring, never into the JSON files; leaving the password prompt blank
//! keeps whatever the keyring already holds.

use anyhow::Result;
use craftstats_core::constants::{self, DB_KEYRING_APP_ID, MAIL_KEYRING_APP_ID};
use craftstats_core::{DbSettings, EmailSettings};
use craftstats_credentials::CredentialStore;
use dialoguer::{Confirm, Input, Password};

use crate::output::print_success;

pub async fn db() -> Result<()> {
    let path = constants::db_settings_path();
    let current = DbSettings::load_from(&path);

    let settings = DbSettings {
        ip_address: Input::new()
            .with_prompt("Database host")
            .with_initial_text(&current.ip_address)
            .interact_text()?,
        port: Input::new()
            .with_prompt("Database port")
            .default(current.port)
            .interact_text()?,
        database: Input::new()
            .with_prompt("Database name")
            .with_initial_text(&current.database)
            .interact_text()?,
        username: Input::new()
            .with_prompt("Database username")
            .with_initial_text(&current.username)
            .interact_text()?,
    };
    settings.save_to(&path)?;

    let password: String = Password::new()
        .with_prompt("Database password (blank to keep current)")
        .allow_empty_password(true)
        .interact()?;
    if !password.is_empty() {
        CredentialStore::new(DB_KEYRING_APP_ID)
            .set(&settings.username, &password)
            .await?;
    }

    print_success("Database settings saved");
    Ok(())
}

pub async fn email() -> Result<()> {
    let path = constants::email_settings_path();
    let current = EmailSettings::load_from(&path);

    let username: String = Input::new()
        .with_prompt("Sender email address")
        .with_initial_text(&current.username)
        .interact_text()?;

    let mut recipients = current.send_alert_to.clone();
    if !recipients.is_empty() {
        println!("Current recipients: {}", recipients.join(", "));
        if Confirm::new()
            .with_prompt("Clear the recipient list?")
            .default(false)
            .interact()?
        {
            recipients.clear();
        }
    }
    loop {
        let address: String = Input::new()
            .with_prompt("Add recipient (blank to finish)")
            .allow_empty(true)
            .interact_text()?;
        if address.is_empty() {
            break;
        }
        recipients.push(address);
    }

    let settings = EmailSettings {
        send_alert_to: recipients,
        username,
    };
    settings.save_to(&path)?;

    let password: String = Password::new()
        .with_prompt("Email password (blank to keep current)")
        .allow_empty_password(true)
        .interact()?;
    if !password.is_empty() {
        CredentialStore::new(MAIL_KEYRING_APP_ID)
            .set(&settings.username, &password)
            .await?;
    }

    print_success("Email settings saved");
    Ok(())
}
