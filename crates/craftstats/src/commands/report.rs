//! Report command implementation

use anyhow::Result;
use chrono::Utc;
use craftstats_core::constants::{self, MAIL_KEYRING_APP_ID};
use craftstats_core::EmailSettings;
use craftstats_credentials::CredentialStore;
use craftstats_mail::Mailer;
use std::time::Duration;

use crate::monitor::sleep_or_interrupt;
use crate::output::{print_error, print_success};

pub async fn execute(once: bool, days: u32, delay: Duration) -> Result<()> {
    let settings = EmailSettings::load_from(&constants::email_settings_path());
    let store = CredentialStore::new(MAIL_KEYRING_APP_ID);
    let password = store.get(&settings.username).await?.unwrap_or_default();

    let log = super::open_activity_log().await?;

    let mailer = Mailer::new(&settings, &password)?;
    if mailer.test_login().await.is_err() {
        print_error("Username password mismatch");
        std::process::exit(1);
    }

    if !once {
        println!("Press Ctrl-C to quit");
    }
    loop {
        let samples = log.query_recent(days).await?;
        let report = craftstats_report::compose(&samples, days, Utc::now());
        mailer.send(&report.subject(), &report.body()).await?;
        print_success(&format!(
            "Report sent ({} minute(s) across {} server(s))",
            report.total_minutes,
            report.minutes_by_server.len()
        ));

        if once {
            return Ok(());
        }
        if !sleep_or_interrupt(delay).await {
            println!("Bye Bye.");
            return Ok(());
        }
    }
}
