//! Constants and default values for craftstats

use std::path::PathBuf;

/// Database settings file name (flat JSON, sorted keys)
pub const DB_SETTINGS_FILE: &str = "settings.json";

/// Email settings file name (flat JSON, sorted keys)
pub const EMAIL_SETTINGS_FILE: &str = "email_settings.json";

/// Log file written when not running verbose
pub const LOG_FILE: &str = "craftstats.log";

/// Keyring application id for the database password
pub const DB_KEYRING_APP_ID: &str = "craftstats";

/// Keyring application id for the email password
pub const MAIL_KEYRING_APP_ID: &str = "craftstats-mail";

/// Default MineOS base directory
pub const DEFAULT_BASE_DIRECTORY: &str = "/var/games/minecraft";

/// Default seconds between poll ticks
pub const DEFAULT_POLL_DELAY_SECS: u64 = 60;

/// Default trailing report window in days
pub const DEFAULT_REPORT_WINDOW_DAYS: u32 = 7;

/// SMTP relay used for report mail
pub const SMTP_RELAY: &str = "smtp.gmail.com";

/// SMTP relay port (STARTTLS)
pub const SMTP_PORT: u16 = 587;

/// Bound on any single network call (DB connect, server ping)
pub const NETWORK_TIMEOUT_SECS: u64 = 10;

/// Get the database settings path (working directory)
pub fn db_settings_path() -> PathBuf {
    PathBuf::from(DB_SETTINGS_FILE)
}

/// Get the email settings path (working directory)
pub fn email_settings_path() -> PathBuf {
    PathBuf::from(EMAIL_SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_paths() {
        assert!(db_settings_path().to_string_lossy().contains("settings.json"));
        assert!(email_settings_path()
            .to_string_lossy()
            .contains("email_settings.json"));
    }
}
