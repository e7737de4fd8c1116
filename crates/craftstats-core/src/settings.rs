//! Settings value objects persisted as flat JSON key-value files
//!
//! Each settings kind is loaded once at startup and threaded through
//! constructors; nothing here is global state. Keys serialize in sorted
//! order so saved files diff cleanly. Passwords never appear in these
//! files; they live in the OS keyring.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error};

/// Database connection settings (`settings.json`)
///
/// Fields are declared in key order so serde emits sorted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbSettings {
    #[serde(rename = "DATABASE", default)]
    pub database: String,

    #[serde(rename = "IP_ADDRESS", default)]
    pub ip_address: String,

    #[serde(rename = "PORT", default = "default_db_port")]
    pub port: u16,

    #[serde(rename = "USERNAME", default)]
    pub username: String,
}

fn default_db_port() -> u16 {
    5432
}

impl Default for DbSettings {
    fn default() -> Self {
        Self {
            database: String::new(),
            ip_address: String::new(),
            port: default_db_port(),
            username: String::new(),
        }
    }
}

/// Report mail settings (`email_settings.json`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(rename = "SEND_ALERT_TO", default)]
    pub send_alert_to: Vec<String>,

    #[serde(rename = "USERNAME", default)]
    pub username: String,
}

impl DbSettings {
    /// Load from `path`, falling back to defaults. Never fails: a corrupt
    /// file is deleted and logged, a missing file is simply defaults.
    pub fn load_from(path: &Path) -> Self {
        load_or_default(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        save(self, path)
    }
}

impl EmailSettings {
    /// Load from `path`, falling back to defaults (see [`DbSettings::load_from`])
    pub fn load_from(path: &Path) -> Self {
        load_or_default(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        save(self, path)
    }
}

fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    if !path.exists() {
        debug!("Settings file {:?} not found, using defaults", path);
        return T::default();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str::<T>(&content).map_err(|e| e.to_string()));

    match parsed {
        Ok(settings) => {
            debug!("Settings loaded from {:?}", path);
            settings
        }
        Err(e) => {
            error!(
                "Settings file {:?} has been corrupted, reverting to defaults: {}",
                path, e
            );
            if let Err(e) = std::fs::remove_file(path) {
                error!("Failed to remove corrupt settings file {:?}: {}", path, e);
            }
            T::default()
        }
    }
}

fn save<T: Serialize>(settings: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    debug!("Settings saved to {:?}", path);
    Ok(())
}
