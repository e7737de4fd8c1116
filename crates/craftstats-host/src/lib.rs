//! MineOS host gateway
//!
//! Thin view over servers hosted in a MineOS base directory. Servers live in
//! `<base>/servers/<name>`; up/down comes from a process scan and the player
//! roster from a status ping against the port in server.properties.

pub mod ping;
pub mod process;
pub mod properties;

use async_trait::async_trait;
use craftstats_core::{Error, Result, ServerProbe};
use properties::ServerProperties;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Seam between the poller and the hosting environment
#[async_trait]
pub trait ServerHost: Send + Sync {
    /// Names of all hosted servers, sorted
    fn list_servers(&self) -> Result<Vec<String>>;

    /// One tick's observation of a single server
    async fn probe(&self, name: &str) -> Result<ServerProbe>;
}

/// Host gateway over a MineOS base directory
#[derive(Debug, Clone)]
pub struct MineosHost {
    base_directory: PathBuf,
}

impl MineosHost {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    fn server_dir(&self, name: &str) -> PathBuf {
        self.base_directory.join("servers").join(name)
    }
}

#[async_trait]
impl ServerHost for MineosHost {
    fn list_servers(&self) -> Result<Vec<String>> {
        let servers_dir = self.base_directory.join("servers");
        if !servers_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&servers_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn probe(&self, name: &str) -> Result<ServerProbe> {
        let dir = self.server_dir(name);
        if !dir.is_dir() {
            return Err(Error::ServerNotFound(name.to_string()));
        }

        if !process::server_process_running(&dir) {
            debug!("Server {} is down", name);
            return Ok(ServerProbe::down(name));
        }

        let props = ServerProperties::load(&dir.join("server.properties"));
        match ping::ping(&props.ping_host(), props.server_port()).await {
            Ok(status) => {
                debug!(
                    "Server {} is up with {} player(s)",
                    name, status.players_online
                );
                Ok(ServerProbe::up(name, status.player_names))
            }
            Err(e) => {
                // Process alive but not answering the status port yet;
                // treat as up with nobody on rather than failing the tick
                warn!("Status ping for {} failed: {}", name, e);
                Ok(ServerProbe::up(name, Vec::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_list_servers_sorted() {
        let base = tempdir().unwrap();
        let servers = base.path().join("servers");
        std::fs::create_dir_all(servers.join("survival")).unwrap();
        std::fs::create_dir_all(servers.join("creative")).unwrap();
        // Stray file must not show up as a server
        std::fs::write(servers.join("notes.txt"), "x").unwrap();

        let host = MineosHost::new(base.path());
        assert_eq!(
            host.list_servers().unwrap(),
            vec!["creative".to_string(), "survival".to_string()]
        );
    }

    #[test]
    fn test_list_servers_missing_base() {
        let base = tempdir().unwrap();
        let host = MineosHost::new(base.path().join("nope"));
        assert!(host.list_servers().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_probe_unknown_server() {
        let base = tempdir().unwrap();
        let host = MineosHost::new(base.path());
        let result = host.probe("ghost").await;
        assert!(matches!(result, Err(Error::ServerNotFound(_))));
    }

    #[tokio::test]
    async fn test_probe_down_server() {
        let base = tempdir().unwrap();
        std::fs::create_dir_all(base.path().join("servers").join("survival")).unwrap();

        let host = MineosHost::new(base.path());
        let probe = host.probe("survival").await.unwrap();
        assert!(!probe.up);
        assert!(probe.player_names.is_empty());
    }
}
