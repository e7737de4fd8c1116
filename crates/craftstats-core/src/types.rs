//! Shared types for craftstats

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted observation of a server's player activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySample {
    /// Instant of observation (client-assigned at write time)
    pub timestamp: DateTime<Utc>,
    /// Players online at observation time
    pub player_count: u32,
    /// Roster at observation time, length equals `player_count`
    pub player_names: Vec<String>,
    /// Monitored server instance
    pub server_name: String,
}

impl ActivitySample {
    /// Build a sample for the current instant from an observed roster
    pub fn observed(server_name: &str, player_names: Vec<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            player_count: player_names.len() as u32,
            player_names,
            server_name: server_name.to_string(),
        }
    }
}

/// Per-tick server state, recomputed from scratch every evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Down,
    /// Up with zero players
    UpIdle,
    /// Up with at least one player
    UpActive,
}

/// Transient view over one server process, recreated each poll tick
#[derive(Debug, Clone, PartialEq)]
pub struct ServerProbe {
    pub name: String,
    pub up: bool,
    pub player_names: Vec<String>,
}

impl ServerProbe {
    pub fn down(name: &str) -> Self {
        Self {
            name: name.to_string(),
            up: false,
            player_names: Vec::new(),
        }
    }

    pub fn up(name: &str, player_names: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            up: true,
            player_names,
        }
    }

    pub fn state(&self) -> ServerState {
        if !self.up {
            ServerState::Down
        } else if self.player_names.is_empty() {
            ServerState::UpIdle
        } else {
            ServerState::UpActive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_sample_counts_roster() {
        let sample = ActivitySample::observed(
            "survival",
            vec!["alex".to_string(), "steve".to_string()],
        );
        assert_eq!(sample.player_count, 2);
        assert_eq!(sample.player_names.len(), 2);
        assert_eq!(sample.server_name, "survival");
    }

    #[test]
    fn test_observed_sample_empty_roster() {
        let sample = ActivitySample::observed("creative", vec![]);
        assert_eq!(sample.player_count, 0);
        assert!(sample.player_names.is_empty());
    }

    #[test]
    fn test_probe_states() {
        assert_eq!(ServerProbe::down("a").state(), ServerState::Down);
        assert_eq!(ServerProbe::up("a", vec![]).state(), ServerState::UpIdle);
        assert_eq!(
            ServerProbe::up("a", vec!["steve".to_string()]).state(),
            ServerState::UpActive
        );
    }
}
