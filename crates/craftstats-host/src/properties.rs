//! server.properties parsing
//!
//! Minimal key=value reader for the two keys the poller needs: the status
//! port and the bind address.

use std::collections::HashMap;
use std::path::Path;

/// Default Minecraft server port
pub const DEFAULT_SERVER_PORT: u16 = 25565;

/// Parsed server.properties key-value pairs
#[derive(Debug, Clone, Default)]
pub struct ServerProperties {
    values: HashMap<String, String>,
}

impl ServerProperties {
    /// Parse properties text; `#` lines are comments, malformed lines skipped
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { values }
    }

    /// Load from disk; a missing or unreadable file yields defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// server-port, falling back to the Minecraft default
    pub fn server_port(&self) -> u16 {
        self.get("server-port")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Address the status ping should target; an unset server-ip means the
    /// server binds all interfaces, so loopback works
    pub fn ping_host(&self) -> String {
        match self.get("server-ip") {
            Some(ip) if !ip.is_empty() => ip.to_string(),
            _ => "127.0.0.1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_properties() {
        let props = ServerProperties::parse(
            "#Minecraft server properties\n\
             #Thu Jan 01 00:00:00 UTC 2026\n\
             server-port=25566\n\
             server-ip=\n\
             motd=A Minecraft Server\n",
        );
        assert_eq!(props.server_port(), 25566);
        assert_eq!(props.ping_host(), "127.0.0.1");
        assert_eq!(props.get("motd"), Some("A Minecraft Server"));
    }

    #[test]
    fn test_defaults_when_keys_missing() {
        let props = ServerProperties::parse("");
        assert_eq!(props.server_port(), DEFAULT_SERVER_PORT);
        assert_eq!(props.ping_host(), "127.0.0.1");
    }

    #[test]
    fn test_explicit_server_ip() {
        let props = ServerProperties::parse("server-ip=10.0.0.9\nserver-port=25565\n");
        assert_eq!(props.ping_host(), "10.0.0.9");
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let props = ServerProperties::parse("no-equals-sign\nserver-port=abc\n");
        assert_eq!(props.get("no-equals-sign"), None);
        // Unparsable port falls back to default
        assert_eq!(props.server_port(), DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let props = ServerProperties::load(std::path::Path::new("/nonexistent/server.properties"));
        assert_eq!(props.server_port(), DEFAULT_SERVER_PORT);
    }
}
