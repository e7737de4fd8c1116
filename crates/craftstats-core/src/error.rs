//! Error types for craftstats

/// craftstats error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database query failed: {0}")]
    Query(String),

    #[error("Credential store error: {0}")]
    Credential(String),

    #[error("SMTP authentication failed: {0}")]
    SmtpAuth(String),

    #[error("SMTP send failed: {0}")]
    SmtpSend(String),

    #[error("Invalid mail address: {0}")]
    Address(String),

    #[error("Server not found: {0}")]
    ServerNotFound(String),

    #[error("Server ping failed: {0}")]
    Ping(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for craftstats
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Error::Connection(msg.into())
    }

    pub fn query<S: Into<String>>(msg: S) -> Self {
        Error::Query(msg.into())
    }

    pub fn credential<S: Into<String>>(msg: S) -> Self {
        Error::Credential(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ServerNotFound("survival".to_string());
        assert_eq!(err.to_string(), "Server not found: survival");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(Error::connection("x"), Error::Connection(_)));
        assert!(matches!(Error::query("x"), Error::Query(_)));
        assert!(matches!(Error::credential("x"), Error::Credential(_)));
    }
}
