//! Error types for the scout tool host.

/// Top-level error type for the tool host.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),

    /// Malformed or unsupported command envelope.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Tool argument validation or execution error.
    #[error("tool error: {0}")]
    Tool(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_variant() {
        assert_eq!(
            ScoutError::Tool("missing required argument: keyword".into()).to_string(),
            "tool error: missing required argument: keyword"
        );
        assert_eq!(
            ScoutError::Protocol("bad envelope".into()).to_string(),
            "protocol error: bad envelope"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScoutError = io.into();
        assert!(matches!(err, ScoutError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
