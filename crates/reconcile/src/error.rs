//! Error types for reconciliation
//!
//! Only faults that prevent the engine from producing a result are errors.
//! Validation problems, unreadable URIs and rejected writes are reported as
//! result outcomes instead.

use thiserror::Error;

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the device client.
#[derive(Debug, Error)]
pub enum Error {
    /// The device could not be reached or the exchange broke off.
    #[error("transport error at {uri}: {message}")]
    Transport {
        /// URI being read or written.
        uri: String,
        /// Error message.
        message: String,
    },

    /// The device answered with a body that could not be interpreted.
    #[error("invalid response from {uri}: {message}")]
    InvalidResponse {
        /// URI being read or written.
        uri: String,
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Create a transport error.
    pub fn transport(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// URI involved in the error.
    pub fn uri(&self) -> &str {
        match self {
            Self::Transport { uri, .. } | Self::InvalidResponse { uri, .. } => uri,
        }
    }
}

/// Problems with a request detected before any device I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    EmptyName,

    #[error("uri must not be blank")]
    EmptyUri,

    #[error("method is required")]
    EmptyMethod,

    #[error("invalid method for {field}: {message}")]
    InvalidMethod {
        field: &'static str,
        message: String,
    },

    #[error("config is required, config must be a mapping (got {found})")]
    ConfigNotMapping { found: &'static str },

    #[error("config must not be an empty mapping")]
    EmptyConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = Error::transport("restconf/data/native", "connection refused");
        let display = err.to_string();
        assert!(display.contains("restconf/data/native"));
        assert!(display.contains("connection refused"));
        assert_eq!(err.uri(), "restconf/data/native");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyUri.to_string(), "uri must not be blank");
        let err = ValidationError::ConfigNotMapping { found: "sequence" };
        assert!(err.to_string().contains("sequence"));
    }
}
