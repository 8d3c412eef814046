//! Error types for RESTCONF client operations.
//!
//! Errors are categorized so the caller can tell transient network trouble
//! apart from bad credentials or a misconfigured device profile.

use std::fmt;

/// Result type alias for RESTCONF client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of client errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network-related errors (transient, retryable).
    Network,
    /// TLS handshake or certificate problems.
    Tls,
    /// Device profile is incomplete or invalid.
    Config,
    /// Body could not be encoded or decoded.
    Format,
}

impl ErrorCategory {
    /// Whether this error category is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network)
    }

    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "Network connectivity issue",
            Self::Tls => "TLS negotiation failed",
            Self::Config => "Invalid device configuration",
            Self::Format => "Invalid document format",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Network => "Check that the device is reachable and RESTCONF is enabled",
            Self::Tls => "Check the device certificate, or pass --insecure for lab devices",
            Self::Config => "Check the [device] section of the state file",
            Self::Format => "Check that the payload is valid JSON",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur talking to a RESTCONF device.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP exchange failed before a status was received.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// TLS failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Device profile problem.
    #[error("invalid device config: {0}")]
    InvalidConfig(String),

    /// Body encoding/decoding problem.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an HTTP error.
    pub fn http(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status,
        }
    }

    /// Get the error category.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Http { .. } => ErrorCategory::Network,
            Error::Tls(_) => ErrorCategory::Tls,
            Error::InvalidConfig(_) => ErrorCategory::Config,
            Error::Json(_) => ErrorCategory::Format,
        }
    }

    /// Whether this error is typically transient and worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Convert into the engine's transport error for `uri`.
    ///
    /// Transient failures are logged so a re-run can be suggested; the engine
    /// itself never retries.
    pub fn into_transport(self, uri: &str) -> reconcile::Error {
        if self.is_retryable() {
            log::info!("{uri}: {}, a later run may succeed", self.category());
        }
        reconcile::Error::transport(uri, format!("{self} ({})", self.category().advice()))
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::http(format!("HTTP {code}"), Some(code)),
            ureq::Error::Tls(message) => Self::Tls(message.to_string()),
            other => Self::http(other.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(!ErrorCategory::Tls.is_retryable());
        assert!(!ErrorCategory::Config.is_retryable());
        assert!(!ErrorCategory::Format.is_retryable());
    }

    #[test]
    fn test_error_category_advice() {
        assert!(!ErrorCategory::Network.advice().is_empty());
        assert!(ErrorCategory::Tls.advice().contains("--insecure"));
    }

    #[test]
    fn test_error_http_constructor() {
        let err = Error::http("connection reset", Some(502));
        match err {
            Error::Http { message, status } => {
                assert_eq!(message, "connection reset");
                assert_eq!(status, Some(502));
            }
            _ => panic!("Expected Error::Http"),
        }
    }

    #[test]
    fn test_invalid_config_category() {
        let err = Error::InvalidConfig("host is required".to_string());
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("host is required"));
    }

    #[test]
    fn test_from_ureq_status_code() {
        let err = Error::from(ureq::Error::StatusCode(503));
        assert!(matches!(err, Error::Http { status: Some(503), .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_into_transport_keeps_uri_and_advice() {
        let err = Error::http("connection refused", None).into_transport("restconf/data/native");
        let display = err.to_string();
        assert!(display.contains("restconf/data/native"));
        assert!(display.contains("connection refused"));
        assert!(display.contains("reachable"));
    }
}
