//! Device connection settings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// URL scheme used to reach the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Plain HTTP (lab devices only).
    Http,
    /// HTTPS.
    #[default]
    Https,
}

impl Transport {
    /// URL scheme.
    #[must_use]
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Connection settings for one RESTCONF device.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Hostname or address, optionally with `:port`.
    #[serde(default)]
    pub host: String,
    /// URL scheme.
    #[serde(default)]
    pub transport: Transport,
    /// Basic auth username; no auth header is sent when absent.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Verify the device certificate.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Prefix for URIs that do not already start with `restconf/`, e.g. `restconf/data`.
    #[serde(default)]
    pub root: Option<String>,
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("host", &self.host)
            .field("transport", &self.transport)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("verify_tls", &self.verify_tls)
            .field("timeout_secs", &self.timeout_secs)
            .field("root", &self.root)
            .finish()
    }
}

impl DeviceConfig {
    /// Create settings for `host` with defaults for everything else.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            transport: Transport::Https,
            username: None,
            password: None,
            verify_tls: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            root: None,
        }
    }

    /// Check that the settings can be used to build a client.
    pub fn validate(&self) -> Result<()> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(Error::InvalidConfig("host is required".to_string()));
        }
        if host.contains("://") {
            return Err(Error::InvalidConfig(format!(
                "host must not include a scheme, set transport instead: {host}"
            )));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(Error::InvalidConfig(
                "password given without a username".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL of the device, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}",
            self.transport.scheme(),
            self.host.trim().trim_end_matches('/')
        )
    }

    /// Full URL for a RESTCONF resource.
    ///
    /// Absolute `http(s)://` URIs pass through unchanged. Otherwise leading
    /// slashes are dropped and `root` is prefixed unless the URI already
    /// starts with `restconf/`.
    #[must_use]
    pub fn url_for(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            return uri.to_string();
        }

        let path = uri.trim_start_matches('/');
        match self.root.as_deref().map(|r| r.trim_matches('/')) {
            Some(root) if !root.is_empty() && !path.starts_with("restconf/") => {
                format!("{}/{root}/{path}", self.base_url())
            }
            _ => format!("{}/{path}", self.base_url()),
        }
    }
}
