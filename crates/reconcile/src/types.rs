//! Core types for configuration reconciliation

use crate::report::ReconcileResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default method used when writing through the fallback URI
pub const DEFAULT_FALLBACK_METHOD: &str = "PATCH";

/// HTTP method used to write configuration to a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Post,
    Patch,
    Delete,
}

impl Method {
    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether this method merges into existing data instead of replacing it
    pub fn is_merge(&self) -> bool {
        matches!(self, Self::Patch)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!(
                "unsupported method '{other}', expected one of GET, PUT, POST, PATCH, DELETE"
            )),
        }
    }
}

/// A single desired-state declaration for one device subtree
///
/// Fields stay loosely typed so that malformed declarations can be
/// reported as a failed result instead of being rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// Name of this declaration, used in reports
    pub name: String,
    /// URI to read current config from and write desired config to
    #[serde(alias = "uri")]
    pub primary_uri: String,
    /// Method used when writing through the primary URI
    pub method: String,
    /// Desired configuration, must be a non-empty mapping
    #[serde(alias = "config")]
    pub desired_config: Value,
    /// Alternative URI used when the primary URI does not exist yet
    #[serde(default, alias = "init_uri")]
    pub fallback_uri: Option<String>,
    /// Method used when writing through the fallback URI
    #[serde(default = "default_fallback_method", alias = "init_method")]
    pub fallback_method: String,
}

fn default_fallback_method() -> String {
    DEFAULT_FALLBACK_METHOD.to_string()
}

impl ReconcileRequest {
    /// Create a request with no fallback URI
    pub fn new(
        name: impl Into<String>,
        primary_uri: impl Into<String>,
        method: impl Into<String>,
        desired_config: Value,
    ) -> Self {
        Self {
            name: name.into(),
            primary_uri: primary_uri.into(),
            method: method.into(),
            desired_config,
            fallback_uri: None,
            fallback_method: default_fallback_method(),
        }
    }

    /// Set the fallback URI and the method used to write through it
    pub fn with_fallback(mut self, uri: impl Into<String>, method: impl Into<String>) -> Self {
        self.fallback_uri = Some(uri.into());
        self.fallback_method = method.into();
        self
    }
}

/// Which URI was used to obtain current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Primary,
    Fallback,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of reconciling one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Device already holds the desired config
    AlreadyMatching,
    /// Dry run, changes were computed but not applied
    DryRunPending,
    /// Desired config was written to the device
    Applied,
    /// Validation or write failed
    Failed,
    /// Neither primary nor fallback URI could be read
    UriUnresolved,
}

impl Outcome {
    /// Tri-state success: `Some(true)` when the device matches desired state,
    /// `None` when changes are pending, `Some(false)` on failure
    pub fn is_success(&self) -> Option<bool> {
        match self {
            Self::AlreadyMatching | Self::Applied => Some(true),
            Self::DryRunPending => None,
            Self::Failed | Self::UriUnresolved => Some(false),
        }
    }

    /// Whether the outcome represents a change (made or pending)
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Applied | Self::DryRunPending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyMatching => "already-matching",
            Self::DryRunPending => "dry-run-pending",
            Self::Applied => "applied",
            Self::Failed => "failed",
            Self::UriUnresolved => "uri-unresolved",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary of a run over many requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub already_matching: usize,
    pub pending: usize,
    pub applied: usize,
    pub failed: usize,
    pub unresolved: usize,
}

impl RunSummary {
    /// Number of changes made or pending
    pub fn total_changes(&self) -> usize {
        self.applied + self.pending
    }

    /// Check if no request failed or went unresolved
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.unresolved == 0
    }

    /// Total number of requests processed
    pub fn total(&self) -> usize {
        self.already_matching + self.pending + self.applied + self.failed + self.unresolved
    }

    /// Merge another summary into this one
    pub fn merge(&mut self, other: &RunSummary) {
        self.already_matching += other.already_matching;
        self.pending += other.pending;
        self.applied += other.applied;
        self.failed += other.failed;
        self.unresolved += other.unresolved;
    }

    /// Count one result by its outcome
    pub fn add_result(&mut self, result: &ReconcileResult) {
        match result.outcome {
            Outcome::AlreadyMatching => self.already_matching += 1,
            Outcome::DryRunPending => self.pending += 1,
            Outcome::Applied => self.applied += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::UriUnresolved => self.unresolved += 1,
        }
    }
}
