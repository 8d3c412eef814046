//! URI resolution - primary URI first, fallback URI when the primary does not exist yet
//!
//! Some subtrees are created through a parent collection and only later
//! become readable at their own URI. Resolution picks whichever URI
//! currently answers a read and hands back its body as current state.

use crate::client::DeviceClient;
use crate::error::{Error, Result};
use crate::types::ResolutionSource;
use serde_json::{Map, Value};

/// A URI that answered a read
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub uri: String,
    pub source: ResolutionSource,
    /// Body returned by the read
    pub current: Value,
}

/// Result of URI resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(Resolved),
    /// Neither URI answered a successful read
    Unresolved {
        primary_status: u16,
        fallback_status: Option<u16>,
    },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Resolve current state through `primary_uri`, then `fallback_uri`
///
/// A successful read without a body is treated as an empty mapping; a body
/// that is not a mapping is an [`Error::InvalidResponse`]. Transport errors
/// propagate.
pub fn resolve<C: DeviceClient + ?Sized>(
    client: &C,
    primary_uri: &str,
    fallback_uri: Option<&str>,
) -> Result<Resolution> {
    let primary = client.read(primary_uri)?;
    log::debug!("read {primary_uri}: status {}", primary.status);

    if primary.is_read_success() {
        return Ok(Resolution::Resolved(Resolved {
            uri: primary_uri.to_string(),
            source: ResolutionSource::Primary,
            current: current_state(primary_uri, primary.body)?,
        }));
    }

    let Some(fallback_uri) = fallback_uri else {
        return Ok(Resolution::Unresolved {
            primary_status: primary.status,
            fallback_status: None,
        });
    };

    let fallback = client.read(fallback_uri)?;
    log::debug!("read {fallback_uri} (fallback): status {}", fallback.status);

    if fallback.is_read_success() {
        return Ok(Resolution::Resolved(Resolved {
            uri: fallback_uri.to_string(),
            source: ResolutionSource::Fallback,
            current: current_state(fallback_uri, fallback.body)?,
        }));
    }

    Ok(Resolution::Unresolved {
        primary_status: primary.status,
        fallback_status: Some(fallback.status),
    })
}

fn current_state(uri: &str, body: Option<Value>) -> Result<Value> {
    match body {
        None => Ok(Value::Object(Map::new())),
        Some(body @ Value::Object(_)) => Ok(body),
        Some(other) => Err(Error::InvalidResponse {
            uri: uri.to_string(),
            message: format!("expected a JSON object, got {}", truncate(&other.to_string())),
        }),
    }
}

fn truncate(text: &str) -> String {
    const MAX: usize = 120;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let kept: String = text.chars().take(MAX).collect();
        format!("{kept}...")
    }
}
