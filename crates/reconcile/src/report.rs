//! Reconciliation results and change reporting

use crate::diff::{PathMap, StructuralDiff, ValueChange};
use crate::types::{Method, Outcome, ResolutionSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reported changes; an empty view is reported as absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Changes {
    pub added: Option<PathMap>,
    pub removed: Option<PathMap>,
    pub changed: Option<BTreeMap<String, ValueChange>>,
}

impl Changes {
    /// Build the reported views from a diff
    pub fn from_diff(diff: StructuralDiff) -> Self {
        let (added, removed, changed) = diff.into_parts();
        Self {
            added: non_empty(added),
            removed: non_empty(removed),
            changed: non_empty(changed),
        }
    }

    /// Check if no view holds anything
    pub fn is_empty(&self) -> bool {
        self.added.is_none() && self.removed.is_none() && self.changed.is_none()
    }
}

fn non_empty<V>(map: BTreeMap<String, V>) -> Option<BTreeMap<String, V>> {
    if map.is_empty() { None } else { Some(map) }
}

/// Result of reconciling one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileResult {
    pub name: String,
    pub outcome: Outcome,
    pub changes: Changes,
    /// Human-readable explanation, never empty
    pub message: String,
    /// URI used for current state and the write, when one was resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ResolutionSource>,
}

impl ReconcileResult {
    /// Record which URI resolution picked
    pub fn with_resolution(mut self, uri: impl Into<String>, source: ResolutionSource) -> Self {
        self.uri = Some(uri.into());
        self.source = Some(source);
        self
    }

    /// Tri-state success, see [`Outcome::is_success`]
    pub fn is_success(&self) -> Option<bool> {
        self.outcome.is_success()
    }
}

/// Assemble a result from an outcome and an optional diff
///
/// `method` is the request's declared method. When it is PATCH an applied
/// result never reports removals, even if the write went through a fallback
/// URI with another method: PATCH merges into existing data and cannot
/// delete fields that are absent from the payload.
pub fn build_result(
    name: &str,
    outcome: Outcome,
    diff: Option<StructuralDiff>,
    method: Option<Method>,
    message: impl Into<String>,
) -> ReconcileResult {
    let mut changes = diff.map(Changes::from_diff).unwrap_or_default();

    if outcome == Outcome::Applied && method.is_some_and(|m| m.is_merge()) {
        changes.removed = None;
    }

    ReconcileResult {
        name: name.to_string(),
        outcome,
        changes,
        message: message.into(),
        uri: None,
        source: None,
    }
}
