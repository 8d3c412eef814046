//! # Reconcile
//!
//! Declarative reconciliation of RESTCONF device configuration.
//!
//! Given a desired configuration fragment and a target URI, the engine reads
//! what the device currently holds, decides whether anything has to change,
//! applies the change when needed and reports a structured diff.
//!
//! ## Core Concepts
//!
//! - **ReconcileRequest**: desired config for one subtree, its URI and write method
//! - **DeviceClient**: blocking read/write access to a device, supplied by the caller
//! - **Resolution**: which URI (primary or fallback) answered the initial read
//! - **StructuralDiff**: added/removed/changed paths between current and desired
//! - **ReconcileResult**: outcome, reported changes and a human-readable message
//!
//! ## Example
//!
//! ```ignore
//! use reconcile::{reconcile, ReconcileRequest, Outcome};
//! use serde_json::json;
//!
//! let request = ReconcileRequest::new(
//!     "uplink-description",
//!     "restconf/data/Cisco-IOS-XE-native:native/interface/GigabitEthernet=1%2F0%2F3",
//!     "PATCH",
//!     json!({"Cisco-IOS-XE-native:GigabitEthernet": {"description": "uplink"}}),
//! );
//!
//! let result = reconcile(&request, &client, /* dry_run */ false)?;
//! if result.outcome == Outcome::Applied {
//!     println!("{:?}", result.changes.changed);
//! }
//! ```
//!
//! The engine holds no state between calls. Concurrent writers to the same
//! URI are not coordinated; callers serialize them if needed.

pub mod client;
pub mod diff;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod resolve;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types at crate root
pub use client::{DeviceClient, NoProgress, ProgressCallback, Response, READ_SUCCESS, WRITE_SUCCESS};
pub use diff::{deep_equal, diff, PathMap, StructuralDiff, ValueChange, ROOT_PATH};
pub use error::{Error, Result, ValidationError};
pub use orchestrator::{config_manage, reconcile, reconcile_all, validate, ValidRequest};
pub use report::{build_result, Changes, ReconcileResult};
pub use resolve::{resolve, Resolution, Resolved};
pub use types::{
    Method, Outcome, ReconcileRequest, ResolutionSource, RunSummary, DEFAULT_FALLBACK_METHOD,
};
