//! # restconf
//!
//! Blocking RESTCONF client for network devices.
//!
//! This crate provides:
//! - Device connection settings with TOML/JSON deserialization
//! - A [`RestconfClient`] speaking `application/yang-data+json` over HTTP(S)
//! - A [`reconcile::DeviceClient`] implementation so the client can drive
//!   configuration reconciliation
//!
//! ## Example
//!
//! ```no_run
//! use restconf::{DeviceConfig, RestconfClient};
//! use serde_json::json;
//!
//! let config = DeviceConfig {
//!     username: Some("admin".into()),
//!     password: Some("admin".into()),
//!     root: Some("restconf/data".into()),
//!     ..DeviceConfig::new("192.0.2.1")
//! };
//! let client = RestconfClient::new(config).expect("valid device config");
//!
//! let result = reconcile::config_manage(
//!     &client,
//!     "hostname",
//!     "Cisco-IOS-XE-native:native/hostname",
//!     "PATCH",
//!     json!({"Cisco-IOS-XE-native:hostname": "sw1"}),
//!     None,
//!     None,
//!     false,
//! )
//! .expect("device reachable");
//! println!("{}: {}", result.outcome, result.message);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod error;

pub use client::{RestconfClient, YANG_JSON};
pub use config::{DeviceConfig, Transport, DEFAULT_TIMEOUT_SECS};
pub use error::{Error, ErrorCategory, Result};
