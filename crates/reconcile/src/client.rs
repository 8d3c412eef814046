//! Device client trait
//!
//! The engine never talks to a device directly. Callers hand it an
//! implementation of [`DeviceClient`], which owns transport, authentication
//! and timeouts.

use crate::error::Result;
use crate::types::Method;
use serde_json::Value;

/// Status codes that count as a successful read.
pub const READ_SUCCESS: &[u16] = &[200];

/// Status codes that count as a successful write.
pub const WRITE_SUCCESS: &[u16] = &[200, 201, 204];

/// Status and optional parsed body returned by the device
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Transport/application status code
    pub status: u16,
    /// Response body, when the device returned one
    pub body: Option<Value>,
}

impl Response {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Response with a status and no body
    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Check if this is a successful read
    pub fn is_read_success(&self) -> bool {
        READ_SUCCESS.contains(&self.status)
    }

    /// Check if this is a successful write
    pub fn is_write_success(&self) -> bool {
        WRITE_SUCCESS.contains(&self.status)
    }

    /// Render the body for diagnostics
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(|body| match body {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

/// Blocking access to a RESTCONF device
pub trait DeviceClient {
    /// Read the configuration at `uri`
    fn read(&self, uri: &str) -> Result<Response>;

    /// Write `body` to `uri` using `method`
    fn write(&self, uri: &str, method: Method, body: &Value) -> Result<Response>;
}

impl<T: DeviceClient + ?Sized> DeviceClient for &T {
    fn read(&self, uri: &str) -> Result<Response> {
        (**self).read(uri)
    }

    fn write(&self, uri: &str, method: Method, body: &Value) -> Result<Response> {
        (**self).write(uri, method, body)
    }
}

impl<T: DeviceClient + ?Sized> DeviceClient for Box<T> {
    fn read(&self, uri: &str) -> Result<Response> {
        (**self).read(uri)
    }

    fn write(&self, uri: &str, method: Method, body: &Value) -> Result<Response> {
        (**self).write(uri, method, body)
    }
}

/// Progress callback for runs over many requests
pub trait ProgressCallback {
    /// Called before a request is reconciled
    fn on_start(&mut self, name: &str);

    /// Called once a request has a result
    fn on_complete(&mut self, result: &crate::report::ReconcileResult);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_start(&mut self, _name: &str) {}
    fn on_complete(&mut self, _result: &crate::report::ReconcileResult) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_statuses() {
        assert!(Response::status(200).is_read_success());
        assert!(!Response::status(204).is_read_success());
        assert!(!Response::status(404).is_read_success());

        for status in [200, 201, 204] {
            assert!(Response::status(status).is_write_success());
        }
        assert!(!Response::status(202).is_write_success());
        assert!(!Response::status(500).is_write_success());
    }

    #[test]
    fn test_body_text() {
        assert_eq!(Response::status(500).body_text(), None);
        let raw = Response::new(502, Some(json!("<html>bad gateway</html>")));
        assert_eq!(raw.body_text().as_deref(), Some("<html>bad gateway</html>"));
        let parsed = Response::new(500, Some(json!({"error": "bad"})));
        assert_eq!(parsed.body_text().as_deref(), Some(r#"{"error":"bad"}"#));
    }
}
