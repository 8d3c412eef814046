//! Blocking RESTCONF client.
//!
//! Every request carries `application/yang-data+json` in `Accept` and
//! `Content-Type`. Error statuses are returned to the caller as data; only
//! failures that prevent a status from being received become errors.

use crate::config::DeviceConfig;
use crate::error::Result;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reconcile::{DeviceClient, Method, Response};
use serde_json::Value;
use std::time::Duration;
use ureq::tls::TlsConfig;

/// Media type for YANG-modeled JSON documents.
pub const YANG_JSON: &str = "application/yang-data+json";

/// RESTCONF client bound to one device.
///
/// # Example
///
/// ```no_run
/// use restconf::{DeviceConfig, RestconfClient};
///
/// let config = DeviceConfig::new("192.0.2.1");
/// let client = RestconfClient::new(config).unwrap();
/// let response = client.get("restconf/data/Cisco-IOS-XE-native:native/hostname").unwrap();
/// println!("{} {:?}", response.status, response.body);
/// ```
pub struct RestconfClient {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// Connection settings.
    config: DeviceConfig,
    /// Precomputed `Authorization` header value.
    authorization: Option<String>,
}

impl RestconfClient {
    /// Create a client from validated settings.
    pub fn new(config: DeviceConfig) -> Result<Self> {
        config.validate()?;

        let tls = TlsConfig::builder()
            .disable_verification(!config.verify_tls)
            .build();
        let agent_config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .tls_config(tls)
            .build();
        let agent = ureq::Agent::new_with_config(agent_config);

        if !config.verify_tls {
            log::warn!("TLS verification disabled for {}", config.host);
        }

        let authorization = config.username.as_ref().map(|user| {
            let password = config.password.as_deref().unwrap_or_default();
            basic_auth(user, password)
        });

        Ok(Self {
            agent,
            config,
            authorization,
        })
    }

    /// Connection settings in use.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Read the resource at `uri`.
    pub fn get(&self, uri: &str) -> Result<Response> {
        let url = self.config.url_for(uri);
        log::debug!("GET {url}");

        let response = self.headers(self.agent.get(&url)).call()?;
        read_response(response)
    }

    /// Send `body` to `uri` with `method`.
    ///
    /// GET and DELETE are sent without a body.
    pub fn send(&self, uri: &str, method: Method, body: &Value) -> Result<Response> {
        let url = self.config.url_for(uri);
        log::debug!("{method} {url}");

        let payload = serde_json::to_vec(body)?;
        let response = match method {
            Method::Get => self.headers(self.agent.get(&url)).call()?,
            Method::Delete => self.headers(self.agent.delete(&url)).call()?,
            Method::Put => self.headers(self.agent.put(&url)).send(&payload[..])?,
            Method::Post => self.headers(self.agent.post(&url)).send(&payload[..])?,
            Method::Patch => self.headers(self.agent.patch(&url)).send(&payload[..])?,
        };
        read_response(response)
    }

    fn headers<B>(&self, request: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        let request = request
            .header("Accept", YANG_JSON)
            .header("Content-Type", YANG_JSON);
        match &self.authorization {
            Some(auth) => request.header("Authorization", auth),
            None => request,
        }
    }
}

impl DeviceClient for RestconfClient {
    fn read(&self, uri: &str) -> reconcile::Result<Response> {
        self.get(uri).map_err(|err| err.into_transport(uri))
    }

    fn write(&self, uri: &str, method: Method, body: &Value) -> reconcile::Result<Response> {
        self.send(uri, method, body)
            .map_err(|err| err.into_transport(uri))
    }
}

/// Build an HTTP basic auth header value.
fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

fn read_response(mut response: ureq::http::Response<ureq::Body>) -> Result<Response> {
    let status = response.status().as_u16();
    let text = response.body_mut().read_to_string()?;
    log::debug!("status {status}, {} byte body", text.len());
    Ok(Response::new(status, parse_body(&text)))
}

/// Parse a response body.
///
/// Empty bodies are absent. A body that is not JSON (HTML error pages,
/// plain text) is kept as a string for diagnostics.
pub(crate) fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("response body is not JSON: {err}");
            Some(Value::String(text.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_basic_auth() {
        assert_eq!(basic_auth("admin", "admin"), "Basic YWRtaW46YWRtaW4=");
        assert_eq!(basic_auth("user", ""), "Basic dXNlcjo=");
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("  \n"), None);
        assert_eq!(
            parse_body(r#"{"ietf-interfaces:interface": {"name": "Gi1"}}"#),
            Some(json!({"ietf-interfaces:interface": {"name": "Gi1"}}))
        );
        assert_eq!(
            parse_body("<html>Bad Gateway</html>"),
            Some(json!("<html>Bad Gateway</html>"))
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = RestconfClient::new(DeviceConfig::default());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_new_precomputes_authorization() {
        let config = DeviceConfig {
            username: Some("admin".to_string()),
            password: Some("admin".to_string()),
            ..DeviceConfig::new("192.0.2.1")
        };
        let client = RestconfClient::new(config).unwrap();
        assert_eq!(
            client.authorization.as_deref(),
            Some("Basic YWRtaW46YWRtaW4=")
        );
        assert_eq!(client.config().host, "192.0.2.1");
    }
}
