//! Reconciliation orchestrator - validate, resolve, compare, apply

use crate::client::{DeviceClient, ProgressCallback};
use crate::diff::{deep_equal, diff};
use crate::error::{Result, ValidationError};
use crate::report::{build_result, ReconcileResult};
use crate::resolve::{resolve, Resolution};
use crate::types::{
    Method, Outcome, ReconcileRequest, ResolutionSource, RunSummary, DEFAULT_FALLBACK_METHOD,
};
use serde_json::Value;

/// A request that passed validation
#[derive(Debug, Clone, Copy)]
pub struct ValidRequest<'a> {
    pub name: &'a str,
    pub primary_uri: &'a str,
    pub method: Method,
    pub desired: &'a Value,
    pub fallback_uri: Option<&'a str>,
    pub fallback_method: Method,
}

/// Check a request without touching the device
///
/// A blank fallback URI is treated as no fallback.
pub fn validate(request: &ReconcileRequest) -> std::result::Result<ValidRequest<'_>, ValidationError> {
    if request.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if request.primary_uri.trim().is_empty() {
        return Err(ValidationError::EmptyUri);
    }
    if request.method.trim().is_empty() {
        return Err(ValidationError::EmptyMethod);
    }
    let method = request
        .method
        .parse::<Method>()
        .map_err(|message| ValidationError::InvalidMethod {
            field: "method",
            message,
        })?;

    match &request.desired_config {
        Value::Object(map) if map.is_empty() => return Err(ValidationError::EmptyConfig),
        Value::Object(_) => {}
        other => {
            return Err(ValidationError::ConfigNotMapping {
                found: value_kind(other),
            });
        }
    }

    let fallback_uri = request
        .fallback_uri
        .as_deref()
        .filter(|uri| !uri.trim().is_empty());

    let fallback_method = if fallback_uri.is_some() {
        let raw = if request.fallback_method.trim().is_empty() {
            DEFAULT_FALLBACK_METHOD
        } else {
            request.fallback_method.as_str()
        };
        raw.parse::<Method>()
            .map_err(|message| ValidationError::InvalidMethod {
                field: "fallback_method",
                message,
            })?
    } else {
        Method::Patch
    };

    Ok(ValidRequest {
        name: &request.name,
        primary_uri: &request.primary_uri,
        method,
        desired: &request.desired_config,
        fallback_uri,
        fallback_method,
    })
}

/// Reconcile one request against a device
///
/// Performs at most two reads (primary, then fallback) and at most one
/// write. With `dry_run` set the device is never written. Transport errors
/// from the client propagate; every other failure is reported as a result.
pub fn reconcile<C: DeviceClient + ?Sized>(
    request: &ReconcileRequest,
    client: &C,
    dry_run: bool,
) -> Result<ReconcileResult> {
    let valid = match validate(request) {
        Ok(valid) => valid,
        Err(err) => {
            log::error!("{}: {err}", display_name(&request.name));
            return Ok(build_result(
                &request.name,
                Outcome::Failed,
                None,
                None,
                err.to_string(),
            ));
        }
    };

    let resolved = match resolve(client, valid.primary_uri, valid.fallback_uri)? {
        Resolution::Resolved(resolved) => resolved,
        Resolution::Unresolved {
            primary_status,
            fallback_status,
        } => {
            let mut message = format!(
                "could not find a working URI to get initial config: {} returned {primary_status}",
                valid.primary_uri
            );
            if let (Some(uri), Some(status)) = (valid.fallback_uri, fallback_status) {
                message.push_str(&format!(", fallback {uri} returned {status}"));
            }
            log::warn!("{}: {message}", valid.name);
            return Ok(build_result(
                valid.name,
                Outcome::UriUnresolved,
                None,
                None,
                message,
            ));
        }
    };

    let write_method = match resolved.source {
        ResolutionSource::Primary => valid.method,
        ResolutionSource::Fallback => valid.fallback_method,
    };
    log::debug!(
        "{}: resolved {} via {} URI, writes use {write_method}",
        valid.name,
        resolved.uri,
        resolved.source
    );

    if deep_equal(&resolved.current, valid.desired) {
        return Ok(build_result(
            valid.name,
            Outcome::AlreadyMatching,
            None,
            Some(valid.method),
            "Config is already set",
        )
        .with_resolution(resolved.uri, resolved.source));
    }

    if dry_run {
        let changes = diff(&resolved.current, valid.desired);
        return Ok(build_result(
            valid.name,
            Outcome::DryRunPending,
            Some(changes),
            Some(valid.method),
            format!("Config will be applied with {write_method} to {}", resolved.uri),
        )
        .with_resolution(resolved.uri, resolved.source));
    }

    let response = client.write(&resolved.uri, write_method, valid.desired)?;

    if response.is_write_success() {
        log::info!(
            "{}: applied config with {write_method} to {} (status {})",
            valid.name,
            resolved.uri,
            response.status
        );
        let changes = diff(&resolved.current, valid.desired);
        return Ok(build_result(
            valid.name,
            Outcome::Applied,
            Some(changes),
            Some(valid.method),
            "Successfully applied config",
        )
        .with_resolution(resolved.uri, resolved.source));
    }

    let message = format!(
        "failed to add / modify config: status {}, response: {}, uri: {} ({} URI)",
        response.status,
        response.body_text().unwrap_or_else(|| "<empty>".to_string()),
        resolved.uri,
        resolved.source
    );
    log::warn!("{}: {message}", valid.name);
    log::debug!("{}: rejected payload: {}", valid.name, valid.desired);

    Ok(
        build_result(valid.name, Outcome::Failed, None, Some(valid.method), message)
            .with_resolution(resolved.uri, resolved.source),
    )
}

/// Reconcile a single declaration given as loose arguments
///
/// `init_uri`/`init_method` name the fallback URI and the method used to
/// write through it; the method defaults to PATCH.
#[allow(clippy::too_many_arguments)]
pub fn config_manage<C: DeviceClient + ?Sized>(
    client: &C,
    name: &str,
    uri: &str,
    method: &str,
    config: Value,
    init_uri: Option<&str>,
    init_method: Option<&str>,
    dry_run: bool,
) -> Result<ReconcileResult> {
    let request = ReconcileRequest {
        name: name.to_string(),
        primary_uri: uri.to_string(),
        method: method.to_string(),
        desired_config: config,
        fallback_uri: init_uri.map(str::to_string),
        fallback_method: init_method.unwrap_or(DEFAULT_FALLBACK_METHOD).to_string(),
    };
    reconcile(&request, client, dry_run)
}

/// Reconcile requests one after another
///
/// Unlike [`reconcile`], a transport error does not stop the run: it is
/// recorded as a failed result for that request and the next one proceeds.
pub fn reconcile_all<C, P>(
    requests: &[ReconcileRequest],
    client: &C,
    dry_run: bool,
    progress: &mut P,
) -> (Vec<ReconcileResult>, RunSummary)
where
    C: DeviceClient + ?Sized,
    P: ProgressCallback,
{
    let mut results = Vec::with_capacity(requests.len());
    let mut summary = RunSummary::default();

    for request in requests {
        progress.on_start(&request.name);
        let result = match reconcile(request, client, dry_run) {
            Ok(result) => result,
            Err(err) => {
                log::error!("{}: {err}", display_name(&request.name));
                build_result(&request.name, Outcome::Failed, None, None, err.to_string())
            }
        };
        summary.add_result(&result);
        progress.on_complete(&result);
        results.push(result);
    }

    (results, summary)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() { "<unnamed>" } else { name }
}
