//! Scripted in-memory device for tests

use crate::client::{DeviceClient, Response};
use crate::error::{Error, Result};
use crate::types::Method;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// A recorded write call
#[derive(Debug, Clone, PartialEq)]
pub struct WriteCall {
    pub uri: String,
    pub method: Method,
    pub body: Value,
}

/// Device with scripted responses that records every call
///
/// Unscripted reads answer 404, unscripted writes answer 204.
#[derive(Debug, Default)]
pub struct MockDevice {
    reads: HashMap<String, std::result::Result<Response, String>>,
    write: Option<std::result::Result<Response, String>>,
    read_log: RefCell<Vec<String>>,
    write_log: RefCell<Vec<WriteCall>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read(mut self, uri: &str, status: u16, body: Option<Value>) -> Self {
        self.reads
            .insert(uri.to_string(), Ok(Response::new(status, body)));
        self
    }

    pub fn with_read_error(mut self, uri: &str, message: &str) -> Self {
        self.reads.insert(uri.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_write(mut self, status: u16, body: Option<Value>) -> Self {
        self.write = Some(Ok(Response::new(status, body)));
        self
    }

    pub fn with_write_error(mut self, message: &str) -> Self {
        self.write = Some(Err(message.to_string()));
        self
    }

    pub fn reads(&self) -> Vec<String> {
        self.read_log.borrow().clone()
    }

    pub fn writes(&self) -> Vec<WriteCall> {
        self.write_log.borrow().clone()
    }
}

impl DeviceClient for MockDevice {
    fn read(&self, uri: &str) -> Result<Response> {
        self.read_log.borrow_mut().push(uri.to_string());
        match self.reads.get(uri) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(Error::transport(uri, message.clone())),
            None => Ok(Response::status(404)),
        }
    }

    fn write(&self, uri: &str, method: Method, body: &Value) -> Result<Response> {
        self.write_log.borrow_mut().push(WriteCall {
            uri: uri.to_string(),
            method,
            body: body.clone(),
        });
        match &self.write {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(Error::transport(uri, message.clone())),
            None => Ok(Response::status(204)),
        }
    }
}
