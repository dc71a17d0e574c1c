//! HTTP client for the contact book REST API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client maps error statuses onto
//! [`ClientError`] and records request counters.

mod async_wrapper;
pub use async_wrapper::{AsyncContactClient, AsyncContactClientImpl};

use crate::config::Config;
use crate::domain::ContactId;
use crate::error::{ClientError, ClientResult};
use crate::metrics::Metrics;
use crate::models::{Contact, ContactPayload, DeleteResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::error::Error as _;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// `message` of an error body: one string or a list of validation messages.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: ErrorMessage,
}

impl ErrorMessage {
    fn into_messages(self) -> Vec<String> {
        match self {
            ErrorMessage::One(message) => vec![message],
            ErrorMessage::Many(messages) => messages,
        }
    }
}

/// Whether a transport error is the agent's read or connect timeout firing.
fn is_timeout(transport: &ureq::Transport) -> bool {
    transport.kind() == ureq::ErrorKind::Io
        && transport
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .is_some_and(|e| matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock))
}

/// HTTP client for the contact book API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ContactClient {
    /// Base URL of the API, without the `/contact` path
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ContactClient {
    /// Create a new ContactClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(config.api_url.clone(), config.request_timeout)
    }

    /// Create a ContactClient with a custom base URL (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::build(base_url.into(), 10)
    }

    fn build(base_url: String, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Send a request, timing it and mapping error statuses.
    fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> ClientResult<ureq::Response> {
        let timer = self.metrics.start_request();
        let url = self.build_url(path);
        tracing::debug!("{} {}", method, url);

        let request = self
            .agent
            .request(method, &url)
            .set("Accept", "application/json");
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        }
        .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
            }
            Err(e) => tracing::debug!("{} {} - Error: {}", method, url, e),
        }
        timer.finish(result.is_ok());

        result
    }

    /// Read a response body as JSON.
    fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ClientResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ClientError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Map a ureq error to a ClientError.
    fn map_error(&self, error: ureq::Error) -> ClientError {
        match error {
            ureq::Error::Status(code, response) => {
                let raw = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let messages = serde_json::from_str::<ErrorBody>(&raw)
                    .map(|body| body.message.into_messages())
                    .unwrap_or_else(|_| vec![raw]);

                match code {
                    400 => ClientError::BadRequest(messages),
                    404 => ClientError::NotFound,
                    _ => ClientError::ApiError {
                        status: code,
                        message: messages.join("; "),
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ClientError::HttpError("Connection failed".to_string())
                } else if is_timeout(&transport) {
                    ClientError::Timeout
                } else {
                    ClientError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch every contact.
    pub fn list_contacts(&self) -> ClientResult<Vec<Contact>> {
        let response = self.send("GET", "/contact", None)?;
        Self::read_json(response)
    }

    /// Fetch a single contact by ID.
    pub fn get_contact(&self, id: ContactId) -> ClientResult<Contact> {
        let response = self.send("GET", &format!("/contact/{}", id), None)?;
        Self::read_json(response)
    }

    /// Create a contact; the server validates it again.
    pub fn create_contact(&self, payload: &ContactPayload) -> ClientResult<Contact> {
        let body = serde_json::to_value(payload)?;
        let response = self.send("POST", "/contact", Some(&body))?;
        Self::read_json(response)
    }

    /// Delete a contact by ID.
    pub fn delete_contact(&self, id: ContactId) -> ClientResult<DeleteResult> {
        let response = self.send("DELETE", &format!("/contact/{}", id), None)?;
        Self::read_json(response)
    }

    /// Set one property of a contact.
    pub fn update_property(
        &self,
        id: ContactId,
        property_name: &str,
        property_value: &str,
    ) -> ClientResult<Contact> {
        if property_name.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "property name cannot be empty".to_string(),
            ));
        }

        let path = format!(
            "/contact/{}?property_name={}&property_value={}",
            id,
            urlencoding::encode(property_name),
            urlencoding::encode(property_value)
        );
        let response = self.send("PUT", &path, None)?;
        Self::read_json(response)
    }
}
