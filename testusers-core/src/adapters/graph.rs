//! Graph API HTTP client
//!
//! Blocking `reqwest` implementation of the `GraphApi` port. GET and DELETE
//! calls carry their parameters in the query string, POST calls in a form
//! body. The access token always travels as the `access_token` parameter.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{GraphRequest, Method};
use crate::ports::GraphApi;

/// Default production Graph API URL
pub const GRAPH_PRODUCTION_URL: &str = "https://graph.facebook.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error envelope the platform wraps failures in
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

/// Graph API client
#[derive(Debug)]
pub struct GraphClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl GraphClient {
    /// Create a client for the given Graph URL and optional API version
    /// (e.g. `v19.0`), which is inserted as the first path segment.
    pub fn new(graph_url: &str, api_version: Option<&str>, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(graph_url)
            .map_err(|e| Error::config(format!("Invalid Graph API URL '{}': {}", graph_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Graph API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let mut base_url = graph_url.trim_end_matches('/').to_string();
        if let Some(version) = api_version.map(|v| v.trim_matches('/')).filter(|v| !v.is_empty()) {
            base_url.push('/');
            base_url.push_str(version);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.graph_url,
            config.api_version.as_deref(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::transport(format!(
                "Connection timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else if error.is_connect() {
            Error::transport(format!("Unable to connect to Graph API at {}", self.base_url))
        } else {
            Error::transport(format!("Graph API request failed: {}", error))
        }
    }

    /// Check the response status and return the body on success.
    ///
    /// The platform's own error message is passed through unchanged when the
    /// body carries one.
    fn read_response(&self, response: Response) -> Result<String> {
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::transport(format!("Failed to read Graph API response: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }

        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            let err = envelope.error;
            return Err(Error::Api {
                status: status.as_u16(),
                message: err.message,
                kind: err.kind,
                code: err.code,
            });
        }

        let message = if !body.trim().is_empty() {
            body
        } else {
            match status.as_u16() {
                401 => "Authentication failed. The access token may be invalid or expired.".to_string(),
                403 => "Access denied. Check the app's permissions.".to_string(),
                404 => "Resource not found.".to_string(),
                429 => "Rate limit exceeded.".to_string(),
                _ => status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            }
        };

        Err(Error::Api {
            status: status.as_u16(),
            message,
            kind: None,
            code: None,
        })
    }
}

impl GraphApi for GraphClient {
    fn execute(&self, request: &GraphRequest) -> Result<String> {
        let url = self.url_for(&request.path);

        let mut pairs = request.rendered_params();
        if let Some(token) = &request.access_token {
            pairs.push(("access_token".to_string(), token.clone()));
        }

        debug!(method = %request.method, path = %request.path, "graph request");

        let builder = match request.method {
            Method::Get => self.client.get(&url).query(&pairs),
            Method::Delete => self.client.delete(&url).query(&pairs),
            Method::Post => self.client.post(&url).form(&pairs),
        };

        let response = builder.send().map_err(|e| self.map_request_error(e))?;
        self.read_response(response)
    }
}
