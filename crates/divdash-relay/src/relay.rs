//! Transport-independent proxy handler.
//!
//! [`ProxyRelay::handle`] takes a method and a raw query string and returns a
//! complete [`RelayResponse`]. Hosting it behind axum, a serverless runtime or
//! a test harness only needs a mapping of those three values.
//!
//! The upstream host is fixed: an endpoint has to be an absolute path, and
//! the joined URL must keep the origin of the configured base.

use std::sync::Arc;

use divdash_core::{HttpClient, HttpRequest};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::RelayError;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";

const ENDPOINT_PARAM: &str = "endpoint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayMethod {
    Get,
    Options,
}

/// Status, headers and body of one relay reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl RelayResponse {
    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![
                ("access-control-allow-origin", ALLOW_ORIGIN),
                ("content-type", "application/json"),
            ],
            body,
        }
    }

    fn preflight() -> Self {
        Self {
            status: 200,
            headers: vec![
                ("access-control-allow-origin", ALLOW_ORIGIN),
                ("access-control-allow-headers", ALLOW_HEADERS),
                ("access-control-allow-methods", ALLOW_METHODS),
            ],
            body: String::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}

impl From<RelayError> for RelayResponse {
    fn from(error: RelayError) -> Self {
        Self::json(error.status(), error.body())
    }
}

/// Forwards `?endpoint=<path>` to the upstream host.
#[derive(Clone)]
pub struct ProxyRelay {
    http_client: Arc<dyn HttpClient>,
    upstream_base: String,
    timeout_ms: u64,
}

impl ProxyRelay {
    pub fn new(http_client: Arc<dyn HttpClient>, upstream_base: impl Into<String>) -> Self {
        let upstream_base: String = upstream_base.into();
        Self {
            http_client,
            upstream_base: upstream_base.trim_end_matches('/').to_owned(),
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub async fn handle(&self, method: RelayMethod, raw_query: Option<&str>) -> RelayResponse {
        if method == RelayMethod::Options {
            return RelayResponse::preflight();
        }

        let Some(endpoint) = raw_query.and_then(endpoint_param) else {
            return RelayError::MissingEndpoint.into();
        };

        let url = match self.upstream_url(&endpoint) {
            Ok(url) => url,
            Err(error) => {
                warn!(%endpoint, %error, "relay endpoint rejected");
                return error.into();
            }
        };

        match self.forward(url).await {
            Ok(body) => RelayResponse::json(200, body),
            Err(error) => {
                warn!(%endpoint, %error, "relay request failed");
                error.into()
            }
        }
    }

    fn upstream_url(&self, endpoint: &str) -> Result<String, RelayError> {
        if !endpoint.starts_with('/') {
            return Err(RelayError::InvalidEndpoint);
        }

        let url = format!("{}{}", self.upstream_base, endpoint);
        let same_origin = match (Url::parse(&self.upstream_base), Url::parse(&url)) {
            (Ok(base), Ok(target)) => base.origin() == target.origin(),
            _ => false,
        };
        if !same_origin {
            return Err(RelayError::InvalidEndpoint);
        }
        Ok(url)
    }

    async fn forward(&self, url: String) -> Result<String, RelayError> {
        debug!(%url, "fetching upstream");

        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| RelayError::Transport(error.message().to_owned()))?;

        if !response.is_success() {
            return Err(RelayError::UpstreamStatus {
                status: response.status,
                reason: response.reason().unwrap_or_default().to_owned(),
            });
        }

        let payload: Value = serde_json::from_str(&response.body)
            .map_err(|error| RelayError::InvalidJson(error.to_string()))?;
        Ok(payload.to_string())
    }
}

/// First non-empty `endpoint` value of a form-encoded query.
fn endpoint_param(raw_query: &str) -> Option<String> {
    url::form_urlencoded::parse(raw_query.as_bytes())
        .find(|(key, _)| key == ENDPOINT_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
