//! Data source contract and the relay-backed implementation.
//!
//! The controller never talks HTTP directly. It asks a [`DataSource`] for
//! raw listing payloads (through the proxy relay) and for the reference
//! rate, and maps every [`SourceError`] to a user notification.
//!
//! | Call | Transport | Result |
//! |------|-----------|--------|
//! | [`listing`](DataSource::listing) | `GET {relay}?endpoint=<encoded path>` | raw JSON payload |
//! | [`key_rate`](DataSource::key_rate) | `GET {rate feed}` | value at a JSON pointer |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::http_client::{HttpClient, HttpRequest};

/// Fetch-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Network failure before any response arrived.
    Unavailable,
    /// A response arrived with a non-success status.
    UpstreamStatus,
    /// The body was not the JSON shape we expected.
    Parse,
}

/// Structured fetch error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn upstream_status(status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("HTTP error {status}: {detail}"),
            None => format!("HTTP error {status}"),
        };
        Self {
            kind: SourceErrorKind::UpstreamStatus,
            message,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Parse,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Unavailable => "source.unavailable",
            SourceErrorKind::UpstreamStatus => "source.upstream_status",
            SourceErrorKind::Parse => "source.parse",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Source of listings and the reference rate.
pub trait DataSource: Send + Sync {
    /// Fetches the raw payload for an upstream exchange path.
    fn listing<'a>(
        &'a self,
        endpoint: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Value, SourceError>> + Send + 'a>>;

    /// Fetches the current central-bank key rate, in percent.
    fn key_rate<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>>;
}

/// Listings through the proxy relay, key rate straight from the rate feed.
#[derive(Clone)]
pub struct RelayDataSource {
    http_client: Arc<dyn HttpClient>,
    relay_url: String,
    key_rate_url: String,
    key_rate_pointer: String,
    timeout_ms: u64,
}

impl RelayDataSource {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        relay_url: impl Into<String>,
        key_rate_url: impl Into<String>,
        key_rate_pointer: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            relay_url: relay_url.into(),
            key_rate_url: key_rate_url.into(),
            key_rate_pointer: key_rate_pointer.into(),
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Relay URL carrying `endpoint` as a percent-encoded query parameter.
    pub fn relay_url_for(&self, endpoint: &str) -> String {
        format!(
            "{}?endpoint={}",
            self.relay_url,
            urlencoding::encode(endpoint)
        )
    }

    async fn get_json(&self, url: String) -> Result<Value, SourceError> {
        debug!(%url, "fetching");
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| SourceError::unavailable(error.message()))?;

        if !response.is_success() {
            let detail = serde_json::from_str::<Value>(&response.body)
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned));
            return Err(SourceError::upstream_status(response.status, detail.as_deref()));
        }

        serde_json::from_str(&response.body)
            .map_err(|error| SourceError::parse(format!("invalid JSON body: {error}")))
    }
}

impl DataSource for RelayDataSource {
    fn listing<'a>(
        &'a self,
        endpoint: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Value, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.get_json(self.relay_url_for(endpoint)).await })
    }

    fn key_rate<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<f64, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let body = self.get_json(self.key_rate_url.clone()).await?;
            extract_rate(&body, &self.key_rate_pointer)
        })
    }
}

/// Reads a finite number (or numeric string) at `pointer`.
pub fn extract_rate(body: &Value, pointer: &str) -> Result<f64, SourceError> {
    let value = body
        .pointer(pointer)
        .ok_or_else(|| SourceError::parse(format!("rate feed has no value at '{pointer}'")))?;

    let rate = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };

    rate.filter(|rate| rate.is_finite())
        .ok_or_else(|| SourceError::parse(format!("value at '{pointer}' is not a number")))
}
