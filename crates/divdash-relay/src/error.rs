//! Relay failures and their HTTP mapping.
//!
//! Every failure becomes a JSON body of the form `{"error": "<message>"}`.
//! Only a missing or off-host `endpoint` parameter is a client error;
//! anything that goes wrong upstream is reported as 500.

use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Missing endpoint parameter")]
    MissingEndpoint,

    #[error("endpoint must be an absolute path on the upstream host")]
    InvalidEndpoint,

    #[error("upstream API error: {status} {reason}")]
    UpstreamStatus { status: u16, reason: String },

    #[error("{0}")]
    Transport(String),

    #[error("invalid JSON from upstream: {0}")]
    InvalidJson(String),
}

impl RelayError {
    pub const fn status(&self) -> u16 {
        match self {
            Self::MissingEndpoint | Self::InvalidEndpoint => 400,
            Self::UpstreamStatus { .. } | Self::Transport(_) | Self::InvalidJson(_) => 500,
        }
    }

    pub fn body(&self) -> String {
        json!({ "error": self.to_string() }).to_string()
    }
}

/// Errors that stop the relay server itself.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
