use std::env;

/// Relay server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Base URL the `endpoint` parameter is appended to.
    pub upstream_base: String,
    /// Path the relay is mounted at.
    pub route_path: String,
    pub timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8787,
            upstream_base: String::from("https://iss.moex.com"),
            route_path: String::from("/moex-proxy"),
            timeout_ms: 10_000,
        }
    }
}

impl RelayConfig {
    /// Defaults overridden by `DIVDASH_RELAY_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = var("DIVDASH_RELAY_HOST") {
            config.host = host;
        }
        if let Some(port) = var("DIVDASH_RELAY_PORT").and_then(|v| v.trim().parse().ok()) {
            config.port = port;
        }
        if let Some(upstream) = var("DIVDASH_RELAY_UPSTREAM") {
            config.upstream_base = upstream.trim_end_matches('/').to_owned();
        }
        if let Some(path) = var("DIVDASH_RELAY_PATH") {
            config.route_path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
        }
        if let Some(timeout) = var("DIVDASH_RELAY_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
            config.timeout_ms = timeout;
        }
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
