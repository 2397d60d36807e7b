//! Dashboard configuration.
//!
//! Defaults are overridden by `DIVDASH_*` environment variables; binaries
//! then apply their own flags on top.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DIVDASH_RELAY_URL` | `http://127.0.0.1:8787/moex-proxy` |
//! | `DIVDASH_KEY_RATE_URL` | `https://www.cbr-xml-daily.ru/daily_json.js` |
//! | `DIVDASH_KEY_RATE_POINTER` | `/KeyRate` |
//! | `DIVDASH_PASSWORD` | `dividends` |
//! | `DIVDASH_SAMPLE_FALLBACK` | off |
//! | `DIVDASH_HOME` | `$HOME/.divdash` |
//! | `DIVDASH_LOCALE` | `LANG`, else `en` |
//! | `DIVDASH_TIMEOUT_MS` | `10000` |

use std::env;
use std::path::PathBuf;

use crate::notice::Locale;

pub const STOCKS_ENDPOINT: &str = "/engines/stock/markets/shares/boards/TQBR/securities.json";
pub const BONDS_ENDPOINT: &str = "/engines/stock/markets/bonds/boards/TQOB/securities.json";

const STORE_FILE: &str = "store.json";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub relay_url: String,
    pub key_rate_url: String,
    pub key_rate_pointer: String,
    pub stocks_endpoint: String,
    pub bonds_endpoint: String,
    pub password: String,
    /// Substitute the sample dataset when a refresh fails.
    pub sample_fallback: bool,
    pub store_path: PathBuf,
    pub locale: Locale,
    pub timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            relay_url: String::from("http://127.0.0.1:8787/moex-proxy"),
            key_rate_url: String::from("https://www.cbr-xml-daily.ru/daily_json.js"),
            key_rate_pointer: String::from("/KeyRate"),
            stocks_endpoint: String::from(STOCKS_ENDPOINT),
            bonds_endpoint: String::from(BONDS_ENDPOINT),
            password: String::from("dividends"),
            sample_fallback: false,
            store_path: PathBuf::from(".divdash").join(STORE_FILE),
            locale: Locale::En,
            timeout_ms: 10_000,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = var("DIVDASH_RELAY_URL") {
            config.relay_url = value;
        }
        if let Some(value) = var("DIVDASH_KEY_RATE_URL") {
            config.key_rate_url = value;
        }
        if let Some(value) = var("DIVDASH_KEY_RATE_POINTER") {
            config.key_rate_pointer = value;
        }
        if let Some(value) = var("DIVDASH_PASSWORD") {
            config.password = value;
        }
        if let Some(value) = var("DIVDASH_SAMPLE_FALLBACK") {
            config.sample_fallback = matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(value) = var("DIVDASH_TIMEOUT_MS").and_then(|v| v.trim().parse().ok()) {
            config.timeout_ms = value;
        }
        if let Some(tag) = var("DIVDASH_LOCALE").or_else(|| var("LANG")) {
            config.locale = Locale::from_tag(&tag);
        }

        config.store_path = resolve_home(var("DIVDASH_HOME"), var("HOME")).join(STORE_FILE);
        config
    }
}

fn resolve_home(divdash_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(path) = divdash_home {
        return PathBuf::from(path);
    }
    if let Some(home) = home {
        return PathBuf::from(home).join(".divdash");
    }
    PathBuf::from(".divdash")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = DashboardConfig::from_lookup(|_| None);
        assert_eq!(config.password, "dividends");
        assert_eq!(config.store_path, PathBuf::from(".divdash/store.json"));
        assert!(!config.sample_fallback);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("DIVDASH_RELAY_URL", "https://relay.example/fn"),
            ("DIVDASH_SAMPLE_FALLBACK", "TRUE"),
            ("DIVDASH_TIMEOUT_MS", "2500"),
            ("HOME", "/home/investor"),
            ("LANG", "ru_RU.UTF-8"),
        ]));

        assert_eq!(config.relay_url, "https://relay.example/fn");
        assert!(config.sample_fallback);
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.locale, Locale::Ru);
        assert_eq!(
            config.store_path,
            PathBuf::from("/home/investor/.divdash/store.json")
        );
    }

    #[test]
    fn divdash_home_wins_over_home() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("DIVDASH_HOME", "/tmp/dd"),
            ("HOME", "/home/investor"),
        ]));
        assert_eq!(config.store_path, PathBuf::from("/tmp/dd/store.json"));
    }
}
