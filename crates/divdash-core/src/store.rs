//! Key-value persistence for user-editable dashboard state.
//!
//! Three fixed keys hold JSON-encoded values: the portfolio, the settings and
//! a presence-only login marker. Writes go through immediately; state is read
//! once at startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{PortfolioEntry, Settings};

/// Fixed keys of the persisted store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Portfolio,
    Settings,
    LoggedIn,
}

impl StoreKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portfolio => "dividendPortfolio",
            Self::Settings => "dividendSettings",
            Self::LoggedIn => "dividendLoggedIn",
        }
    }
}

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store i/o failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file '{path}' is not a JSON object: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value store scoped to one user profile.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store used by tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.map.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.map.remove(key);
        Ok(())
    }
}

/// Durable store kept as a single JSON object on disk.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty when the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let map = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(path = %path.display(), keys = map.len(), "opened file store");
        Ok(Self { path, map })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let encoded = serde_json::to_string_pretty(&self.map).map_err(|source| StoreError::Encode {
            key: "store",
            source,
        })?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, encoded).map_err(io_error)?;
        fs::rename(&staging, &self.path).map_err(io_error)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.get(key).cloned())
    }

    /// A failed write leaves the map as it was before the call.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let previous = self.map.insert(key.to_owned(), value);
        if let Err(error) = self.flush() {
            match previous {
                Some(previous) => self.map.insert(key.to_owned(), previous),
                None => self.map.remove(key),
            };
            return Err(error);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if let Some(previous) = self.map.remove(key) {
            if let Err(error) = self.flush() {
                self.map.insert(key.to_owned(), previous);
                return Err(error);
            }
        }
        Ok(())
    }
}

/// Typed access to the three persisted values.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Raw stored string for `key`.
    pub fn raw(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        self.store.get(key.as_str())
    }

    /// Stored portfolio; an unreadable value is logged and treated as absent.
    pub fn load_portfolio(&self) -> Result<Option<Vec<PortfolioEntry>>, StoreError> {
        self.load_json(StoreKey::Portfolio)
    }

    pub fn save_portfolio(&mut self, portfolio: &[PortfolioEntry]) -> Result<(), StoreError> {
        self.save_json(StoreKey::Portfolio, &portfolio)
    }

    pub fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        let settings: Option<Settings> = self.load_json(StoreKey::Settings)?;
        Ok(settings.filter(|s| {
            let finite = s.investment_amount.is_finite() && s.key_rate.is_finite() && s.inflation.is_finite();
            if !finite {
                warn!(key = StoreKey::Settings.as_str(), "ignoring stored settings with non-finite values");
            }
            finite
        }))
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.save_json(StoreKey::Settings, settings)
    }

    pub fn is_logged_in(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(StoreKey::LoggedIn.as_str())?.is_some())
    }

    pub fn set_logged_in(&mut self, logged_in: bool) -> Result<(), StoreError> {
        if logged_in {
            self.store.set(StoreKey::LoggedIn.as_str(), String::from("true"))
        } else {
            self.store.remove(StoreKey::LoggedIn.as_str())
        }
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key.as_str())? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!(key = key.as_str(), %error, "ignoring unreadable stored value");
                Ok(None)
            }
        }
    }

    fn save_json<T: serde::Serialize + ?Sized>(&mut self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.store.set(key.as_str(), encoded)
    }
}
