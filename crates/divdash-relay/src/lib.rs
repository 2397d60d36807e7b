//! Cross-origin proxy relay for divdash.
//!
//! A browser-hosted dashboard cannot call the exchange API directly, so this
//! crate forwards `?endpoint=<path>` requests to the upstream host and returns
//! the JSON with permissive cross-origin headers.

pub mod app;
pub mod config;
pub mod error;
pub mod relay;

pub use app::create_app;
pub use config::RelayConfig;
pub use error::{RelayError, ServeError};
pub use relay::{ProxyRelay, RelayMethod, RelayResponse};
