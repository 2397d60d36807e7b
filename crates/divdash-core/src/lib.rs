//! Core contracts for divdash.
//!
//! This crate contains:
//! - Stock, bond, portfolio and settings records with input validation
//! - The exchange payload normalizer (top-10 ranking)
//! - Key-value persistence behind a store trait
//! - Data source traits/adapters for the relay and the key-rate feed
//! - The controller that owns application state and the view builder

pub mod config;
pub mod controller;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod notice;
pub mod render;
pub mod sample;
pub mod state;
pub mod store;

pub use config::{DashboardConfig, BONDS_ENDPOINT, STOCKS_ENDPOINT};
pub use controller::{ActionResult, Controller, RefreshReport};
pub use data_source::{extract_rate, DataSource, RelayDataSource, SourceError, SourceErrorKind};
pub use domain::{
    BondRecord, PortfolioEntry, Settings, SettingsInput, StockRecord, LOT_SIZE, TOP_N,
};
pub use error::{CoreError, NormalizeError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StubHttpClient,
};
pub use normalize::{Normalizer, RecordLayout, PLACEHOLDER};
pub use notice::{Locale, Notice, NoticeKind};
pub use render::{
    build_view, BondRow, Cell, ComparisonRow, ComparisonView, DashboardView, Level, Metric,
    PortfolioRow, StatsView, StockRow, Tone, AFTER_TAX_FACTOR,
};
pub use state::AppState;
pub use store::{FileStore, KeyValueStore, MemoryStore, Persistence, StoreError, StoreKey};
