//! # Domain Models
//!
//! Display-ready records and user-editable state for the dividend dashboard.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`StockRecord`] | Dividend-paying share in the top-N stock list |
//! | [`BondRecord`] | Federal loan bond in the top-N bond list |
//! | [`PortfolioEntry`] | Ticker and quantity held by the user |
//! | [`Settings`] | Investment amount, key rate and inflation |
//!
//! Listing records are rebuilt wholesale on every refresh and never mutated
//! in place. Portfolio entries and settings validate their input at
//! construction time, so an invalid value never reaches the persisted store.

mod portfolio;
mod records;
mod settings;

pub use portfolio::PortfolioEntry;
pub use records::{BondRecord, StockRecord, LOT_SIZE, TOP_N};
pub use settings::{Settings, SettingsInput};
