use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::{BondRecord, PortfolioEntry, Settings, StockRecord};

/// Everything the dashboard knows at a point in time.
///
/// Owned by the [`Controller`](crate::Controller) and handed by reference to
/// the view builder and the persistence adapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AppState {
    pub stocks: Vec<StockRecord>,
    pub bonds: Vec<BondRecord>,
    pub portfolio: Vec<PortfolioEntry>,
    pub settings: Settings,
    pub logged_in: bool,
    /// Set while a refresh runs, for views that grey out the refresh trigger.
    pub refreshing: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_refresh: Option<OffsetDateTime>,
}
