//! Client controller: login gate, refresh orchestration and user edits.
//!
//! The controller owns the [`AppState`] and the [`Persistence`] adapter.
//! Every mutating user action writes through to the store before returning;
//! when the write fails the in-memory change is rolled back so memory and
//! store never disagree. Failures surface as [`Notice`]s, never as raw
//! errors.

use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::data_source::DataSource;
use crate::domain::{PortfolioEntry, SettingsInput};
use crate::error::CoreError;
use crate::normalize::Normalizer;
use crate::notice::Notice;
use crate::render::{build_view, DashboardView};
use crate::sample::{sample_bonds, sample_stocks};
use crate::state::AppState;
use crate::store::{Persistence, StoreError};
use crate::ValidationError;

/// Result of a user action: the success or error notification it raised.
pub type ActionResult = Result<Notice, Notice>;

/// What a refresh changed, plus every notification it raised in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshReport {
    pub key_rate: Option<f64>,
    pub stocks: Option<usize>,
    pub bonds: Option<usize>,
    pub fallback_used: bool,
    pub notices: Vec<Notice>,
}

pub struct Controller {
    state: AppState,
    persistence: Persistence,
    source: Arc<dyn DataSource>,
    normalizer: Normalizer,
    config: DashboardConfig,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("logged_in", &self.state.logged_in)
            .field("stocks", &self.state.stocks.len())
            .field("bonds", &self.state.bonds.len())
            .field("portfolio", &self.state.portfolio.len())
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Rehydrates state from the store. A persisted login skips the gate.
    pub fn open(
        config: DashboardConfig,
        persistence: Persistence,
        source: Arc<dyn DataSource>,
    ) -> Result<Self, CoreError> {
        let mut controller = Self {
            state: AppState::default(),
            persistence,
            source,
            normalizer: Normalizer::default(),
            config,
        };

        if controller.persistence.is_logged_in()? {
            controller.state.logged_in = true;
            controller.load_app_data()?;
        }
        Ok(controller)
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Full rebuild of the view model from current state.
    pub fn view(&self) -> DashboardView {
        build_view(&self.state)
    }

    pub fn login(&mut self, password: &str) -> Result<ActionResult, CoreError> {
        if password != self.config.password {
            debug!("login rejected");
            return Ok(Err(Notice::WrongPassword));
        }

        self.persistence.set_logged_in(true)?;
        self.state.logged_in = true;
        self.load_app_data()?;
        info!("logged in");
        Ok(Ok(Notice::LoggedIn))
    }

    pub fn logout(&mut self) -> Result<ActionResult, CoreError> {
        self.persistence.set_logged_in(false)?;
        self.state.logged_in = false;
        Ok(Ok(Notice::LoggedOut))
    }

    /// Appends a holding from raw form input.
    pub fn add_entry(&mut self, ticker: &str, quantity: &str) -> ActionResult {
        self.ensure_logged_in()?;
        let entry = PortfolioEntry::parse(ticker, quantity).map_err(|error| {
            debug!(%error, "portfolio input rejected");
            Notice::FillAllFields
        })?;

        self.state.portfolio.push(entry);
        if let Err(error) = self.persistence.save_portfolio(&self.state.portfolio) {
            self.state.portfolio.pop();
            return Err(save_failed(error));
        }
        Ok(Notice::EntryAdded)
    }

    /// Removes the holding at `index`, keeping the others in order.
    pub fn remove_entry(&mut self, index: usize) -> ActionResult {
        self.ensure_logged_in()?;
        if index >= self.state.portfolio.len() {
            let error = ValidationError::IndexOutOfRange {
                index,
                len: self.state.portfolio.len(),
            };
            debug!(%error, "portfolio removal rejected");
            return Err(Notice::NoSuchEntry);
        }

        let removed = self.state.portfolio.remove(index);
        if let Err(error) = self.persistence.save_portfolio(&self.state.portfolio) {
            self.state.portfolio.insert(index, removed);
            return Err(save_failed(error));
        }
        Ok(Notice::EntryRemoved)
    }

    /// Validates and stores all three settings, or none of them.
    pub fn save_settings(&mut self, input: &SettingsInput) -> ActionResult {
        self.ensure_logged_in()?;
        let settings = input.parse().map_err(|error| {
            debug!(%error, "settings input rejected");
            Notice::InvalidSettings
        })?;

        self.persistence
            .save_settings(&settings)
            .map_err(save_failed)?;
        self.state.settings = settings;
        Ok(Notice::SettingsSaved)
    }

    /// Replaces both listings with the fixed sample dataset.
    pub fn load_sample(&mut self) -> ActionResult {
        self.ensure_logged_in()?;
        self.apply_sample();
        Ok(Notice::SampleDataLoaded)
    }

    /// Key rate, then stocks, then bonds, one after another.
    ///
    /// A failed fetch leaves the matching data untouched and adds a notice.
    /// A failure while applying fetched data aborts the run with
    /// [`Notice::RefreshFailed`] and, when enabled, swaps in the sample
    /// dataset. `refreshing` is cleared on every path, including when the
    /// returned future is dropped before it completes.
    pub async fn refresh(&mut self) -> RefreshReport {
        let mut report = RefreshReport::default();
        if !self.state.logged_in {
            report.notices.push(Notice::LoginRequired);
            return report;
        }

        let mut guard = Refreshing::start(self);
        let outcome = guard.run_refresh(&mut report).await;
        match outcome {
            Ok(()) => {
                guard.state.last_refresh = Some(OffsetDateTime::now_utc());
                report.notices.push(Notice::DataUpdated);
            }
            Err(error) => {
                warn!(%error, "refresh failed");
                report.notices.push(Notice::RefreshFailed);
                if guard.config.sample_fallback {
                    guard.apply_sample();
                    report.fallback_used = true;
                }
            }
        }
        report
    }

    async fn run_refresh(&mut self, report: &mut RefreshReport) -> Result<(), CoreError> {
        let source = Arc::clone(&self.source);

        match source.key_rate().await {
            Ok(rate) => {
                let mut settings = self.state.settings;
                settings.key_rate = rate;
                self.persistence.save_settings(&settings)?;
                self.state.settings = settings;
                report.key_rate = Some(rate);
            }
            Err(error) => {
                warn!(%error, "key rate unavailable; keeping {}", self.state.settings.key_rate);
                report.notices.push(Notice::KeyRateUnavailable);
            }
        }

        let stocks_endpoint = self.config.stocks_endpoint.clone();
        if let Some(payload) = fetch_listing(source.as_ref(), &stocks_endpoint, report).await {
            self.state.stocks = self.normalizer.stocks(&payload)?;
            report.stocks = Some(self.state.stocks.len());
        }

        let bonds_endpoint = self.config.bonds_endpoint.clone();
        if let Some(payload) = fetch_listing(source.as_ref(), &bonds_endpoint, report).await {
            self.state.bonds = self.normalizer.bonds(&payload)?;
            report.bonds = Some(self.state.bonds.len());
        }

        info!(
            key_rate = ?report.key_rate,
            stocks = ?report.stocks,
            bonds = ?report.bonds,
            "refresh complete"
        );
        Ok(())
    }

    fn load_app_data(&mut self) -> Result<(), StoreError> {
        if let Some(portfolio) = self.persistence.load_portfolio()? {
            self.state.portfolio = portfolio;
        }
        if let Some(settings) = self.persistence.load_settings()? {
            self.state.settings = settings;
        }
        Ok(())
    }

    fn apply_sample(&mut self) {
        self.state.stocks = sample_stocks();
        self.state.bonds = sample_bonds();
    }

    fn ensure_logged_in(&self) -> Result<(), Notice> {
        if self.state.logged_in {
            Ok(())
        } else {
            Err(Notice::LoginRequired)
        }
    }
}

/// Holds the `refreshing` marker for as long as a refresh runs.
struct Refreshing<'a> {
    controller: &'a mut Controller,
}

impl<'a> Refreshing<'a> {
    fn start(controller: &'a mut Controller) -> Self {
        controller.state.refreshing = true;
        Self { controller }
    }
}

impl std::ops::Deref for Refreshing<'_> {
    type Target = Controller;

    fn deref(&self) -> &Controller {
        self.controller
    }
}

impl std::ops::DerefMut for Refreshing<'_> {
    fn deref_mut(&mut self) -> &mut Controller {
        self.controller
    }
}

impl Drop for Refreshing<'_> {
    fn drop(&mut self) {
        self.controller.state.refreshing = false;
    }
}

async fn fetch_listing(
    source: &dyn DataSource,
    endpoint: &str,
    report: &mut RefreshReport,
) -> Option<serde_json::Value> {
    match source.listing(endpoint).await {
        Ok(payload) => Some(payload),
        Err(error) => {
            warn!(%endpoint, %error, "exchange listing unavailable");
            report.notices.push(Notice::ExchangeUnavailable);
            None
        }
    }
}

fn save_failed(error: StoreError) -> Notice {
    warn!(%error, "failed to persist change");
    Notice::SaveFailed
}
