//! Behavior-driven tests for the dashboard controller
//!
//! These tests drive the controller the way a user does: log in, edit the
//! portfolio and settings, refresh through the relay, and reopen the store.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use divdash_core::{
    Controller, DashboardConfig, FileStore, KeyValueStore, MemoryStore, Notice, Persistence,
    PortfolioEntry, RelayDataSource, Settings, SettingsInput, StoreError, StoreKey,
    StubHttpClient, TOP_N,
};
use serde_json::{json, Value};

fn relay_source(config: &DashboardConfig, stub: Arc<StubHttpClient>) -> RelayDataSource {
    RelayDataSource::new(
        stub,
        config.relay_url.clone(),
        config.key_rate_url.clone(),
        config.key_rate_pointer.clone(),
    )
}

fn offline_controller(persistence: Persistence) -> Controller {
    let config = DashboardConfig::default();
    let source = relay_source(&config, Arc::new(StubHttpClient::new()));
    Controller::open(config, persistence, Arc::new(source)).expect("controller opens")
}

fn logged_in_controller() -> Controller {
    let mut controller = offline_controller(Persistence::new(MemoryStore::new()));
    controller
        .login("dividends")
        .expect("store writable")
        .expect("password accepted");
    controller
}

/// In-memory store whose writes can be switched to fail.
struct SwitchableStore {
    inner: MemoryStore,
    failing: Arc<AtomicBool>,
}

impl SwitchableStore {
    fn new() -> (Self, Arc<AtomicBool>) {
        let failing = Arc::new(AtomicBool::new(false));
        let store = Self {
            inner: MemoryStore::new(),
            failing: Arc::clone(&failing),
        };
        (store, failing)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: PathBuf::from("switchable"),
                source: std::io::Error::other("disk full"),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for SwitchableStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.remove(key)
    }
}

fn listing(rows: Value) -> String {
    json!({
        "securities": {
            "columns": ["SECID", "PRICE", "YIELD", "DATE", "AMOUNT"],
            "data": rows
        }
    })
    .to_string()
}

// =============================================================================
// Login gate
// =============================================================================

#[test]
fn when_wrong_password_is_entered_user_stays_logged_out() {
    // Given: A fresh controller
    let mut controller = offline_controller(Persistence::new(MemoryStore::new()));

    // When: The user types a wrong password
    let outcome = controller.login("guess").expect("store writable");

    // Then: Login is rejected and nothing is persisted
    assert_eq!(outcome, Err(Notice::WrongPassword));
    assert!(!controller.state().logged_in);
    assert!(!controller.persistence().is_logged_in().expect("readable"));
}

#[test]
fn when_user_logs_in_session_survives_reopening_the_store() {
    // Given: A file-backed store
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("store.json");

    {
        let mut controller =
            offline_controller(Persistence::new(FileStore::open(&path).expect("open")));
        let outcome = controller.login("dividends").expect("store writable");
        assert_eq!(outcome, Ok(Notice::LoggedIn));
        controller
            .add_entry("sber", "10")
            .expect("valid entry is added");
    }

    // When: The dashboard starts again from the same file
    let controller = offline_controller(Persistence::new(FileStore::open(&path).expect("reopen")));

    // Then: The login gate is skipped and the portfolio is restored
    assert!(controller.state().logged_in);
    assert_eq!(
        controller.state().portfolio,
        vec![PortfolioEntry {
            ticker: String::from("SBER"),
            quantity: 10
        }]
    );
}

#[test]
fn when_user_logs_out_marker_is_removed() {
    let mut controller = logged_in_controller();

    let outcome = controller.logout().expect("store writable");

    assert_eq!(outcome, Ok(Notice::LoggedOut));
    assert!(!controller.persistence().is_logged_in().expect("readable"));
    assert_eq!(controller.add_entry("SBER", "1"), Err(Notice::LoginRequired));
}

// =============================================================================
// Portfolio editing
// =============================================================================

#[test]
fn when_entry_is_removed_the_rest_keep_their_order_in_the_store() {
    // Given: Three holdings
    let mut controller = logged_in_controller();
    for (ticker, quantity) in [("SBER", "10"), ("GAZP", "5"), ("LKOH", "1")] {
        assert_eq!(controller.add_entry(ticker, quantity), Ok(Notice::EntryAdded));
    }

    // When: The first one is removed
    let outcome = controller.remove_entry(0);

    // Then: The store holds exactly the remaining two, in order
    assert_eq!(outcome, Ok(Notice::EntryRemoved));
    let stored = controller
        .persistence()
        .load_portfolio()
        .expect("readable")
        .expect("portfolio persisted");
    let tickers = stored.iter().map(|e| e.ticker.as_str()).collect::<Vec<_>>();
    assert_eq!(tickers, vec!["GAZP", "LKOH"]);
    assert_eq!(controller.state().portfolio, stored);
}

#[test]
fn when_portfolio_input_is_incomplete_nothing_changes() {
    let mut controller = logged_in_controller();

    assert_eq!(controller.add_entry("", "10"), Err(Notice::FillAllFields));
    assert_eq!(controller.add_entry("SBER", "0"), Err(Notice::FillAllFields));
    assert_eq!(controller.add_entry("SBER", "ten"), Err(Notice::FillAllFields));
    assert_eq!(controller.remove_entry(3), Err(Notice::NoSuchEntry));

    assert!(controller.state().portfolio.is_empty());
    assert_eq!(
        controller
            .persistence()
            .raw(StoreKey::Portfolio)
            .expect("readable"),
        None
    );
}

#[test]
fn when_the_store_rejects_a_write_portfolio_edits_are_rolled_back() {
    // Given: Two saved holdings and a store that then stops accepting writes
    let (store, failing) = SwitchableStore::new();
    let mut controller = offline_controller(Persistence::new(store));
    controller.login("dividends").expect("writable").expect("accepted");
    controller.add_entry("SBER", "10").expect("added");
    controller.add_entry("GAZP", "5").expect("added");
    let before = controller.state().portfolio.clone();
    failing.store(true, Ordering::SeqCst);

    // When: The user adds and removes holdings
    let added = controller.add_entry("LKOH", "1");
    let removed = controller.remove_entry(0);

    // Then: Both are refused and memory still matches the store
    assert_eq!(added, Err(Notice::SaveFailed));
    assert_eq!(removed, Err(Notice::SaveFailed));
    assert_eq!(controller.state().portfolio, before);
    assert_eq!(
        controller.persistence().load_portfolio().expect("readable"),
        Some(before)
    );
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn when_the_store_rejects_settings_they_are_unchanged() {
    let (store, failing) = SwitchableStore::new();
    let mut controller = offline_controller(Persistence::new(store));
    controller.login("dividends").expect("writable").expect("accepted");
    failing.store(true, Ordering::SeqCst);

    let outcome = controller.save_settings(&SettingsInput::new("99999", "18", "9"));

    assert_eq!(outcome, Err(Notice::SaveFailed));
    assert_eq!(controller.state().settings, Settings::default());
    assert_eq!(controller.persistence().load_settings().expect("readable"), None);
}

#[test]
fn when_a_settings_write_fails_on_disk_a_later_write_does_not_persist_it() {
    // Given: A file-backed session whose directory is replaced by a plain file
    let dir = tempfile::tempdir().expect("temp dir");
    let parent = dir.path().join("profile");
    let path = parent.join("store.json");
    let mut controller =
        offline_controller(Persistence::new(FileStore::open(&path).expect("open")));
    controller.login("dividends").expect("writable").expect("accepted");
    std::fs::remove_dir_all(&parent).expect("drop profile dir");
    std::fs::write(&parent, "").expect("block profile dir");

    // When: A settings save fails and the disk then recovers
    let outcome = controller.save_settings(&SettingsInput::new("99999", "16", "7"));
    std::fs::remove_file(&parent).expect("unblock profile dir");
    let added = controller.add_entry("SBER", "10");

    // Then: The rejected amount never reaches the file
    assert_eq!(outcome, Err(Notice::SaveFailed));
    assert_eq!(added, Ok(Notice::EntryAdded));
    let on_disk = std::fs::read_to_string(&path).expect("store file written");
    assert!(!on_disk.contains("99999"));
    assert!(on_disk.contains("SBER"));
}

#[test]
fn when_inflation_is_not_a_number_settings_are_unchanged() {
    // Given: Saved settings
    let mut controller = logged_in_controller();
    let first = SettingsInput::new("5000", "16", "7,5");
    assert_eq!(controller.save_settings(&first), Ok(Notice::SettingsSaved));
    let saved = controller.state().settings;

    // When: The user submits a non-numeric inflation
    let outcome = controller.save_settings(&SettingsInput::new("20000", "18", "abc"));

    // Then: The update is rejected as a whole
    assert_eq!(outcome, Err(Notice::InvalidSettings));
    assert_eq!(controller.state().settings, saved);
    assert_eq!(saved.inflation, 7.5);
    assert_eq!(
        controller.persistence().load_settings().expect("readable"),
        Some(saved)
    );
}

#[test]
fn when_sample_data_is_loaded_both_lists_are_ranked_by_yield() {
    let mut controller = logged_in_controller();

    assert_eq!(controller.load_sample(), Ok(Notice::SampleDataLoaded));

    let state = controller.state();
    assert_eq!(state.stocks.len(), TOP_N);
    assert_eq!(state.bonds.len(), TOP_N);
    assert!(state
        .stocks
        .windows(2)
        .all(|pair| pair[0].dividend_yield >= pair[1].dividend_yield));
    assert!(state.bonds.windows(2).all(|pair| pair[0].yield_pct >= pair[1].yield_pct));
    assert_eq!(controller.view().stocks[0].ticker, "VTBR");
}

#[test]
fn when_investment_amount_changes_lots_are_recomputed() {
    let mut controller = logged_in_controller();
    controller.load_sample().expect("sample loads");

    controller
        .save_settings(&SettingsInput::new("5000", "16", "7"))
        .expect("valid settings");

    let view = controller.view();
    let sber = view
        .stocks
        .iter()
        .find(|row| row.ticker == "SBER")
        .expect("SBER in sample");
    assert_eq!(sber.price, 250.5);
    assert_eq!(sber.lots, 1);
}

// =============================================================================
// Refresh through the relay
// =============================================================================

#[tokio::test]
async fn when_all_sources_answer_refresh_replaces_data() {
    // Given: A relay serving both listings and a rate feed
    let config = DashboardConfig::default();
    let urls = relay_source(&config, Arc::new(StubHttpClient::new()));
    let stub = Arc::new(
        StubHttpClient::new()
            .with_response(config.key_rate_url.clone(), 200, r#"{"KeyRate": 16.0}"#)
            .with_response(
                urls.relay_url_for(&config.stocks_endpoint),
                200,
                listing(json!([
                    ["SBER", 250.5, 8.5, "20.12.2023", 21.3],
                    ["NOPE", 100.0, null, null, null],
                    ["GAZP", 158.2, 9.2, "15.01.2024", 14.6]
                ])),
            )
            .with_response(
                urls.relay_url_for(&config.bonds_endpoint),
                200,
                listing(json!([
                    ["SU26240RMFS0", 980.5, 8.2, "15.05.2033", 80.4],
                    ["RU000A0JX0J2", 1001.0, 12.0, "01.01.2030", 50.0]
                ])),
            ),
    );
    let source = relay_source(&config, Arc::clone(&stub));
    let mut controller = Controller::open(
        config,
        Persistence::new(MemoryStore::new()),
        Arc::new(source),
    )
    .expect("open");
    controller.login("dividends").expect("writable").expect("accepted");

    // When: The user refreshes
    let report = controller.refresh().await;

    // Then: Everything is replaced and the new key rate is persisted
    assert_eq!(report.notices, vec![Notice::DataUpdated]);
    assert_eq!(report.key_rate, Some(16.0));
    let state = controller.state();
    let tickers = state.stocks.iter().map(|s| s.ticker.as_str()).collect::<Vec<_>>();
    assert_eq!(tickers, vec!["GAZP", "SBER"]);
    assert_eq!(state.bonds.len(), 1);
    assert_eq!(state.bonds[0].ticker, "SU26240RMFS0");
    assert!(state.last_refresh.is_some());
    assert!(!state.refreshing);
    assert_eq!(
        controller
            .persistence()
            .load_settings()
            .expect("readable")
            .map(|s| s.key_rate),
        Some(16.0)
    );
    assert_eq!(stub.call_count(), 3);
}

#[tokio::test]
async fn when_exchange_and_rate_feed_fail_prior_data_is_kept() {
    // Given: A logged-in user with sample data and custom settings
    let config = DashboardConfig::default();
    let stub = Arc::new(
        StubHttpClient::new().with_response(config.key_rate_url.clone(), 503, "unavailable"),
    );
    let source = relay_source(&config, Arc::clone(&stub));
    let mut controller = Controller::open(
        config,
        Persistence::new(MemoryStore::new()),
        Arc::new(source),
    )
    .expect("open");
    controller.login("dividends").expect("writable").expect("accepted");
    controller.load_sample().expect("sample");
    controller
        .save_settings(&SettingsInput::new("10000", "15", "7"))
        .expect("valid");
    let before = controller.state().clone();

    // When: Every upstream call fails
    let report = controller.refresh().await;

    // Then: Nothing is replaced and each failure is reported
    assert_eq!(
        report.notices,
        vec![
            Notice::KeyRateUnavailable,
            Notice::ExchangeUnavailable,
            Notice::ExchangeUnavailable,
            Notice::DataUpdated,
        ]
    );
    let state = controller.state();
    assert_eq!(state.stocks, before.stocks);
    assert_eq!(state.bonds, before.bonds);
    assert_eq!(
        state.settings,
        Settings {
            investment_amount: 10_000.0,
            key_rate: 15.0,
            inflation: 7.0
        }
    );
    assert!(!state.refreshing);
}

#[tokio::test]
async fn when_logged_out_refresh_contacts_nothing() {
    let stub = Arc::new(StubHttpClient::new());
    let config = DashboardConfig::default();
    let source = relay_source(&config, Arc::clone(&stub));
    let mut store = MemoryStore::new();
    store
        .set(StoreKey::Settings.as_str(), String::from("not json"))
        .expect("seed");
    let mut controller =
        Controller::open(config, Persistence::new(store), Arc::new(source)).expect("open");

    let report = controller.refresh().await;

    assert_eq!(report.notices, vec![Notice::LoginRequired]);
    assert_eq!(stub.call_count(), 0);
    assert_eq!(controller.state().settings, Settings::default());
}
