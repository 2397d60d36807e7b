mod data;
mod portfolio;
mod session;
mod settings;
mod show;

use std::sync::Arc;

use divdash_core::{
    ActionResult, Controller, DashboardConfig, DashboardView, FileStore, Notice, NoticeKind,
    Persistence, RefreshReport, ReqwestHttpClient, RelayDataSource, Settings, StatsView,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Command, PortfolioCommand, Section, SettingsCommand};
use crate::error::CliError;

/// What a command produced: notices for stderr and a body for stdout.
#[derive(Debug)]
pub struct CommandResult {
    pub notices: Vec<Notice>,
    pub body: Body,
}

#[derive(Debug)]
pub enum Body {
    Empty,
    View(Box<DashboardView>, Section),
    Status(StatusReport),
    Settings(Settings),
    /// What a refresh fetched, followed by the rebuilt dashboard.
    Refresh(RefreshReport, Box<DashboardView>),
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub logged_in: bool,
    pub store: String,
    pub relay_url: String,
    pub portfolio_entries: usize,
    pub stats: StatsView,
}

impl CommandResult {
    pub fn new(body: Body) -> Self {
        Self {
            notices: Vec::new(),
            body,
        }
    }

    /// Wraps a controller action outcome; error notices suppress the body.
    pub fn from_action(outcome: ActionResult, body: Body) -> Self {
        match outcome {
            Ok(notice) => Self {
                notices: vec![notice],
                body,
            },
            Err(notice) => Self {
                notices: vec![notice],
                body: Body::Empty,
            },
        }
    }

    pub fn error_count(&self) -> usize {
        self.notices
            .iter()
            .filter(|notice| notice.kind() == NoticeKind::Error)
            .count()
    }
}

/// Resolves configuration: defaults, then environment, then flags.
pub fn resolve_config(cli: &Cli) -> DashboardConfig {
    let mut config = DashboardConfig::from_env();
    if let Some(path) = &cli.store {
        config.store_path = path.clone();
    }
    if let Some(url) = &cli.relay_url {
        config.relay_url = url.clone();
    }
    if cli.sample_fallback {
        config.sample_fallback = true;
    }
    config
}

pub fn open_controller(config: DashboardConfig) -> Result<Controller, CliError> {
    debug!(store = %config.store_path.display(), relay = %config.relay_url, "opening dashboard");
    let store = FileStore::open(&config.store_path)?;
    let source = RelayDataSource::new(
        Arc::new(ReqwestHttpClient::new()),
        config.relay_url.clone(),
        config.key_rate_url.clone(),
        config.key_rate_pointer.clone(),
    )
    .with_timeout_ms(config.timeout_ms);

    Ok(Controller::open(config, Persistence::new(store), Arc::new(source))?)
}

pub async fn execute(command: &Command, controller: &mut Controller) -> Result<CommandResult, CliError> {
    let result = match command {
        Command::Login(args) => session::login(controller, args.password.as_deref())?,
        Command::Logout => session::logout(controller)?,
        Command::Status => session::status(controller),
        Command::Refresh => data::refresh(controller).await,
        Command::Sample => data::sample(controller),
        Command::Show(args) => show::run(controller, args.section, args.refresh).await,
        Command::Portfolio(args) => match &args.command {
            PortfolioCommand::Add { ticker, quantity } => portfolio::add(controller, ticker, quantity),
            PortfolioCommand::Remove { index } => portfolio::remove(controller, *index),
            PortfolioCommand::List => portfolio::list(controller),
        },
        Command::Settings(args) => match &args.command {
            SettingsCommand::Show => settings::show(controller),
            SettingsCommand::Save {
                amount,
                key_rate,
                inflation,
            } => settings::save(
                controller,
                amount.as_deref(),
                key_rate.as_deref(),
                inflation.as_deref(),
            ),
        },
    };
    Ok(result)
}

/// Listing views stay behind the login gate.
fn gated(controller: &Controller) -> Option<CommandResult> {
    (!controller.state().logged_in).then(|| CommandResult {
        notices: vec![Notice::LoginRequired],
        body: Body::Empty,
    })
}
