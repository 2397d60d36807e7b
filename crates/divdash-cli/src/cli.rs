//! CLI argument definitions for divdash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `login` | Unlock the dashboard with the shared password |
//! | `logout` | Forget the saved session |
//! | `status` | Session, stats and last refresh |
//! | `refresh` | Fetch key rate, stocks and bonds, then render the dashboard |
//! | `show` | Render dashboard sections (`--refresh` fetches first) |
//! | `portfolio` | Add, remove or list holdings |
//! | `settings` | Show or save investment settings |
//! | `sample` | Load the built-in sample listings and render the dashboard |
//!
//! Listings are not persisted between runs, so `show` without `--refresh`
//! renders empty stock and bond tables.
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--store` | `$DIVDASH_HOME/store.json` | Persisted state file |
//! | `--relay-url` | `DIVDASH_RELAY_URL` | Proxy relay address |
//! | `--sample-fallback` | `false` | Use sample data when a refresh fails |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Dividend stocks and federal bonds at a glance.
#[derive(Debug, Parser)]
#[command(name = "divdash", author, version, about = "Dividend stock and bond dashboard")]
pub struct Cli {
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Path of the persisted state file.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Proxy relay URL, e.g. http://127.0.0.1:8787/moex-proxy.
    #[arg(long, global = true)]
    pub relay_url: Option<String>,

    /// Substitute the sample listings when a refresh fails.
    #[arg(long, global = true, default_value_t = false)]
    pub sample_fallback: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Unlock the dashboard. Reads the password from stdin when omitted.
    Login(LoginArgs),
    Logout,
    Status,
    /// Fetch the key rate, stock and bond listings.
    Refresh,
    Show(ShowArgs),
    Portfolio(PortfolioArgs),
    Settings(SettingsArgs),
    /// Replace both listings with the built-in sample data.
    Sample,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_enum, default_value_t = Section::All)]
    pub section: Section,
    /// Fetch fresh listings before rendering.
    #[arg(long)]
    pub refresh: bool,
}

/// Dashboard section selected by `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Stocks,
    Bonds,
    Compare,
    Portfolio,
    All,
}

#[derive(Debug, Args)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortfolioCommand {
    /// Append a holding.
    Add {
        ticker: String,
        /// Positive whole number of units.
        quantity: String,
    },
    /// Remove the holding at a position shown by `portfolio list`.
    Remove { index: usize },
    List,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    /// Save settings; omitted values keep their current setting.
    Save {
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        key_rate: Option<String>,
        #[arg(long)]
        inflation: Option<String>,
    },
}
