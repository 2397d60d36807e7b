mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error @ CliError::Rejected { .. }) => ExitCode::from(error.exit_code()),
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = commands::resolve_config(&cli);
    let locale = config.locale;

    let mut controller = commands::open_controller(config)?;
    let result = commands::execute(&cli.command, &mut controller).await?;
    output::render(&result, cli.format, cli.pretty, locale)?;

    match result.error_count() {
        0 => Ok(()),
        count => Err(CliError::Rejected { count }),
    }
}
