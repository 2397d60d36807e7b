use std::io::{self, BufRead};

use divdash_core::Controller;

use super::{Body, CommandResult, StatusReport};
use crate::error::CliError;

pub fn login(controller: &mut Controller, password: Option<&str>) -> Result<CommandResult, CliError> {
    let password = match password {
        Some(password) => password.to_owned(),
        None => read_password()?,
    };
    let outcome = controller.login(&password)?;
    Ok(CommandResult::from_action(outcome, Body::Empty))
}

pub fn logout(controller: &mut Controller) -> Result<CommandResult, CliError> {
    let outcome = controller.logout()?;
    Ok(CommandResult::from_action(outcome, Body::Empty))
}

pub fn status(controller: &Controller) -> CommandResult {
    let state = controller.state();
    let config = controller.config();
    CommandResult::new(Body::Status(StatusReport {
        logged_in: state.logged_in,
        store: config.store_path.display().to_string(),
        relay_url: config.relay_url.clone(),
        portfolio_entries: state.portfolio.len(),
        stats: controller.view().stats,
    }))
}

fn read_password() -> Result<String, CliError> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
