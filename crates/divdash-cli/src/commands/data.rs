use divdash_core::Controller;

use super::{Body, CommandResult};
use crate::cli::Section;

/// Listings only live for the current process, so both commands render the
/// dashboard they just filled.
pub async fn refresh(controller: &mut Controller) -> CommandResult {
    let report = controller.refresh().await;
    let notices = report.notices.clone();
    let body = if controller.state().logged_in {
        Body::Refresh(report, Box::new(controller.view()))
    } else {
        Body::Empty
    };
    CommandResult { notices, body }
}

pub fn sample(controller: &mut Controller) -> CommandResult {
    let outcome = controller.load_sample();
    CommandResult::from_action(outcome, Body::View(Box::new(controller.view()), Section::All))
}
