use divdash_core::Controller;

use super::{gated, Body, CommandResult};
use crate::cli::Section;

/// Renders a section, optionally refreshing the listings first.
pub async fn run(controller: &mut Controller, section: Section, refresh: bool) -> CommandResult {
    if let Some(result) = gated(controller) {
        return result;
    }
    let notices = if refresh {
        controller.refresh().await.notices
    } else {
        Vec::new()
    };
    CommandResult {
        notices,
        body: Body::View(Box::new(controller.view()), section),
    }
}

#[cfg(test)]
mod tests {
    use divdash_core::{Notice, StubHttpClient};
    use serde_json::json;

    use super::*;
    use crate::commands::test_support::{controller, controller_with, listing, listing_urls};

    #[tokio::test]
    async fn plain_show_has_no_listings_in_a_new_process() {
        let mut controller = controller(true);

        let result = run(&mut controller, Section::Stocks, false).await;

        assert!(result.notices.is_empty());
        let Body::View(view, Section::Stocks) = result.body else {
            panic!("expected the stocks view");
        };
        assert!(view.stocks.is_empty());
    }

    #[tokio::test]
    async fn refresh_flag_fills_the_section_before_rendering() {
        let (stocks_url, bonds_url) = listing_urls();
        let stub = StubHttpClient::new()
            .with_response(stocks_url, 200, listing(json!([["GAZP", 158.2, 9.2, "15.01.2024", 14.6]])))
            .with_response(bonds_url, 200, listing(json!([])));
        let mut controller = controller_with(stub, true);

        let result = run(&mut controller, Section::Stocks, true).await;

        assert_eq!(
            result.notices,
            vec![Notice::KeyRateUnavailable, Notice::DataUpdated]
        );
        let Body::View(view, _) = result.body else {
            panic!("expected a view");
        };
        assert_eq!(view.stocks[0].ticker, "GAZP");
    }
}
